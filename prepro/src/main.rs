//! `prepro` CLI - normalize a folder of images for model input.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use prepro::{DenoiseMethod, Pipeline, PipelineConfig, load_folder, save_batch};

/// Grayscale, denoise, equalize and letterbox every PNG/JPEG image in a folder.
#[derive(Parser, Debug)]
#[command(name = "prepro")]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder with source images.
    #[arg(short, long, default_value = "data/testdata", value_name = "DIR")]
    input_folder: PathBuf,

    /// Folder the processed PNG files are written to.
    #[arg(short, long, default_value = "data/processed", value_name = "DIR")]
    output_folder: PathBuf,

    /// YAML or JSON pipeline config. Flags below override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Denoise filter.
    #[arg(long, value_enum, ignore_case = true, value_name = "METHOD")]
    denoise_method: Option<DenoiseMethod>,

    /// Subtract a median-blurred background estimate.
    #[arg(long)]
    do_bg_subtract: bool,

    /// CLAHE clip limit.
    #[arg(long, value_name = "FLOAT")]
    clahe_clip: Option<f32>,

    /// CLAHE tile grid.
    #[arg(long, num_args = 2, value_names = ["GX", "GY"])]
    clahe_grid: Option<Vec<u32>>,

    /// Output canvas size.
    #[arg(long, num_args = 2, value_names = ["W", "H"])]
    target_size: Option<Vec<u32>>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    common::log_setup::setup_logging(log_level, Path::new("logs"));

    if let Err(err) = run(&args) {
        error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let pipeline = Pipeline::new(&config).context("Invalid pipeline configuration")?;

    let batch = load_folder(&args.input_folder).with_context(|| {
        format!(
            "Failed to load images from {}",
            args.input_folder.display()
        )
    })?;
    info!("Loaded {} images", batch.len());

    let processed = pipeline
        .process_batch(&batch)
        .context("Failed to process images")?;

    let written = save_batch(&processed, &args.output_folder).with_context(|| {
        format!(
            "Failed to write images to {}",
            args.output_folder.display()
        )
    })?;
    info!(
        "Wrote {} images to {}",
        written.len(),
        args.output_folder.display()
    );

    Ok(())
}

/// Config file values, overridden by any flag given on the command line.
fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(method) = args.denoise_method {
        config.denoise_method = method;
    }
    if args.do_bg_subtract {
        config.do_bg_subtract = true;
    }
    if let Some(clip) = args.clahe_clip {
        config.clahe_clip = clip;
    }
    if let Some(grid) = &args.clahe_grid {
        config.clahe_grid = (grid[0], grid[1]);
    }
    if let Some(size) = &args.target_size {
        config.target_size = (size[0], size[1]);
    }

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("prepro").chain(args.iter().copied())).unwrap()
    }

    fn write_config(dir: &Path, text: &str) -> String {
        let path = dir.join("prepro.yaml");
        std::fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]);
        assert_eq!(args.input_folder, Path::new("data/testdata"));
        assert_eq!(args.output_folder, Path::new("data/processed"));
        assert_eq!(build_config(&args).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "denoise_method: median\nclahe_clip: 3.0\nclahe_grid: [4, 4]\ntarget_size: [64, 64]\n",
        );

        let args = parse(&[
            "--config",
            &config,
            "--denoise-method",
            "Gaussian",
            "--clahe-grid",
            "8",
            "2",
            "--do-bg-subtract",
        ]);
        let merged = build_config(&args).unwrap();

        assert_eq!(merged.denoise_method, DenoiseMethod::Gaussian);
        assert_eq!(merged.clahe_grid, (8, 2));
        assert!(merged.do_bg_subtract);
        // Values without a flag come from the file.
        assert_eq!(merged.clahe_clip, 3.0);
        assert_eq!(merged.target_size, (64, 64));
    }

    #[test]
    fn merged_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "clahe_clip: 2.0\n");

        let args = parse(&["--config", &config, "--clahe-clip", "0"]);
        let err = build_config(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<prepro::Error>(),
            Some(prepro::Error::InvalidParameter { stage: "clahe", .. })
        ));

        let args = parse(&["--target-size", "0", "512"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn unknown_denoise_method_is_rejected_by_parser() {
        let result = Args::try_parse_from(["prepro", "--denoise-method", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn grid_takes_two_values() {
        assert!(Args::try_parse_from(["prepro", "--clahe-grid", "4"]).is_err());
    }
}
