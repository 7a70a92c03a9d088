use std::fs;
use std::path::Path;

use prepro::prelude::*;
use prepro::{load_folder, output_path, process_batch, save_batch};

fn gradient_rgb_u8(width: u32, height: u32) -> Image {
    let mut bytes = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            bytes.extend_from_slice(&[r, g, 255 - r]);
        }
    }
    Image::new_with_data(ImageDesc::new(width, height, ColorFormat::RGB_U8), bytes).unwrap()
}

fn gradient_rgb_u16(width: u32, height: u32) -> Image {
    let mut samples = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 65535 / (width - 1)) as u16;
            let w = (y * 65535 / (height - 1)) as u16;
            samples.extend_from_slice(&[v, w, v / 2]);
        }
    }
    Image::from_samples(ImageDesc::new(width, height, ColorFormat::RGB_U16), &samples).unwrap()
}

fn write(dir: &Path, name: &str, image: &Image) {
    image.save_file(dir.join(name)).unwrap();
}

#[test]
fn folder_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out").join("nested");
    fs::create_dir_all(input.join("sub")).unwrap();

    write(&input, "b.png", &gradient_rgb_u8(64, 48));
    write(&input, "a.JPG", &gradient_rgb_u8(80, 60));
    write(&input.join("sub"), "c.png", &gradient_rgb_u8(10, 10));
    fs::write(input.join("notes.txt"), "ignored").unwrap();

    let batch = load_folder(&input).unwrap();
    let names: Vec<_> = batch
        .iter()
        .map(|item| item.source.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.JPG", "b.png"]);

    let config = PipelineConfig::default()
        .with_clahe(2.0, (4, 4))
        .with_target_size(32, 32);
    let processed = Pipeline::new(&config).unwrap().process_batch(&batch).unwrap();

    let written = save_batch(&processed, &output).unwrap();
    assert_eq!(written, [output.join("a.png"), output.join("b.png")]);

    for (item, path) in processed.iter().zip(&written) {
        assert_eq!(path, &output_path(&output, &item.source));
        let reloaded = Image::read_file(path).unwrap();
        assert_eq!(reloaded.desc().color_format, ColorFormat::L_U8);
        assert_eq!(reloaded, item.image);
    }
}

#[test]
fn gradient_scenario_from_disk() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "gradient.png", &gradient_rgb_u8(640, 480));

    let batch = load_folder(root.path()).unwrap();
    assert_eq!(batch.len(), 1);
    let images: Vec<Image> = batch.images().cloned().collect();

    let config = PipelineConfig::default()
        .with_denoise(DenoiseMethod::Gaussian)
        .with_background_subtraction(false)
        .with_clahe(1.0, (16, 16))
        .with_target_size(512, 512);
    let outputs = process_batch(&images, &config).unwrap();
    let out = &outputs[0];

    assert_eq!(out.desc().color_format, ColorFormat::L_U8);
    assert_eq!((out.width(), out.height()), (512, 512));

    let layout = LetterboxLayout::compute(640, 480, 512, 512).unwrap();
    assert_eq!(
        (layout.top, layout.bottom, layout.left, layout.right),
        (64, 64, 0, 0)
    );

    let pixels = out.bytes();
    let row = |y: usize| &pixels[y * 512..(y + 1) * 512];
    assert!((0..64).all(|y| row(y).iter().all(|&v| v == 128)));
    assert!((448..512).all(|y| row(y).iter().all(|&v| v == 128)));
}

#[test]
fn sixteen_bit_source_stays_sixteen_bit() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "deep.png", &gradient_rgb_u16(60, 30));

    let batch = load_folder(root.path()).unwrap();
    assert_eq!(
        batch.items[0].image.desc().color_format,
        ColorFormat::RGB_U16
    );

    let config = PipelineConfig::default()
        .with_clahe(2.0, (2, 2))
        .with_target_size(40, 40)
        .with_background_subtraction(true);
    let out = Pipeline::new(&config).unwrap().process_batch(&batch).unwrap();
    let image = &out.items[0].image;

    assert_eq!(image.desc().color_format, ColorFormat::L_U16);
    assert_eq!((image.width(), image.height()), (40, 40));

    // 60x30 into 40x40 scales to 40x20 with ten rows of padding on each side.
    let samples = image.samples::<u16>();
    assert!(samples[..400].iter().all(|&v| v == 32768));
    assert!(samples[1200..].iter().all(|&v| v == 32768));
}

#[test]
fn corrupt_file_fails_the_whole_load() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "a.png", &gradient_rgb_u8(8, 8));
    fs::write(root.path().join("b.jpeg"), b"\xff\xd8 truncated").unwrap();

    let err = load_folder(root.path()).unwrap_err();
    assert!(matches!(err, Error::ImageDecodeFailed { .. }));
    assert!(err.to_string().contains("b.jpeg"));
}
