use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::image::{Image, SUPPORTED_EXTENSIONS};

/// A decoded image together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub source: PathBuf,
    pub image: Image,
}

impl BatchItem {
    pub fn new(source: impl Into<PathBuf>, image: Image) -> Self {
        Self {
            source: source.into(),
            image,
        }
    }

    pub(crate) fn source_id(&self) -> String {
        self.source.display().to_string()
    }
}

/// Ordered set of images; position is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub items: Vec<BatchItem>,
}

impl Batch {
    pub fn new(items: Vec<BatchItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: BatchItem) {
        self.items.push(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter()
    }

    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.items.iter().map(|item| &item.image)
    }
}

/// Decodes every PNG/JPEG file directly inside `dir`, sorted by path.
///
/// The first file that fails to decode aborts the load.
pub fn load_folder<P: AsRef<Path>>(dir: P) -> Result<Batch> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::FolderNotFound(dir.to_path_buf()));
    }

    let paths = ::common::files_with_extensions(dir, SUPPORTED_EXTENSIONS)?;

    let mut batch = Batch::default();
    for path in paths {
        let image = Image::read_file(&path)?;
        debug!(path = %path.display(), desc = %image.desc(), "loaded image");
        batch.push(BatchItem::new(path, image));
    }

    info!(count = batch.len(), dir = %dir.display(), "loaded images");

    Ok(batch)
}

/// Writes each image as `<stem>.png` under `out_dir`, returning the written paths in
/// batch order.
///
/// Nothing is written when two sources map to the same output file.
pub fn save_batch<P: AsRef<Path>>(batch: &Batch, out_dir: P) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    let paths = output_paths(batch, out_dir)?;

    std::fs::create_dir_all(out_dir)?;

    let written = batch
        .iter()
        .zip(paths)
        .map(|(item, path)| {
            item.image.save_file(&path)?;
            debug!(path = %path.display(), "wrote image");
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = written.len(), dir = %out_dir.display(), "saved images");

    Ok(written)
}

fn output_paths(batch: &Batch, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut owners: HashMap<PathBuf, &Path> = HashMap::with_capacity(batch.len());
    let mut paths = Vec::with_capacity(batch.len());

    for item in batch.iter() {
        let path = output_path(out_dir, &item.source);
        if let Some(first) = owners.insert(path.clone(), &item.source) {
            return Err(Error::OutputCollision {
                path,
                first: first.to_path_buf(),
                second: item.source.clone(),
            });
        }
        paths.push(path);
    }

    Ok(paths)
}

/// Output location for `source`: same file stem, `.png` extension, inside `out_dir`.
pub fn output_path(out_dir: &Path, source: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_os_string();
    name.push(".png");
    out_dir.join(name)
}
