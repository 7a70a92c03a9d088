//! Contrast-limited adaptive histogram equalization.
//!
//! The image is split into a grid of tiles. Each tile gets its own clipped
//! histogram and a CDF lookup table; every output pixel then blends the
//! tables of the four nearest tile centres so tile borders do not show.
//!
//! When the grid does not divide the image evenly the image is virtually
//! extended to the right and bottom by mirroring, so all tiles have the same
//! size.


use rayon::prelude::*;
use tracing::debug;

use super::{PlaneOp, apply_plane_op};
use crate::common::border::reflect_101;
use crate::common::{Error, Result, Sample};
use crate::image::{Image, Plane};

pub const DEFAULT_CLIP_LIMIT: f32 = 1.0;
pub const DEFAULT_GRID: (u32, u32) = (16, 16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clahe {
    /// Bin clip threshold as a multiple of the uniform bin height
    /// (`tile_pixels / bins`).
    pub clip_limit: f32,
    /// Tile grid as (columns, rows).
    pub grid: (u32, u32),
}

impl Default for Clahe {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLIP_LIMIT,
            grid: DEFAULT_GRID,
        }
    }
}

impl Clahe {
    pub fn new(clip_limit: f32, grid: (u32, u32)) -> Self {
        Self { clip_limit, grid }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.clip_limit.is_finite() && self.clip_limit > 0.0) {
            return Err(Error::invalid(
                "clahe",
                format!("clip limit must be positive, got {}", self.clip_limit),
            ));
        }
        if self.grid.0 < 1 || self.grid.1 < 1 {
            return Err(Error::invalid(
                "clahe",
                format!(
                    "grid dimensions must be >= 1, got {}x{}",
                    self.grid.0, self.grid.1
                ),
            ));
        }
        Ok(())
    }

    pub fn apply(&self, input: &Image) -> Result<Image> {
        self.validate()?;
        debug!(clip_limit = self.clip_limit, grid = ?self.grid, "clahe");
        apply_plane_op(self, input)
    }
}

impl PlaneOp for Clahe {
    fn run<T: Sample>(&self, plane: &Plane<T>) -> Result<Plane<T>> {
        let tiles = TileGrid::new(plane.width(), plane.height(), self.grid);
        let luts = build_tile_luts(plane, &tiles, self.clip_limit);
        Ok(interpolate(plane, &tiles, &luts))
    }
}

#[derive(Debug, Clone, Copy)]
struct TileGrid {
    cols: usize,
    rows: usize,
    tile_width: usize,
    tile_height: usize,
}

impl TileGrid {
    fn new(width: usize, height: usize, grid: (u32, u32)) -> Self {
        let cols = grid.0 as usize;
        let rows = grid.1 as usize;
        Self {
            cols,
            rows,
            tile_width: width.div_ceil(cols),
            tile_height: height.div_ceil(rows),
        }
    }

    fn tile_area(&self) -> usize {
        self.tile_width * self.tile_height
    }
}

/// Per-tile lookup tables, `T::LEVELS` entries each, row-major over tiles.
fn build_tile_luts<T: Sample>(plane: &Plane<T>, tiles: &TileGrid, clip_limit: f32) -> Vec<T> {
    let bins = T::LEVELS;
    let area = tiles.tile_area();
    let clip = ((clip_limit * area as f32 / bins as f32) as u32).max(1);
    let lut_scale = (bins - 1) as f32 / area as f32;

    let mut luts = vec![T::default(); tiles.cols * tiles.rows * bins];
    luts.par_chunks_mut(bins).enumerate().for_each_init(
        || vec![0u32; bins],
        |hist, (tile, lut)| {
            let tx = tile % tiles.cols;
            let ty = tile / tiles.cols;

            hist.fill(0);
            for y in ty * tiles.tile_height..(ty + 1) * tiles.tile_height {
                let row = plane.row(reflect_101(y as isize, plane.height()));
                for x in tx * tiles.tile_width..(tx + 1) * tiles.tile_width {
                    let sx = reflect_101(x as isize, plane.width());
                    hist[row[sx].to_u32() as usize] += 1;
                }
            }

            clip_histogram(hist, clip);

            let mut sum = 0u32;
            for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
                sum += count;
                *entry = T::from_f32(sum as f32 * lut_scale);
            }
        },
    );

    luts
}

/// Caps every bin at `clip` and spreads the excess over all bins: an equal
/// share first, then the remainder one count at a time with a fixed stride.
fn clip_histogram(hist: &mut [u32], clip: u32) {
    let bins = hist.len();

    let mut excess = 0usize;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += (*bin - clip) as usize;
            *bin = clip;
        }
    }

    let batch = (excess / bins) as u32;
    let mut residual = excess % bins;

    for bin in hist.iter_mut() {
        *bin += batch;
    }

    if residual > 0 {
        let step = (bins / residual).max(1);
        for bin in hist.iter_mut().step_by(step) {
            if residual == 0 {
                break;
            }
            *bin += 1;
            residual -= 1;
        }
    }
}

/// Neighbouring tile pair and blend weight along one axis.
#[derive(Debug, Clone, Copy)]
struct AxisBlend {
    lo: usize,
    hi: usize,
    weight_hi: f32,
}

impl AxisBlend {
    fn new(pos: usize, tile_len: usize, tile_count: usize) -> Self {
        let f = pos as f32 / tile_len as f32 - 0.5;
        let lo = f.floor();
        let weight_hi = f - lo;
        let lo = lo as isize;

        Self {
            lo: lo.max(0) as usize,
            hi: ((lo + 1) as usize).min(tile_count - 1),
            weight_hi,
        }
    }
}

fn interpolate<T: Sample>(plane: &Plane<T>, tiles: &TileGrid, luts: &[T]) -> Plane<T> {
    let width = plane.width();
    let height = plane.height();
    let bins = T::LEVELS;

    let columns: Vec<AxisBlend> = (0..width)
        .map(|x| AxisBlend::new(x, tiles.tile_width, tiles.cols))
        .collect();

    let lut = |tx: usize, ty: usize, value: usize| -> f32 {
        luts[(ty * tiles.cols + tx) * bins + value].to_f32()
    };

    let mut output = vec![T::default(); width * height];
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            let row = AxisBlend::new(y, tiles.tile_height, tiles.rows);
            let ya = row.weight_hi;
            let src = plane.row(y);

            for ((out, &value), col) in out_row.iter_mut().zip(src).zip(&columns) {
                let v = value.to_u32() as usize;
                let xa = col.weight_hi;

                let top = lut(col.lo, row.lo, v) * (1.0 - xa) + lut(col.hi, row.lo, v) * xa;
                let bottom = lut(col.lo, row.hi, v) * (1.0 - xa) + lut(col.hi, row.hi, v) * xa;

                *out = T::from_f32(top * (1.0 - ya) + bottom * ya);
            }
        });

    Plane::new(width, height, output)
}
