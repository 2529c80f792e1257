//! Per-pixel application of baked tables.

mod classic;
mod smooth;

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

pub use classic::Classic;
pub use smooth::Smooth;

use super::tables::BakedTables;
use crate::config::StageConfig;
use crate::error::ZonesResult;
use crate::image_buf::{CHANNELS, Roi};
use crate::params::Mode;

/// One per-pixel color zones algorithm.
///
/// Kernels map `[L, a, b]` to `[L, a, b]`; alpha is carried by the driver.
/// They never fail: every table read clamps its selector.
pub trait PixelTransform: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, tables: &BakedTables, lab: [f32; 3]) -> [f32; 3];
}

/// The kernel a stored [`Mode`] selects.
pub fn kernel(mode: Mode) -> &'static dyn PixelTransform {
    match mode {
        Mode::Classic => &Classic,
        Mode::Smooth => &Smooth,
    }
}

/// Apply `tables` to an interleaved Lab tile with the default
/// [`StageConfig`].
pub fn transform(
    input: &[f32],
    output: &mut [f32],
    roi: Roi,
    tables: &BakedTables,
    mode: Mode,
) -> ZonesResult<()> {
    transform_with(input, output, roi, tables, mode, &StageConfig::default())
}

/// Apply `tables` to an interleaved Lab tile.
///
/// Both buffers must hold exactly `roi.width * roi.height * 4` floats.
/// Neutral tables copy the input through untouched.
pub fn transform_with(
    input: &[f32],
    output: &mut [f32],
    roi: Roi,
    tables: &BakedTables,
    mode: Mode,
    config: &StageConfig,
) -> ZonesResult<()> {
    roi.check(input)?;
    roi.check(output)?;
    if roi.is_empty() {
        return Ok(());
    }

    let t0 = Instant::now();
    if tables.is_neutral() {
        output.copy_from_slice(input);
        debug!(elapsed_ms = t0.elapsed().as_millis(), "color zones pass skipped (neutral)");
        return Ok(());
    }

    let kernel = kernel(mode);
    let row_len = roi.width as usize * CHANNELS;
    let parallel = config.runs_parallel(roi.pixel_count());
    if parallel {
        input
            .par_chunks(row_len)
            .zip(output.par_chunks_mut(row_len))
            .for_each(|(src, dst)| process_row(kernel, tables, src, dst));
    } else {
        for (src, dst) in input.chunks(row_len).zip(output.chunks_mut(row_len)) {
            process_row(kernel, tables, src, dst);
        }
    }
    debug!(
        elapsed_ms = t0.elapsed().as_millis(),
        kernel = kernel.name(),
        width = roi.width,
        height = roi.height,
        parallel,
        "color zones pass"
    );
    Ok(())
}

fn process_row(kernel: &dyn PixelTransform, tables: &BakedTables, src: &[f32], dst: &mut [f32]) {
    for (i, o) in src
        .chunks_exact(CHANNELS)
        .zip(dst.chunks_exact_mut(CHANNELS))
    {
        let [l, a, b] = kernel.apply(tables, [i[0], i[1], i[2]]);
        o[0] = l;
        o[1] = a;
        o[2] = b;
        o[3] = i[3];
    }
}
