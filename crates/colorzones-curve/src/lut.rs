//! Dense lookup tables baked from curves.

use crate::curve::Curve;

/// Entries per baked table.
pub const LUT_RES: usize = 0x10000;

/// Scale a value's deviation from neutral (0.5) by `strength` percent.
///
/// `strength_remap(v, 0) == v` and `strength_remap(0.5, s) == 0.5`.
pub fn strength_remap(value: f32, strength: f32) -> f32 {
    value + (value - 0.5) * (strength / 100.0)
}

/// Sample `curve` at `resolution` evenly spaced points over `[0, 1]` and
/// apply the strength remap to each sample.
pub fn bake(curve: &Curve, strength: f32, resolution: usize) -> Vec<f32> {
    let mut table = curve.sample_dense(resolution);
    if strength != 0.0 {
        for v in &mut table {
            *v = strength_remap(*v, strength);
        }
    }
    table
}

/// Linear interpolation at fractional index `position * table.len()`.
///
/// `position` is clamped to `[0, 1]` and both bins to the table bounds, so
/// out-of-range selectors read the edge entries.
pub fn lookup(table: &[f32], position: f32) -> f32 {
    let res = table.len();
    let last = res - 1;
    let scaled = res as f32 * position.clamp(0.0, 1.0);
    let bin0 = (scaled as usize).min(last);
    let bin1 = (bin0 + 1).min(last);
    let f = scaled - bin0 as f32;
    table[bin1] * f + table[bin0] * (1.0 - f)
}
