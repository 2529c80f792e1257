use std::f32::consts::TAU;

/// Lab -> LCh with hue normalized to the unit turn.
///
/// Hue follows the pipeline's LCh convention: positive angles map to
/// `(0, 0.5]`, the rest to `[0.5, 1]`, so a neutral pixel (a = b = 0)
/// reports `h = 1`.
pub fn lab_to_lch(l: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let angle = b.atan2(a);
    let h = if angle > 0.0 {
        angle / TAU
    } else {
        1.0 - angle.abs() / TAU
    };
    (l, a.hypot(b), h)
}

/// LCh -> Lab. Hue in turns; any real value is accepted.
pub fn lch_to_lab(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (sin, cos) = (TAU * h).sin_cos();
    (l, cos * c, sin * c)
}

/// Polar form of the (a, b) opponent axes: chroma and hue in `[0, 1)`.
pub fn ab_to_polar(a: f32, b: f32) -> (f32, f32) {
    let h = (b.atan2(a) + TAU).rem_euclid(TAU) / TAU;
    // rem_euclid can round up to exactly one turn for tiny negative angles.
    let h = if h >= 1.0 { 0.0 } else { h };
    (a.hypot(b), h)
}
