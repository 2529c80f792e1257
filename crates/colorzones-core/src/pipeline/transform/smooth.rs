use super::PixelTransform;
use crate::color::{lab_to_lch, lch_to_lab};
use crate::pipeline::tables::BakedTables;
use crate::params::Channel;

/// Chroma mapped to selector 1: the largest chroma of the a/b box.
///
/// This axis is intentionally wider than Classic's `C / 128`. Chroma 128
/// selects about 0.71 here, so the two modes read the same chroma curve at
/// different positions.
const CHROMA_NORM: f32 = 1.0 / (128.0 * std::f32::consts::SQRT_2);

/// Kernel working directly in LCh, with no gray protection.
pub struct Smooth;

impl PixelTransform for Smooth {
    fn name(&self) -> &str {
        "smooth"
    }

    fn apply(&self, tables: &BakedTables, [l, a, b]: [f32; 3]) -> [f32; 3] {
        let (l, c, h) = lab_to_lch(l, a, b);
        let select = match tables.selector() {
            Channel::Lightness => l * 0.01,
            Channel::Chroma => c * CHROMA_NORM,
            Channel::Hue => h,
        }
        .clamp(0.0, 1.0);

        let l = l * (4.0 * (tables.lookup(Channel::Lightness, select) - 0.5)).exp2();
        let c = c * 2.0 * tables.lookup(Channel::Chroma, select);
        let h = h + tables.lookup(Channel::Hue, select) - 0.5;
        let (l, a, b) = lch_to_lab(l, c, h);
        [l, a, b]
    }
}
