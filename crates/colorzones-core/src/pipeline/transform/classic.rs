use std::f32::consts::TAU;

use super::PixelTransform;
use crate::color::ab_to_polar;
use crate::pipeline::tables::BakedTables;
use crate::params::Channel;

/// Chroma that normalizes the selector and the gray-protection weight.
const CHROMA_REF: f32 = 128.0;

/// Legacy kernel: works on the polar form of (a, b).
///
/// With the hue selector, low-chroma pixels are blended toward neutral for
/// the lightness and hue tables, since their hue is unreliable. The chroma
/// table is not blended.
pub struct Classic;

impl PixelTransform for Classic {
    fn name(&self) -> &str {
        "classic"
    }

    fn apply(&self, tables: &BakedTables, [l, a, b]: [f32; 3]) -> [f32; 3] {
        let (c, h) = ab_to_polar(a, b);
        let (select, blend) = match tables.selector() {
            Channel::Lightness => ((l / 100.0).min(1.0), 0.0),
            Channel::Chroma => ((c / CHROMA_REF).min(1.0), 0.0),
            Channel::Hue => (h, (1.0 - c / CHROMA_REF).powi(2)),
        };

        let protect = |v: f32| blend * 0.5 + (1.0 - blend) * v - 0.5;
        let lm = protect(tables.lookup(Channel::Lightness, select));
        let hm = protect(tables.lookup(Channel::Hue, select));
        let cm = 2.0 * tables.lookup(Channel::Chroma, select);

        let (sin, cos) = (TAU * (h + hm)).sin_cos();
        [l * (4.0 * lm).exp2(), cos * cm * c, sin * cm * c]
    }
}

#[cfg(test)]
mod tests {
    use colorzones_curve::ControlPoint;

    use super::*;
    use crate::params::ColorZonesParams;

    fn wild_hue_tables() -> BakedTables {
        let mut p = ColorZonesParams::default();
        for ch in Channel::ALL {
            p.add_node(ch, 0.2, 0.95);
            p.add_node(ch, 0.6, 0.05);
        }
        BakedTables::bake(&p).unwrap()
    }

    #[test]
    fn gray_pixels_ignore_hue_tables() {
        let tables = wild_hue_tables();
        for l in [0.0_f32, 12.5, 50.0, 99.0] {
            let [l2, a2, b2] = Classic.apply(&tables, [l, 0.0, 0.0]);
            assert_eq!(l2, l);
            assert_eq!(a2.abs(), 0.0);
            assert_eq!(b2.abs(), 0.0);
        }
    }

    #[test]
    fn blend_fades_with_chroma() {
        let tables = wild_hue_tables();
        let (dull, vivid) = (4.0_f32, 120.0_f32);
        let angle = TAU * 0.2;
        let [l_dull, ..] = Classic.apply(&tables, [50.0, dull * angle.cos(), dull * angle.sin()]);
        let [l_vivid, ..] =
            Classic.apply(&tables, [50.0, vivid * angle.cos(), vivid * angle.sin()]);
        assert!((l_dull - 50.0).abs() < (l_vivid - 50.0).abs());
    }

    #[test]
    fn lightness_selector_scales_by_power_of_two() {
        let mut p = ColorZonesParams {
            selector: Channel::Lightness,
            ..Default::default()
        };
        p.curve_mut(Channel::Lightness).nodes =
            vec![ControlPoint::new(0.0, 0.75), ControlPoint::new(1.0, 0.75)];
        let tables = BakedTables::bake(&p).unwrap();
        let [l, a, b] = Classic.apply(&tables, [20.0, 3.0, -4.0]);
        assert!((l - 40.0).abs() < 1e-4, "{l}");
        assert!((a - 3.0).abs() < 1e-4);
        assert!((b + 4.0).abs() < 1e-4);
    }

    #[test]
    fn chroma_table_scales_chroma() {
        let mut p = ColorZonesParams {
            selector: Channel::Chroma,
            ..Default::default()
        };
        p.curve_mut(Channel::Chroma).nodes =
            vec![ControlPoint::new(0.0, 0.25), ControlPoint::new(1.0, 0.25)];
        let tables = BakedTables::bake(&p).unwrap();
        let [_, a, b] = Classic.apply(&tables, [50.0, 30.0, 40.0]);
        assert!((a.hypot(b) - 25.0).abs() < 1e-3);
        assert!((b.atan2(a) - 40.0_f32.atan2(30.0)).abs() < 1e-4);
    }

    #[test]
    fn hue_table_rotates() {
        let mut p = ColorZonesParams {
            selector: Channel::Lightness,
            ..Default::default()
        };
        p.curve_mut(Channel::Hue).nodes =
            vec![ControlPoint::new(0.0, 0.75), ControlPoint::new(1.0, 0.75)];
        let tables = BakedTables::bake(&p).unwrap();
        let [_, a, b] = Classic.apply(&tables, [50.0, 10.0, 0.0]);
        assert!(a.abs() < 1e-4, "{a}");
        assert!((b - 10.0).abs() < 1e-4, "{b}");
    }
}
