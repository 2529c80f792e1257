//! Stock parameter sets.

use colorzones_curve::{ControlPoint, InterpolationStyle};

use crate::params::{Channel, ColorZonesParams, CurveParams, Mode};

const BANDS: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub params: ColorZonesParams,
}

/// Eight evenly spaced bands at the same height.
fn bands(y: f32) -> [ControlPoint; BANDS] {
    std::array::from_fn(|k| ControlPoint::new(k as f32 / (BANDS - 1) as f32, y))
}

fn explicit(points: [(f32, f32); BANDS]) -> [ControlPoint; BANDS] {
    points.map(|(x, y)| ControlPoint::new(x, y))
}

fn preset(
    name: &'static str,
    selector: Channel,
    lightness: [ControlPoint; BANDS],
    chroma: [ControlPoint; BANDS],
    hue: [ControlPoint; BANDS],
) -> Preset {
    let curve = |nodes: [ControlPoint; BANDS]| CurveParams {
        nodes: nodes.to_vec(),
        style: InterpolationStyle::CentripetalCatmullRom,
    };
    Preset {
        name,
        params: ColorZonesParams {
            selector,
            curves: [curve(lightness), curve(chroma), curve(hue)],
            strength: 0.0,
            mode: Mode::Classic,
        },
    }
}

fn red_black_white() -> Preset {
    let mut chroma = bands(0.0);
    chroma[0].y = 0.65;
    chroma[7].y = 0.65;
    chroma[1].x = 3.0 / 16.0;
    chroma[3].x = 0.50;
    chroma[4].x = 0.51;
    chroma[6].x = 15.0 / 16.0;
    preset("red black white", Channel::Hue, bands(0.5), chroma, bands(0.5))
}

fn black_white_and_skin_tones() -> Preset {
    let mut chroma = bands(0.0);
    chroma[0].y = 0.5;
    chroma[7].y = 0.5;
    chroma[1] = ControlPoint::new(0.16, 0.3);
    chroma[2].x = 0.25;
    preset("black white and skin tones", Channel::Hue, bands(0.5), chroma, bands(0.5))
}

fn polarizing_filter() -> Preset {
    let mut lightness = bands(0.5);
    let mut chroma = bands(0.5);
    for (k, node) in chroma.iter_mut().enumerate().skip(3) {
        node.y += (k as f32 - 2.5) / (BANDS as f32 - 2.0) * 0.25;
    }
    for (k, node) in lightness.iter_mut().enumerate().skip(4) {
        node.y -= (k as f32 - 3.5) / (BANDS as f32 - 3.0) * 0.35;
    }
    preset("polarizing filter", Channel::Chroma, lightness, chroma, bands(0.5))
}

fn natural_skin_tones() -> Preset {
    let chroma = explicit([
        (0.000000, 0.468932),
        (0.010000, 0.468932),
        (0.120155, 0.445975),
        (0.248062, 0.468932),
        (0.500000, 0.499667),
        (0.748062, 0.500000),
        (0.990000, 0.468932),
        (1.000000, 0.468932),
    ]);
    preset("natural skin tones", Channel::Hue, bands(0.5), chroma, bands(0.5))
}

fn black_and_white_film() -> Preset {
    let lightness = explicit([
        (0.000000, 0.613040),
        (0.010000, 0.613040),
        (0.245283, 0.447962),
        (0.498113, 0.529201),
        (0.641509, 0.664967),
        (0.879245, 0.777294),
        (0.990000, 0.613040),
        (1.000000, 0.613040),
    ]);
    preset("black & white film", Channel::Hue, lightness, bands(0.0), bands(0.5))
}

/// The built-in presets, in menu order.
pub fn builtin() -> Vec<Preset> {
    vec![
        red_black_white(),
        black_white_and_skin_tones(),
        polarizing_filter(),
        natural_skin_tones(),
        black_and_white_film(),
    ]
}
