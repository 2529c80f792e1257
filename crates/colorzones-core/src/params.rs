use colorzones_curve::{Boundary, ControlPoint, Curve, InterpolationStyle};
use serde::{Deserialize, Serialize};

use crate::error::{ZonesError, ZonesResult};

/// Layout version written by `ColorZonesParams::to_blob`.
pub const CURRENT_VERSION: i32 = 4;

/// Strength is clamped to `[-STRENGTH_LIMIT, STRENGTH_LIMIT]` percent.
pub const STRENGTH_LIMIT: f32 = 200.0;

/// An LCh channel, used both as the selector axis and as a curve index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Lightness,
    Chroma,
    #[default]
    Hue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Lightness, Channel::Chroma, Channel::Hue];

    pub fn code(self) -> i32 {
        self.index() as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Lightness),
            1 => Some(Self::Chroma),
            2 => Some(Self::Hue),
            _ => None,
        }
    }

    /// Position of this channel's curve in [`ColorZonesParams::curves`].
    pub fn index(self) -> usize {
        match self {
            Self::Lightness => 0,
            Self::Chroma => 1,
            Self::Hue => 2,
        }
    }
}

/// Per-pixel algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Polar a/b processing with low-chroma hue protection.
    Classic,
    /// Full LCh round trip.
    #[default]
    Smooth,
}

impl Mode {
    pub fn code(self) -> i32 {
        match self {
            Self::Classic => 0,
            Self::Smooth => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Classic),
            1 => Some(Self::Smooth),
            _ => None,
        }
    }
}

/// Control points and interpolation style of one channel's curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub nodes: Vec<ControlPoint>,
    pub style: InterpolationStyle,
}

impl CurveParams {
    /// Two neutral nodes at the ends of the axis.
    pub fn flat() -> Self {
        Self {
            nodes: vec![ControlPoint::new(0.0, 0.5), ControlPoint::new(1.0, 0.5)],
            style: InterpolationStyle::MonotoneHermite,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self::flat()
    }
}

/// Full parameter set of the color zones operator (layout version 4).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorZonesParams {
    /// Channel whose value is the x axis of all three curves.
    pub selector: Channel,
    /// Curves indexed by [`Channel::index`]: lightness, chroma, hue.
    pub curves: [CurveParams; 3],
    /// Percent; scales every curve's deviation from neutral.
    pub strength: f32,
    pub mode: Mode,
}

impl Default for ColorZonesParams {
    fn default() -> Self {
        Self {
            selector: Channel::Hue,
            curves: [CurveParams::flat(), CurveParams::flat(), CurveParams::flat()],
            strength: 0.0,
            mode: Mode::Smooth,
        }
    }
}

impl ColorZonesParams {
    /// All curves wrap when the selector is hue, since their x axis is then
    /// the hue wheel.
    pub fn boundary(&self) -> Boundary {
        match self.selector {
            Channel::Hue => Boundary::Periodic,
            _ => Boundary::Clamped,
        }
    }

    pub fn curve(&self, channel: Channel) -> &CurveParams {
        &self.curves[channel.index()]
    }

    pub fn curve_mut(&mut self, channel: Channel) -> &mut CurveParams {
        &mut self.curves[channel.index()]
    }

    pub fn clamped_strength(&self) -> f32 {
        if self.strength.is_nan() {
            return 0.0;
        }
        self.strength.clamp(-STRENGTH_LIMIT, STRENGTH_LIMIT)
    }

    /// Build and validate one channel's curve.
    pub fn build_curve(&self, channel: Channel) -> ZonesResult<Curve> {
        let params = self.curve(channel);
        Curve::build(&params.nodes, params.style, self.boundary())
            .map_err(|source| ZonesError::InvalidCurve { channel, source })
    }

    /// Build all three curves; the first invalid one aborts.
    pub fn build_curves(&self) -> ZonesResult<[Curve; 3]> {
        Ok([
            self.build_curve(Channel::Lightness)?,
            self.build_curve(Channel::Chroma)?,
            self.build_curve(Channel::Hue)?,
        ])
    }

    /// True when every node of every curve sits at 0.5. Such curves bake to
    /// exactly 0.5 in any style, and strength cannot move them.
    pub fn is_identity(&self) -> bool {
        self.curves
            .iter()
            .all(|c| c.nodes.iter().all(|p| p.y == 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = ColorZonesParams::default();
        assert_eq!(p.selector, Channel::Hue);
        assert_eq!(p.mode, Mode::Smooth);
        assert_eq!(p.strength, 0.0);
        for c in &p.curves {
            assert_eq!(c.node_count(), 2);
            assert_eq!(c.style, InterpolationStyle::MonotoneHermite);
            assert!(c.nodes.iter().all(|n| n.y == 0.5));
        }
        assert!(p.is_identity());
    }

    #[test]
    fn boundary_follows_selector() {
        let mut p = ColorZonesParams::default();
        assert_eq!(p.boundary(), Boundary::Periodic);
        p.selector = Channel::Lightness;
        assert_eq!(p.boundary(), Boundary::Clamped);
        p.selector = Channel::Chroma;
        assert_eq!(p.boundary(), Boundary::Clamped);
    }

    #[test]
    fn channel_codes() {
        for ch in Channel::ALL {
            assert_eq!(Channel::from_code(ch.code()), Some(ch));
        }
        assert_eq!(Channel::from_code(3), None);
        assert_eq!(Mode::from_code(Mode::Classic.code()), Some(Mode::Classic));
        assert_eq!(Mode::from_code(Mode::Smooth.code()), Some(Mode::Smooth));
        assert_eq!(Mode::from_code(-1), None);
    }

    #[test]
    fn strength_is_clamped() {
        let mut p = ColorZonesParams::default();
        p.strength = 350.0;
        assert_eq!(p.clamped_strength(), 200.0);
        p.strength = -1000.0;
        assert_eq!(p.clamped_strength(), -200.0);
        p.strength = 42.0;
        assert_eq!(p.clamped_strength(), 42.0);
        p.strength = f32::NAN;
        assert_eq!(p.clamped_strength(), 0.0);
    }

    #[test]
    fn invalid_curve_names_its_channel() {
        let mut p = ColorZonesParams::default();
        p.curve_mut(Channel::Chroma).nodes = vec![ControlPoint::new(0.5, 0.5)];
        let err = p.build_curves().unwrap_err();
        assert!(matches!(
            err,
            ZonesError::InvalidCurve {
                channel: Channel::Chroma,
                ..
            }
        ));
    }

    #[test]
    fn build_curves_uses_selector_boundary() {
        let mut p = ColorZonesParams::default();
        p.selector = Channel::Lightness;
        let curves = p.build_curves().unwrap();
        assert!(curves.iter().all(|c| c.boundary() == Boundary::Clamped));
    }

    #[test]
    fn identity_means_every_node_is_neutral() {
        let mut p = ColorZonesParams::default();
        p.curve_mut(Channel::Lightness).nodes.insert(1, ControlPoint::new(0.5, 0.5));
        assert!(p.is_identity(), "extra neutral nodes keep the set neutral");
        p.curve_mut(Channel::Lightness).nodes[1].y = 0.8;
        assert!(!p.is_identity(), "one raised node breaks neutrality");
    }

    #[test]
    fn json_roundtrip() {
        let mut p = ColorZonesParams::default();
        p.selector = Channel::Chroma;
        p.strength = -35.0;
        p.mode = Mode::Classic;
        p.curve_mut(Channel::Hue).nodes.insert(1, ControlPoint::new(0.25, 0.7));
        let json = serde_json::to_string(&p).unwrap();
        let back: ColorZonesParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
