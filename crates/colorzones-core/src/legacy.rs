//! Migration of stored parameters from layout versions 1 to 3.
//!
//! Old blobs are decoded into [`LegacyParams`] and then mapped to the current
//! [`ColorZonesParams`] by plain `From` conversions.

use bytemuck::{Pod, Zeroable};
use colorzones_curve::{ControlPoint, InterpolationStyle};
use tracing::info;

use crate::blob::{channel_from_code, read_raw};
use crate::error::{ZonesError, ZonesResult};
use crate::params::{CURRENT_VERSION, Channel, ColorZonesParams, CurveParams, Mode};

/// Offset of the extra nodes inserted next to the end bands of a version 1
/// equalizer.
const V1_EDGE_OFFSET: f32 = 0.001;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawV1 {
    channel: i32,
    x: [[f32; 6]; 3],
    y: [[f32; 6]; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawV2 {
    channel: i32,
    x: [[f32; 8]; 3],
    y: [[f32; 8]; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawV3 {
    channel: i32,
    x: [[f32; 8]; 3],
    y: [[f32; 8]; 3],
    strength: f32,
}

/// Fixed-band equalizer of the old layouts: `x[channel][band]`,
/// `y[channel][band]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bands<const N: usize> {
    pub selector: Channel,
    pub x: [[f32; N]; 3],
    pub y: [[f32; N]; 3],
}

impl<const N: usize> Bands<N> {
    fn new(channel: i32, x: [[f32; N]; 3], y: [[f32; N]; 3]) -> ZonesResult<Self> {
        Ok(Self {
            selector: channel_from_code(channel)?,
            x,
            y,
        })
    }
}

/// A decoded pre-version-4 parameter set.
#[derive(Clone, Debug, PartialEq)]
pub enum LegacyParams {
    /// Six bands per channel, 148 bytes.
    V1(Bands<6>),
    /// Eight bands per channel, 196 bytes.
    V2(Bands<8>),
    /// Version 2 plus strength, 200 bytes.
    V3 { bands: Bands<8>, strength: f32 },
}

impl LegacyParams {
    /// Byte length of each old layout.
    pub fn blob_size(version: i32) -> Option<usize> {
        match version {
            1 => Some(size_of::<RawV1>()),
            2 => Some(size_of::<RawV2>()),
            3 => Some(size_of::<RawV3>()),
            _ => None,
        }
    }

    pub fn decode(blob: &[u8], version: i32) -> ZonesResult<Self> {
        match version {
            1 => {
                let raw: RawV1 = read_raw(blob, 1)?;
                Ok(Self::V1(Bands::new(raw.channel, raw.x, raw.y)?))
            }
            2 => {
                let raw: RawV2 = read_raw(blob, 2)?;
                Ok(Self::V2(Bands::new(raw.channel, raw.x, raw.y)?))
            }
            3 => {
                let raw: RawV3 = read_raw(blob, 3)?;
                Ok(Self::V3 {
                    bands: Bands::new(raw.channel, raw.x, raw.y)?,
                    strength: raw.strength,
                })
            }
            old => Err(ZonesError::UnsupportedLegacyVersion {
                old,
                new: CURRENT_VERSION,
            }),
        }
    }

    pub fn version(&self) -> i32 {
        match self {
            Self::V1(_) => 1,
            Self::V2(_) => 2,
            Self::V3 { .. } => 3,
        }
    }
}

fn equalizer_curves<const N: usize>(
    bands: &Bands<N>,
    nodes_for: impl Fn(&[f32; N], &[f32; N]) -> Vec<ControlPoint>,
) -> [CurveParams; 3] {
    std::array::from_fn(|c| CurveParams {
        nodes: nodes_for(&bands.x[c], &bands.y[c]),
        style: InterpolationStyle::CentripetalCatmullRom,
    })
}

fn straight<const N: usize>(x: &[f32; N], y: &[f32; N]) -> Vec<ControlPoint> {
    x.iter()
        .zip(y)
        .map(|(&x, &y)| ControlPoint::new(x, y))
        .collect()
}

/// Six bands become eight nodes: the end bands each get a twin just inside
/// the range, which pins the curve flat at both ends.
fn widened(x: &[f32; 6], y: &[f32; 6]) -> Vec<ControlPoint> {
    let mut nodes = Vec::with_capacity(8);
    nodes.push(ControlPoint::new(x[0], y[0]));
    for (k, (&bx, &by)) in x.iter().zip(y).enumerate() {
        let nx = match k {
            0 => bx + V1_EDGE_OFFSET,
            5 => bx - V1_EDGE_OFFSET,
            _ => bx,
        };
        nodes.push(ControlPoint::new(nx, by));
    }
    nodes.push(ControlPoint::new(x[5], y[5]));
    nodes
}

impl From<LegacyParams> for ColorZonesParams {
    fn from(legacy: LegacyParams) -> Self {
        let (selector, curves, strength) = match legacy {
            LegacyParams::V1(bands) => (bands.selector, equalizer_curves(&bands, widened), 0.0),
            LegacyParams::V2(bands) => (bands.selector, equalizer_curves(&bands, straight::<8>), 0.0),
            LegacyParams::V3 { bands, strength } => {
                (bands.selector, equalizer_curves(&bands, straight::<8>), strength)
            }
        };
        Self {
            selector,
            curves,
            strength,
            mode: Mode::Classic,
        }
    }
}

/// Convert an old parameter blob to the current layout.
///
/// Only `old_version` 1, 2 or 3 to `new_version` 4 is supported, and the
/// blob must be exactly the old layout's size.
pub fn migrate(blob: &[u8], old_version: i32, new_version: i32) -> ZonesResult<ColorZonesParams> {
    if new_version != CURRENT_VERSION || LegacyParams::blob_size(old_version).is_none() {
        return Err(ZonesError::UnsupportedLegacyVersion {
            old: old_version,
            new: new_version,
        });
    }
    let legacy = LegacyParams::decode(blob, old_version)?;
    info!(from = old_version, to = new_version, "migrating color zones parameters");
    Ok(legacy.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_v1(channel: i32, x: [[f32; 6]; 3], y: [[f32; 6]; 3]) -> Vec<u8> {
        bytemuck::bytes_of(&RawV1 { channel, x, y }).to_vec()
    }

    fn encode_v2(channel: i32, x: [[f32; 8]; 3], y: [[f32; 8]; 3]) -> Vec<u8> {
        bytemuck::bytes_of(&RawV2 { channel, x, y }).to_vec()
    }

    fn even<const N: usize>() -> [[f32; N]; 3] {
        [std::array::from_fn(|k| k as f32 / (N - 1) as f32); 3]
    }

    #[test]
    fn layout_sizes() {
        assert_eq!(LegacyParams::blob_size(1), Some(148));
        assert_eq!(LegacyParams::blob_size(2), Some(196));
        assert_eq!(LegacyParams::blob_size(3), Some(200));
        assert_eq!(LegacyParams::blob_size(4), None);
    }

    #[test]
    fn v2_migrates_straight_through() {
        let x = even::<8>();
        let mut y = [[0.5_f32; 8]; 3];
        y[0][3] = 0.8;
        y[2][6] = 0.2;
        let p = migrate(&encode_v2(0, x, y), 2, 4).unwrap();

        assert_eq!(p.selector, Channel::Lightness);
        assert_eq!(p.mode, Mode::Classic);
        assert_eq!(p.strength, 0.0);
        for (c, curve) in p.curves.iter().enumerate() {
            assert_eq!(curve.style, InterpolationStyle::CentripetalCatmullRom);
            assert_eq!(curve.node_count(), 8);
            for (k, node) in curve.nodes.iter().enumerate() {
                assert_eq!(node.x, x[c][k]);
                assert_eq!(node.y, y[c][k]);
            }
        }
        assert!(p.build_curves().is_ok());
    }

    #[test]
    fn v1_widens_to_eight_nodes() {
        let x = [[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]; 3];
        let y = [[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]; 3];
        let p = migrate(&encode_v1(2, x, y), 1, 4).unwrap();

        assert_eq!(p.selector, Channel::Hue);
        let nodes = &p.curve(Channel::Chroma).nodes;
        let xs: Vec<f32> = nodes.iter().map(|n| n.x).collect();
        let ys: Vec<f32> = nodes.iter().map(|n| n.y).collect();
        assert_eq!(xs, vec![0.0, 0.001, 0.2, 0.4, 0.6, 0.8, 1.0 - 0.001, 1.0]);
        assert_eq!(ys, vec![0.1, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.6]);
        assert!(p.build_curves().is_ok());
    }

    #[test]
    fn v3_carries_strength() {
        let raw = RawV3 {
            channel: 1,
            x: even::<8>(),
            y: [[0.5; 8]; 3],
            strength: 42.0,
        };
        let p = migrate(bytemuck::bytes_of(&raw), 3, 4).unwrap();
        assert_eq!(p.selector, Channel::Chroma);
        assert_eq!(p.strength, 42.0);
        assert_eq!(p.mode, Mode::Classic);
    }

    #[test]
    fn unsupported_pairs() {
        let blob = encode_v2(0, even::<8>(), [[0.5; 8]; 3]);
        for (old, new) in [(2, 3), (4, 4), (0, 4), (5, 4), (2, 5)] {
            let err = migrate(&blob, old, new).unwrap_err();
            assert!(
                matches!(err, ZonesError::UnsupportedLegacyVersion { old: o, new: n } if o == old && n == new),
                "{old} -> {new}: {err}"
            );
        }
    }

    #[test]
    fn wrong_length_is_malformed() {
        let blob = encode_v2(0, even::<8>(), [[0.5; 8]; 3]);
        let err = migrate(&blob, 1, 4).unwrap_err();
        assert!(matches!(
            err,
            ZonesError::MalformedBlob {
                version: 1,
                expected: 148,
                actual: 196
            }
        ));
        assert!(matches!(
            migrate(&blob[..150], 2, 4),
            Err(ZonesError::MalformedBlob { .. })
        ));
    }

    #[test]
    fn bad_channel_code() {
        let blob = encode_v2(3, even::<8>(), [[0.5; 8]; 3]);
        assert!(matches!(
            migrate(&blob, 2, 4),
            Err(ZonesError::InvalidField {
                field: "channel",
                value: 3
            })
        ));
    }

    #[test]
    fn decode_reports_version() {
        let blob = encode_v1(0, even::<6>(), [[0.5; 6]; 3]);
        let legacy = LegacyParams::decode(&blob, 1).unwrap();
        assert_eq!(legacy.version(), 1);
    }

    #[test]
    fn load_params_routes_legacy() {
        let blob = encode_v2(1, even::<8>(), [[0.5; 8]; 3]);
        let p = crate::blob::load_params(&blob, 2).unwrap();
        assert_eq!(p.selector, Channel::Chroma);
        assert_eq!(p.mode, Mode::Classic);
    }
}
