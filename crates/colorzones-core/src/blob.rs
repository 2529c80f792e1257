//! Native-endian binary layout of the current (version 4) parameters.

use bytemuck::{Pod, Zeroable};
use colorzones_curve::{ControlPoint, InterpolationStyle, MAX_NODES};
use tracing::debug;

use crate::error::{ZonesError, ZonesResult};
use crate::legacy;
use crate::params::{CURRENT_VERSION, Channel, ColorZonesParams, CurveParams, Mode};

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawParams {
    channel: i32,
    nodes: [[[f32; 2]; MAX_NODES]; 3],
    num_nodes: [i32; 3],
    style: [i32; 3],
    strength: f32,
    mode: i32,
}

/// Byte length of a version 4 blob.
pub const PARAMS_SIZE: usize = size_of::<RawParams>();

const _: () = assert!(PARAMS_SIZE == 516);

/// Decode a `#[repr(C)]` layout, checking the exact byte length first.
pub(crate) fn read_raw<T: Pod>(blob: &[u8], version: i32) -> ZonesResult<T> {
    let malformed = || ZonesError::MalformedBlob {
        version,
        expected: size_of::<T>(),
        actual: blob.len(),
    };
    if blob.len() != size_of::<T>() {
        return Err(malformed());
    }
    bytemuck::try_pod_read_unaligned(blob).map_err(|_| malformed())
}

pub(crate) fn channel_from_code(code: i32) -> ZonesResult<Channel> {
    Channel::from_code(code).ok_or(ZonesError::InvalidField {
        field: "channel",
        value: code,
    })
}

impl ColorZonesParams {
    /// Encode as a version 4 blob. Unused node slots are zero.
    ///
    /// Fails if a curve holds more nodes than the layout has slots for.
    pub fn to_blob(&self) -> ZonesResult<Vec<u8>> {
        let mut raw = RawParams::zeroed();
        raw.channel = self.selector.code();
        for (i, curve) in self.curves.iter().enumerate() {
            let count = curve.node_count();
            if count > MAX_NODES {
                return Err(ZonesError::InvalidField {
                    field: "num_nodes",
                    value: count as i32,
                });
            }
            for (slot, node) in raw.nodes[i].iter_mut().zip(&curve.nodes) {
                *slot = [node.x, node.y];
            }
            raw.num_nodes[i] = count as i32;
            raw.style[i] = curve.style.code();
        }
        raw.strength = self.strength;
        raw.mode = self.mode.code();
        Ok(bytemuck::bytes_of(&raw).to_vec())
    }

    /// Decode a version 4 blob.
    ///
    /// Enum codes and node counts are checked here; node coordinates are
    /// validated when the curves are built.
    pub fn from_blob(blob: &[u8]) -> ZonesResult<Self> {
        let raw: RawParams = read_raw(blob, CURRENT_VERSION)?;
        let selector = channel_from_code(raw.channel)?;
        let mode = Mode::from_code(raw.mode).ok_or(ZonesError::InvalidField {
            field: "mode",
            value: raw.mode,
        })?;

        let mut curves: [CurveParams; 3] = Default::default();
        for (i, curve) in curves.iter_mut().enumerate() {
            let count = raw.num_nodes[i];
            if !(0..=MAX_NODES as i32).contains(&count) {
                return Err(ZonesError::InvalidField {
                    field: "num_nodes",
                    value: count,
                });
            }
            curve.style =
                InterpolationStyle::from_code(raw.style[i]).ok_or(ZonesError::InvalidField {
                    field: "style",
                    value: raw.style[i],
                })?;
            curve.nodes = raw.nodes[i][..count as usize]
                .iter()
                .map(|&[x, y]| ControlPoint::new(x, y))
                .collect();
        }

        Ok(Self {
            selector,
            curves,
            strength: raw.strength,
            mode,
        })
    }
}

/// Load a stored parameter blob of any known version.
///
/// Version 4 is decoded directly; versions 1 to 3 go through
/// [`legacy::migrate`].
pub fn load_params(blob: &[u8], version: i32) -> ZonesResult<ColorZonesParams> {
    debug!(version, len = blob.len(), "loading parameters");
    match version {
        CURRENT_VERSION => ColorZonesParams::from_blob(blob),
        1..=3 => legacy::migrate(blob, version, CURRENT_VERSION),
        old => Err(ZonesError::UnsupportedLegacyVersion {
            old,
            new: CURRENT_VERSION,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited() -> ColorZonesParams {
        let mut p = ColorZonesParams {
            selector: Channel::Lightness,
            strength: 75.0,
            mode: Mode::Classic,
            ..Default::default()
        };
        p.add_node(Channel::Chroma, 0.3, 0.8);
        p.add_node(Channel::Chroma, 0.6, 0.1);
        p.curve_mut(Channel::Hue).style = InterpolationStyle::CubicSpline;
        p.curve_mut(Channel::Lightness).style = InterpolationStyle::CentripetalCatmullRom;
        p
    }

    #[test]
    fn blob_has_fixed_size() {
        let blob = ColorZonesParams::default().to_blob().unwrap();
        assert_eq!(blob.len(), PARAMS_SIZE);
    }

    #[test]
    fn blob_roundtrip() {
        let p = edited();
        let back = ColorZonesParams::from_blob(&p.to_blob().unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn load_params_dispatches_current_version() {
        let p = edited();
        let back = load_params(&p.to_blob().unwrap(), 4).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn truncated_blob_is_malformed() {
        let blob = edited().to_blob().unwrap();
        let err = ColorZonesParams::from_blob(&blob[..100]).unwrap_err();
        assert!(matches!(
            err,
            ZonesError::MalformedBlob {
                version: 4,
                expected: 516,
                actual: 100
            }
        ));
    }

    #[test]
    fn bad_enum_codes_are_rejected() {
        let mut blob = ColorZonesParams::default().to_blob().unwrap();
        blob[..4].copy_from_slice(&7_i32.to_ne_bytes());
        assert!(matches!(
            ColorZonesParams::from_blob(&blob),
            Err(ZonesError::InvalidField {
                field: "channel",
                value: 7
            })
        ));

        let mut blob = ColorZonesParams::default().to_blob().unwrap();
        let mode_at = PARAMS_SIZE - 4;
        blob[mode_at..].copy_from_slice(&9_i32.to_ne_bytes());
        assert!(matches!(
            ColorZonesParams::from_blob(&blob),
            Err(ZonesError::InvalidField { field: "mode", .. })
        ));
    }

    #[test]
    fn node_count_out_of_range() {
        let mut blob = ColorZonesParams::default().to_blob().unwrap();
        let counts_at = 4 + 3 * MAX_NODES * 2 * 4;
        blob[counts_at..counts_at + 4].copy_from_slice(&21_i32.to_ne_bytes());
        assert!(matches!(
            ColorZonesParams::from_blob(&blob),
            Err(ZonesError::InvalidField {
                field: "num_nodes",
                value: 21
            })
        ));
    }

    #[test]
    fn too_many_nodes_cannot_be_encoded() {
        let mut p = ColorZonesParams::default();
        p.curve_mut(Channel::Hue).nodes = (0..21)
            .map(|i| ControlPoint::new(i as f32 / 20.0, 0.5))
            .collect();
        assert!(p.to_blob().is_err());
    }

    #[test]
    fn unknown_versions_are_unsupported() {
        for version in [0, 5, -1] {
            let err = load_params(&[], version).unwrap_err();
            assert!(matches!(
                err,
                ZonesError::UnsupportedLegacyVersion { new: 4, .. }
            ));
        }
    }
}
