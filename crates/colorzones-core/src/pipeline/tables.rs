use std::time::Instant;

use colorzones_curve::lut::{self, LUT_RES};
use tracing::debug;

use crate::error::ZonesResult;
use crate::params::{Channel, ColorZonesParams};

/// The three dense tables a pass reads, baked from one parameter set.
///
/// Tables are indexed by the selector value in `[0, 1]` and hold the curve
/// output with strength already applied. A commit replaces the whole set.
#[derive(Clone, Debug, PartialEq)]
pub struct BakedTables {
    luts: [Vec<f32>; 3],
    selector: Channel,
    neutral: bool,
}

impl BakedTables {
    /// Build all three curves and bake each at [`LUT_RES`] entries.
    ///
    /// An invalid curve fails the whole bake before any table is produced.
    /// Parameters with only neutral nodes skip sampling.
    pub fn bake(params: &ColorZonesParams) -> ZonesResult<Self> {
        let t0 = Instant::now();
        let curves = params.build_curves()?;
        if params.is_identity() {
            debug!(selector = ?params.selector, "neutral color zones parameters, identity tables");
            return Ok(Self::identity(params.selector));
        }
        let strength = params.clamped_strength();
        let luts = curves.map(|curve| lut::bake(&curve, strength, LUT_RES));
        let neutral = luts.iter().all(|t| t.iter().all(|&v| v == 0.5));
        debug!(
            elapsed_ms = t0.elapsed().as_millis(),
            selector = ?params.selector,
            neutral,
            "baked color zones tables"
        );
        Ok(Self {
            luts,
            selector: params.selector,
            neutral,
        })
    }

    /// Tables that leave every pixel unchanged. Equal to what the default
    /// parameters bake to.
    pub fn identity(selector: Channel) -> Self {
        Self {
            luts: std::array::from_fn(|_| vec![0.5; LUT_RES]),
            selector,
            neutral: true,
        }
    }

    pub fn lut(&self, channel: Channel) -> &[f32] {
        &self.luts[channel.index()]
    }

    pub fn selector(&self) -> Channel {
        self.selector
    }

    /// Every entry of every table is exactly 0.5.
    pub fn is_neutral(&self) -> bool {
        self.neutral
    }

    /// Interpolated read of one channel's table at `select`.
    #[inline]
    pub fn lookup(&self, channel: Channel, select: f32) -> f32 {
        lut::lookup(self.lut(channel), select)
    }
}
