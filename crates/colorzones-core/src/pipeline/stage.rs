use anyhow::Result;
use tracing::{debug, info, warn};

use super::module::ProcessingModule;
use super::tables::BakedTables;
use super::transform::transform_with;
use crate::config::StageConfig;
use crate::error::ZonesResult;
use crate::image_buf::{LabBuf, Roi};
use crate::params::ColorZonesParams;

/// What a successful [`ColorZonesStage::commit`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// Tables were rebuilt from the new parameters.
    Rebaked,
    /// The parameters match the current tables byte for byte.
    Unchanged,
}

/// The color zones operator as a pipeline stage.
///
/// Holds the committed parameters and the tables baked from them. Commits
/// take `&mut self` and passes take `&self`, so a pass never sees tables
/// that are being rebuilt.
pub struct ColorZonesStage {
    params: ColorZonesParams,
    tables: BakedTables,
    fingerprint: Option<blake3::Hash>,
    config: StageConfig,
}

fn fingerprint(params: &ColorZonesParams) -> ZonesResult<blake3::Hash> {
    Ok(blake3::hash(&params.to_blob()?))
}

impl ColorZonesStage {
    /// A stage holding the default (neutral) parameters.
    pub fn new(config: StageConfig) -> Self {
        let params = ColorZonesParams::default();
        Self {
            tables: BakedTables::identity(params.selector),
            fingerprint: fingerprint(&params).ok(),
            params,
            config,
        }
    }

    /// Replace the parameters and rebake the tables.
    ///
    /// Curves are validated before the fingerprint, so a bad curve always
    /// surfaces as [`ZonesError::InvalidCurve`](crate::error::ZonesError::InvalidCurve).
    /// On error the previous parameters and tables stay in place.
    pub fn commit(&mut self, params: ColorZonesParams) -> ZonesResult<Commit> {
        let result = params
            .build_curves()
            .and_then(|_| fingerprint(&params))
            .and_then(|hash| {
                if self.fingerprint == Some(hash) {
                    return Ok(None);
                }
                BakedTables::bake(&params).map(|tables| Some((hash, tables)))
            });

        match result {
            Ok(None) => {
                debug!("color zones parameters unchanged, keeping tables");
                Ok(Commit::Unchanged)
            }
            Ok(Some((hash, tables))) => {
                info!(
                    selector = ?params.selector,
                    mode = ?params.mode,
                    strength = params.strength,
                    "committed color zones parameters"
                );
                self.tables = tables;
                self.fingerprint = Some(hash);
                self.params = params;
                Ok(Commit::Rebaked)
            }
            Err(e) => {
                warn!(error = %e, "rejected color zones parameters, keeping previous tables");
                Err(e)
            }
        }
    }

    /// Run one pass over an interleaved Lab tile.
    pub fn process(&self, input: &[f32], output: &mut [f32], roi: Roi) -> ZonesResult<()> {
        transform_with(input, output, roi, &self.tables, self.params.mode, &self.config)
    }

    pub fn params(&self) -> &ColorZonesParams {
        &self.params
    }

    pub fn tables(&self) -> &BakedTables {
        &self.tables
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StageConfig) {
        self.config = config;
    }
}

impl Default for ColorZonesStage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

impl ProcessingModule for ColorZonesStage {
    fn name(&self) -> &str {
        "color_zones"
    }

    fn process_cpu(&self, input: LabBuf) -> Result<LabBuf> {
        if self.tables.is_neutral() {
            return Ok(input);
        }
        let mut output = LabBuf::new(input.width, input.height);
        self.process(&input.data, &mut output.data, input.roi())?;
        Ok(output)
    }
}
