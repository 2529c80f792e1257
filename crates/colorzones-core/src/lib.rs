//! Color zones: lightness, chroma and hue adjustments driven by curves over a
//! selector channel.
//!
//! A [`ColorZonesParams`] holds three curves (one per LCh channel) whose x
//! axis is the selector. Committing parameters bakes them into
//! [`BakedTables`]; each pass then runs the Classic or Smooth kernel over a
//! Lab tile. Stored parameters of every historical layout load through
//! [`load_params`].

pub mod blob;
pub mod color;
pub mod config;
pub mod edit;
pub mod error;
pub mod image_buf;
pub mod legacy;
pub mod params;
pub mod pipeline;
pub mod presets;

pub use blob::{PARAMS_SIZE, load_params};
pub use config::StageConfig;
pub use edit::NodeMove;
pub use error::{ZonesError, ZonesResult};
pub use image_buf::{LabBuf, Roi};
pub use legacy::{LegacyParams, migrate};
pub use params::{CURRENT_VERSION, Channel, ColorZonesParams, CurveParams, Mode};
pub use pipeline::{BakedTables, ColorZonesStage, ProcessingModule, transform};

pub use colorzones_curve::{ControlPoint, InterpolationStyle};
