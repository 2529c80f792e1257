pub mod module;
pub mod stage;
pub mod tables;
pub mod transform;

pub use module::ProcessingModule;
pub use stage::{ColorZonesStage, Commit};
pub use tables::BakedTables;
pub use transform::{Classic, PixelTransform, Smooth, kernel, transform, transform_with};
