use anyhow::Result;

use crate::image_buf::LabBuf;

/// A single step in a host's processing pipeline.
///
/// Modules own their committed parameters; a pass only sees pixels.
pub trait ProcessingModule: Send + Sync {
    fn name(&self) -> &str;
    fn process_cpu(&self, input: LabBuf) -> Result<LabBuf>;
}
