use crate::error::{ZonesError, ZonesResult};

/// Floats per pixel: L, a, b, alpha.
pub const CHANNELS: usize = 4;

/// Region of interest handed in by the host. Input and output regions of
/// this stage always match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    pub width: u32,
    pub height: u32,
}

impl Roi {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Floats a buffer covering this region must hold.
    pub fn len(&self) -> usize {
        self.pixel_count() * CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub(crate) fn check(&self, buf: &[f32]) -> ZonesResult<()> {
        if buf.len() != self.len() {
            return Err(ZonesError::BufferSize {
                expected: self.len(),
                actual: buf.len(),
            });
        }
        Ok(())
    }
}

/// Lab f32 image tile.
///
/// Pixels are interleaved `[L, a, b, alpha, L, a, b, alpha, ...]`, with L in
/// roughly `[0, 100]` and a/b the opponent chroma axes.
#[derive(Clone, Debug, PartialEq)]
pub struct LabBuf {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl LabBuf {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; Roi::new(width, height).len()],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> ZonesResult<Self> {
        Roi::new(width, height).check(&data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Tile filled with one Lab color, alpha 1.
    pub fn uniform(width: u32, height: u32, lab: [f32; 3]) -> Self {
        let n = Roi::new(width, height).pixel_count();
        let mut data = Vec::with_capacity(n * CHANNELS);
        for _ in 0..n {
            data.extend_from_slice(&[lab[0], lab[1], lab[2], 1.0]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn roi(&self) -> Roi {
        Roi::new(self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.roi().pixel_count()
    }

    /// Lab and alpha of pixel `index`, or `None` past the end.
    pub fn pixel(&self, index: usize) -> Option<[f32; 4]> {
        let start = index.checked_mul(CHANNELS)?;
        let p = self.data.get(start..start.checked_add(CHANNELS)?)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}
