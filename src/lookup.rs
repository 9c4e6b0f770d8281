//! Column lookup texture.
//!
//! A 256x1 RGBA8 strip whose red channel holds the flute (column) index for
//! each horizontal sample. The shader reads it with nearest filtering, so
//! every pixel inside a flute sees the same index and therefore the same
//! distortion offset.

use crate::config::DEFAULT_COLUMNS;

/// Samples along the horizontal axis.
pub const LOOKUP_SIZE: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTexture {
    columns: u32,
    data: Vec<u8>,
}

impl LookupTexture {
    /// Bucket `LOOKUP_SIZE` samples into `columns` equal-width bins.
    ///
    /// Counts below one fall back to the default; counts above the sample
    /// count clamp to it.
    pub fn new(columns: i64) -> Self {
        let columns = effective_columns(columns);
        let mut data = vec![0u8; LOOKUP_SIZE * 4];
        for (x, texel) in data.chunks_exact_mut(4).enumerate() {
            texel[0] = column_for_sample(x, columns);
            texel[3] = 255;
        }
        Self { columns, data }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn width(&self) -> u32 {
        LOOKUP_SIZE as u32
    }

    pub fn height(&self) -> u32 {
        1
    }

    /// Raw RGBA bytes, row-major, ready for `texImage2D`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Column index stored at sample `x`.
    pub fn column(&self, x: usize) -> u8 {
        self.data[x.min(LOOKUP_SIZE - 1) * 4]
    }

    /// Nearest-filtered, edge-clamped read at normalized coordinate `u`,
    /// matching what the fragment stage sees.
    pub fn sample(&self, u: f32) -> u8 {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let x = (u * LOOKUP_SIZE as f32).floor() as usize;
        self.column(x)
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|texel| texel[0])
    }
}

fn effective_columns(requested: i64) -> u32 {
    if requested < 1 {
        return DEFAULT_COLUMNS as u32;
    }
    requested.min(LOOKUP_SIZE as i64) as u32
}

fn column_for_sample(x: usize, columns: u32) -> u8 {
    // columns <= 256 and x < 256 keep this below 256.
    ((x * columns as usize) / LOOKUP_SIZE) as u8
}
