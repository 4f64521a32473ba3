//! Frame preprocessing: depth thresholding and spatial downsampling.
//!
//! The raw sensor frame is reduced before it is handed to the skeleton
//! tracker: samples outside the configured depth band are zeroed ("no
//! sample") and the resolution is divided by the tracker's dimension factor.

use crate::error::{Error, Result};

/// A thresholded, downsampled depth frame ready for the skeleton tracker
#[derive(Debug, Clone)]
pub struct ReducedFrame {
    data: Vec<u16>,
    width: usize,
    height: usize,
    original_width: usize,
    original_height: usize,
    factor: usize,
}

impl ReducedFrame {
    /// Reduced depth samples in row-major order
    #[must_use]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Reduced frame width
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Reduced frame height
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Downsampling factor this frame was reduced by
    #[must_use]
    pub const fn factor(&self) -> usize {
        self.factor
    }
}

/// Threshold and downsample a raw depth frame.
///
/// Cell `(i, j)` of the result is the raw sample at `(i * factor, j * factor)`
/// when that sample lies in `[threshold_begin, threshold_end]` (inclusive on
/// both ends), and 0 otherwise. The reduced dimensions are
/// `(width / factor, height / factor)` with flooring division. The input
/// buffer is never mutated.
///
/// # Errors
///
/// Returns `Error::InvalidInput` when the factor is zero or the buffer does
/// not match the given dimensions.
pub fn reduce_frame(
    buffer: &[u16],
    width: usize,
    height: usize,
    factor: usize,
    threshold_begin: u16,
    threshold_end: u16,
) -> Result<ReducedFrame> {
    if factor == 0 {
        return Err(Error::InvalidInput(
            "dimension factor must be greater than 0".to_string(),
        ));
    }
    if buffer.len() != width * height {
        return Err(Error::InvalidInput(format!(
            "buffer length {} does not match {}x{} frame",
            buffer.len(),
            width,
            height
        )));
    }

    let reduced_width = width / factor;
    let reduced_height = height / factor;
    let mut data = vec![0u16; reduced_width * reduced_height];

    for j in 0..reduced_height {
        for i in 0..reduced_width {
            let value = buffer[j * factor * width + i * factor];
            if value >= threshold_begin && value <= threshold_end {
                data[j * reduced_width + i] = value;
            }
        }
    }

    Ok(ReducedFrame {
        data,
        width: reduced_width,
        height: reduced_height,
        original_width: width,
        original_height: height,
        factor,
    })
}

/// Build a full-resolution RGB visualization of a reduced frame.
///
/// The buffer is white everywhere except for a black pixel at the original
/// position of every reduced cell that still holds a sample. Intended for a
/// front end to display the thresholded point cloud.
#[must_use]
pub fn grayscale_overlay(frame: &ReducedFrame) -> Vec<u8> {
    let size = frame.original_width * frame.original_height * 3;
    let mut overlay = vec![255u8; size];

    for j in 0..frame.height {
        for i in 0..frame.width {
            if frame.data[j * frame.width + i] != 0 {
                let index = (j * frame.factor * frame.original_width + i * frame.factor) * 3;
                overlay[index] = 0;
                overlay[index + 1] = 0;
                overlay[index + 2] = 0;
            }
        }
    }

    overlay
}
