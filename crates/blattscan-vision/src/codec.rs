// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec collaborator — decode, encode, and file I/O for images, kept out of
// the algorithmic pipeline. The pipeline itself never touches bytes or paths.

use blattscan_core::error::{Result, ScanError};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Decoded image wrapper providing encode/save, the boundary between the
/// pipeline core and whatever supplies or persists image bytes.
pub struct ImageCodec {
    /// The decoded image.
    image: DynamicImage,
}

impl ImageCodec {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(data)
            .map_err(|err| ScanError::Decode(err.to_string()))?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image })
    }

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let image = image::open(path.as_ref()).map_err(|err| {
            ScanError::Decode(format!("{}: {}", path.as_ref().display(), err))
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the codec and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| ScanError::Encode(err.to_string()))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            ScanError::Encode(format!("{}: {}", path.as_ref().display(), err))
        })
    }
}

/// Resize an image so its height equals `target_height`, preserving aspect
/// ratio, and return the new image together with the scale ratio
/// (original height / target height) needed to project detected coordinates
/// back to full resolution.
pub fn resize_to_height(image: &DynamicImage, target_height: u32) -> (DynamicImage, f32) {
    let (width, height) = (image.width(), image.height());
    let ratio = height as f32 / target_height as f32;
    let target_width = ((width as f32 / ratio).round() as u32).max(1);

    let resized = image.resize_exact(
        target_width,
        target_height,
        image::imageops::FilterType::Lanczos3,
    );
    debug!(
        from_w = width,
        from_h = height,
        to_w = target_width,
        to_h = target_height,
        ratio,
        "Working copy resized"
    );
    (resized, ratio)
}
