//! Encoded copies of the drawing surface.
//!
//! A [`Snapshot`] carries both the `data:` URL handed to the host and the
//! raster it was encoded from. Undo restores from the raster, so the
//! surface comes back pixel-for-pixel even where PNG's unpremultiplied
//! storage would round semi-transparent edges.

use crate::error::{SnapshotError, SnapshotResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use data_url::DataUrl;
use tiny_skia::{ColorU8, Pixmap};

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Clone, PartialEq)]
pub struct Snapshot {
    data_url: String,
    raster: Pixmap,
}

// Custom Debug implementation, the raster and URL are too large to print
impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.raster.width())
            .field("height", &self.raster.height())
            .field("data_url_len", &self.data_url.len())
            .finish()
    }
}

impl Snapshot {
    /// Encode the given raster as a PNG data URL
    pub fn capture(raster: &Pixmap) -> SnapshotResult<Self> {
        let png = raster
            .encode_png()
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
        Ok(Self {
            data_url: format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)),
            raster: raster.clone(),
        })
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn raster(&self) -> &Pixmap {
        &self.raster
    }
}

/// Decode the payload of a `data:` URL
pub fn decode_data_url(url: &str) -> SnapshotResult<Vec<u8>> {
    let data_url =
        DataUrl::process(url).map_err(|e| SnapshotError::DataUrl(format!("{:?}", e)))?;
    let (bytes, _fragment) = data_url
        .decode_to_vec()
        .map_err(|e| SnapshotError::DataUrl(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Decode an encoded image (any format the `image` crate knows) into a raster
pub fn decode_image_bytes(bytes: &[u8]) -> SnapshotResult<Pixmap> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(SnapshotError::InvalidDimensions { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}

/// Decode a host-supplied image, given as a `data:` URL
pub fn decode_image(source: &str) -> SnapshotResult<Pixmap> {
    let bytes = decode_data_url(source)?;
    decode_image_bytes(&bytes)
}
