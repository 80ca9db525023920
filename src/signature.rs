//! Signature image preparation.
//!
//! Decodes a raster image (PNG or JPEG), bounds it to the configured pixel
//! box, flattens transparency onto an opaque white background and re-encodes
//! it as JPEG. The resulting [`SignatureAsset`] carries everything the
//! writer needs; downstream consumers never re-decode.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use log::debug;

use crate::config::SignatureConfig;
use crate::error::{Error, Result};

/// Points per pixel at the conventional 96 DPI screen resolution.
const PX_TO_PT: f32 = 72.0 / 96.0;

/// A prepared signature image, immutable once produced.
///
/// At most one asset exists per document; it is owned by the document
/// builder and embedded verbatim by the writer.
#[derive(Debug, Clone)]
pub struct SignatureAsset {
    /// Width of the encoded image in pixels.
    pub px_width: u32,
    /// Height of the encoded image in pixels.
    pub px_height: u32,
    /// Placement width in points.
    pub pt_width: f32,
    /// Placement height in points.
    pub pt_height: f32,
    /// JPEG-encoded pixel data.
    pub jpeg_data: Vec<u8>,
}

impl SignatureAsset {
    /// Decode, bound, flatten and re-encode a raw image.
    ///
    /// The image is scaled by `min(1, max_w/width, max_h/height)` so it fits
    /// the configured box without upscaling, preserving aspect ratio. Any
    /// alpha channel is composited over white, since the embedded JPEG
    /// payload carries no transparency.
    pub fn from_bytes(data: &[u8], config: &SignatureConfig) -> Result<Self> {
        let decoded = image::load_from_memory(data)
            .map_err(|e| Error::Image(format!("decode failed: {e}")))?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Image("image has a zero dimension".to_string()));
        }

        let scale = 1.0_f32
            .min(config.max_width_px as f32 / width as f32)
            .min(config.max_height_px as f32 / height as f32);
        let px_width = ((width as f32 * scale).round() as u32).max(1);
        let px_height = ((height as f32 * scale).round() as u32).max(1);
        debug!(
            "signature image {}x{} scaled by {:.3} to {}x{}",
            width, height, scale, px_width, px_height
        );

        let resized = if (px_width, px_height) == (width, height) {
            decoded
        } else {
            decoded.resize_exact(px_width, px_height, FilterType::Triangle)
        };

        // Composite over opaque white; the rasterization surface is a local
        // buffer, dropped on every exit path.
        let rgba = resized.to_rgba8();
        let mut flat = image::RgbImage::from_pixel(px_width, px_height, image::Rgb([255, 255, 255]));
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let alpha = pixel[3] as u32;
            let out = flat.get_pixel_mut(x, y);
            for channel in 0..3 {
                let src = pixel[channel] as u32;
                out[channel] = ((src * alpha + 255 * (255 - alpha)) / 255) as u8;
            }
        }

        let mut jpeg_data = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg_data, config.jpeg_quality)
            .encode(flat.as_raw(), px_width, px_height, image::ColorType::Rgb8)
            .map_err(|e| Error::Image(format!("encode failed: {e}")))?;
        debug!("signature re-encoded to {} JPEG bytes", jpeg_data.len());

        Ok(Self {
            px_width,
            px_height,
            pt_width: px_width as f32 * PX_TO_PT,
            pt_height: px_height as f32 * PX_TO_PT,
            jpeg_data,
        })
    }
}
