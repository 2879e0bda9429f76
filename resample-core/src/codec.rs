use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::foundation::{
    core::Image,
    error::{ResampleError, ResampleResult},
};

/// Decode encoded image bytes into 3-channel float samples in `[0, 1]`.
pub fn decode_image(bytes: &[u8]) -> ResampleResult<Image> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ResampleError::codec(format!("decode image from memory: {e}")))?;
    let rgb = dyn_img.to_rgb32f();
    let (width, height) = rgb.dimensions();
    Image::from_raw(width, height, rgb.into_raw())
}

/// Encode `img` as `format`.
///
/// OpenEXR and Radiance HDR keep f32 samples, PNG and TIFF are written at 16 bits per channel,
/// everything else at 8 bits. Integer conversions clamp to `[0, 1]`.
pub fn encode_image(img: &Image, format: ImageFormat) -> ResampleResult<Vec<u8>> {
    let rgb = image::Rgb32FImage::from_raw(img.width(), img.height(), img.data().to_vec())
        .ok_or_else(|| ResampleError::codec("image buffer does not match its dimensions"))?;
    let float = DynamicImage::ImageRgb32F(rgb);
    let encoded = match format {
        ImageFormat::OpenExr | ImageFormat::Hdr => float,
        ImageFormat::Png | ImageFormat::Tiff => DynamicImage::ImageRgb16(float.to_rgb16()),
        _ => DynamicImage::ImageRgb8(float.to_rgb8()),
    };

    let mut buf = Vec::new();
    encoded
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| ResampleError::codec(format!("encode {format:?}: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../tests/unit/codec.rs"]
mod tests;
