//! Decode, adjust, and watermark a photo, producing PNG bytes.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::ImagingError;

/// Brightness multiplier applied when darkening is enabled.
const DARKEN_BRIGHTNESS: f32 = 0.7;

/// Saturation multiplier applied when darkening is enabled.
const DARKEN_SATURATION: f32 = 0.5;

/// Knobs for a single compositing run.
#[derive(Debug, Clone)]
pub struct CompositeOptions {
    /// Minimum size the base photo must reach before the overlay is
    /// applied. The smaller dimension is anchored to this value when the
    /// photo is too small.
    pub min_width: u32,
    /// Reduce brightness and saturation of the base before resizing.
    pub darken: bool,
}

/// The composited image and its final dimensions.
#[derive(Debug, Clone)]
pub struct CompositeOutput {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Composite `overlay` onto `base`.
///
/// Steps, in order: decode base, optional darken, conditional upscale
/// (aspect ratio preserved, Lanczos3), centered alpha blend of the
/// overlay, PNG encode. The input buffers are never modified.
pub fn composite(
    base: &[u8],
    overlay: &[u8],
    options: &CompositeOptions,
) -> Result<CompositeOutput, ImagingError> {
    let mut photo = image::load_from_memory(base)
        .map_err(|err| ImagingError::Decode(format!("base photo: {err}")))?
        .to_rgba8();

    if options.darken {
        darken_in_place(&mut photo);
    }

    if let Some((width, height)) = upscale_target(photo.width(), photo.height(), options.min_width)
    {
        photo = imageops::resize(&photo, width, height, FilterType::Lanczos3);
    }

    let watermark = image::load_from_memory(overlay)
        .map_err(|err| ImagingError::Decode(format!("overlay: {err}")))?
        .to_rgba8();

    // Default anchoring: centered. An overlay larger than the photo is
    // clipped at the edges.
    let x = (i64::from(photo.width()) - i64::from(watermark.width())) / 2;
    let y = (i64::from(photo.height()) - i64::from(watermark.height())) / 2;
    imageops::overlay(&mut photo, &watermark, x, y);

    let (width, height) = (photo.width(), photo.height());
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(photo)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| ImagingError::Encode(err.to_string()))?;

    Ok(CompositeOutput {
        bytes,
        width,
        height,
    })
}

/// Target dimensions when the photo is under the minimum size, or `None`
/// when no resize is needed.
///
/// The smaller of width/height is the anchor: it is scaled up to
/// `min_width` and the other dimension follows the aspect ratio. A photo
/// whose smaller dimension already meets the threshold is left alone.
fn upscale_target(width: u32, height: u32, min_width: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 || width.min(height) >= min_width {
        return None;
    }

    let scaled = |other: u32, anchor: u32| -> u32 {
        let value = (u64::from(other) * u64::from(min_width)) as f64 / f64::from(anchor);
        (value.round() as u32).max(1)
    };

    if width <= height {
        Some((min_width, scaled(height, width)))
    } else {
        Some((scaled(width, height), min_width))
    }
}

/// Reduce brightness and saturation by the fixed factors, per pixel.
///
/// Saturation is scaled around the pixel's luma, then the whole pixel is
/// dimmed. Alpha is untouched.
fn darken_in_place(photo: &mut RgbaImage) {
    for pixel in photo.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);

        let adjust = |channel: u8| -> u8 {
            let desaturated = luma + (f32::from(channel) - luma) * DARKEN_SATURATION;
            (desaturated * DARKEN_BRIGHTNESS).clamp(0.0, 255.0) as u8
        };

        *pixel = Rgba([adjust(r), adjust(g), adjust(b), a]);
    }
}
