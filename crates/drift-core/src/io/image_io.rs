use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageFormat};
use ndarray::Array2;

use crate::consts::{LUMINANCE_ROUNDING, LUMINANCE_WEIGHTS};
use crate::error::{DriftError, Result};
use crate::frame::LuminanceFrame;

/// Decode an image file as-is, keeping its color type.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Convert a decoded image to 8-bit luminance samples.
///
/// Gray sources are copied through; everything else goes via 8-bit RGB with
/// BT.601 weights in 16-bit fixed point.
pub fn luminance(img: &DynamicImage) -> LuminanceFrame {
    let (w, h) = (img.width() as usize, img.height() as usize);

    let data = match img {
        DynamicImage::ImageLuma8(gray) => {
            Array2::from_shape_fn((h, w), |(row, col)| {
                gray.get_pixel(col as u32, row as u32).0[0] as f64
            })
        }
        other => {
            let rgb = other.to_rgb8();
            let [wr, wg, wb] = LUMINANCE_WEIGHTS;
            Array2::from_shape_fn((h, w), |(row, col)| {
                let [r, g, b] = rgb.get_pixel(col as u32, row as u32).0;
                let weighted = wr * r as u32 + wg * g as u32 + wb * b as u32;
                ((weighted + LUMINANCE_ROUNDING) >> 16) as f64
            })
        }
    };

    LuminanceFrame::new(data)
}

/// Load an image file straight into a luminance frame.
pub fn load_luminance(path: &Path) -> Result<LuminanceFrame> {
    Ok(luminance(&load_image(path)?))
}

/// Save an image as baseline JPEG with the given quality (1-100).
/// Color types JPEG cannot carry are converted to 8-bit RGB.
pub fn save_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(DriftError::Config(format!(
            "JPEG quality must be in 1..=100, got {quality}"
        )));
    }

    let writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {
            img.write_with_encoder(encoder)?
        }
        other => DynamicImage::ImageRgb8(other.to_rgb8()).write_with_encoder(encoder)?,
    }
    Ok(())
}

/// Save a grayscale image as 8-bit PNG.
pub fn save_png(img: &GrayImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
