use image::{DynamicImage, ImageBuffer, Pixel};

use crate::frame::ShiftVector;

/// Translate an image by `(-shift.dx, -shift.dy)` with wraparound.
///
/// `out(x, y) = in((x + dx) mod w, (y + dy) mod h)`. Pixels are copied, never
/// interpolated.
pub fn cyclic_shift<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    shift: ShiftVector,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }
    let dx = shift.dx.rem_euclid(w as i64) as u32;
    let dy = shift.dy.rem_euclid(h as i64) as u32;

    ImageBuffer::from_fn(w, h, |x, y| *image.get_pixel((x + dx) % w, (y + dy) % h))
}

/// Apply [`cyclic_shift`] to a decoded candidate.
///
/// 8-bit gray and RGB images keep their pixel type; anything else is
/// converted to 8-bit RGB so the result can be written as JPEG.
pub fn shift_image(image: &DynamicImage, shift: ShiftVector) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(cyclic_shift(buf, shift)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(cyclic_shift(buf, shift)),
        other => DynamicImage::ImageRgb8(cyclic_shift(&other.to_rgb8(), shift)),
    }
}
