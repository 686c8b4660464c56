use image::{GrayImage, Luma};
use ndarray::Array2;
use num_complex::Complex;

/// Spatial-domain cross-correlation of a candidate against a reference.
/// The real part of each sample is the correlation strength.
#[derive(Clone, Debug)]
pub struct CorrelationSurface {
    /// Samples, row-major, shape = (height, width)
    pub data: Array2<Complex<f64>>,
}

impl CorrelationSurface {
    pub fn new(data: Array2<Complex<f64>>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Render `|re|` of a surface as an 8-bit grayscale image.
///
/// With `log_scale`, a sample maps to `log10(|re|) / log10(max) * 255`,
/// otherwise to `|re| / max * 255`, where `max` is the largest real part.
/// Zero samples, and every sample when the scale is not positive, are black.
pub fn render_surface(surface: &CorrelationSurface, log_scale: bool) -> GrayImage {
    let (h, w) = surface.data.dim();
    let max_re = surface
        .data
        .iter()
        .map(|c| c.re)
        .fold(f64::NEG_INFINITY, f64::max);

    let scale = if log_scale { max_re.log10() } else { max_re };
    let mut img = GrayImage::new(w as u32, h as u32);
    if !(scale.is_finite() && scale > 0.0) {
        return img;
    }

    for row in 0..h {
        for col in 0..w {
            let re = surface.data[[row, col]].re.abs();
            let val = if re == 0.0 {
                0.0
            } else if log_scale {
                re.log10() / scale * 255.0
            } else {
                re / scale * 255.0
            };
            img.put_pixel(col as u32, row as u32, Luma([val.clamp(0.0, 255.0) as u8]));
        }
    }

    img
}
