use ndarray::Array2;
use num_complex::Complex;
use std::path::PathBuf;

/// A single-channel luminance image.
/// Samples are f64 in [0.0, 255.0].
#[derive(Clone, Debug)]
pub struct LuminanceFrame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f64>,
}

impl LuminanceFrame {
    pub fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// (width, height), the order used in error messages.
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Sum of squared samples; the zero-shift autocorrelation peak.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }
}

/// Integer translation of a candidate relative to its reference.
///
/// `dx` indexes columns and `dy` rows of the correlation surface. Aligning
/// the candidate moves its content by `(-dx, -dy)` with wraparound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShiftVector {
    pub dx: i64,
    pub dy: i64,
}

impl ShiftVector {
    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Component-wise sum, reduced modulo the image size.
    pub fn compose(self, other: ShiftVector, width: usize, height: usize) -> ShiftVector {
        ShiftVector {
            dx: (self.dx + other.dx).rem_euclid(width.max(1) as i64),
            dy: (self.dy + other.dy).rem_euclid(height.max(1) as i64),
        }
    }

    /// Map each component to its smallest-magnitude cyclic equivalent,
    /// e.g. `dx = width - 1` becomes `-1`.
    pub fn signed(self, width: usize, height: usize) -> ShiftVector {
        fn wrap(v: i64, n: usize) -> i64 {
            let n = n.max(1) as i64;
            let v = v.rem_euclid(n);
            if v > n / 2 {
                v - n
            } else {
                v
            }
        }
        ShiftVector {
            dx: wrap(self.dx, width),
            dy: wrap(self.dy, height),
        }
    }
}

/// Outcome of registering one candidate file.
#[derive(Clone, Debug)]
pub struct RegistrationRecord {
    /// Candidate path as discovered.
    pub source: PathBuf,
    /// Correlation surface value at the peak.
    pub peak: Complex<f64>,
    pub shift: ShiftVector,
}
