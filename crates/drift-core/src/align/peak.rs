use num_complex::Complex;
use num_traits::Zero;

use crate::frame::ShiftVector;

use super::surface::CorrelationSurface;

/// The strongest sample of a correlation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Grid position: `dx` is the column, `dy` the row.
    pub shift: ShiftVector,
    pub value: Complex<f64>,
}

/// Find the sample with the greatest real part.
///
/// Only the real part is compared. Samples are scanned in row-major order
/// and a later sample must be strictly greater to win, so the first maximum
/// is kept.
pub fn locate_peak(surface: &CorrelationSurface) -> Peak {
    let (h, w) = surface.data.dim();
    let mut best_row = 0;
    let mut best_col = 0;
    let mut best_val: Option<Complex<f64>> = None;

    for row in 0..h {
        for col in 0..w {
            let val = surface.data[[row, col]];
            let better = match best_val {
                Some(best) => val.re > best.re,
                None => true,
            };
            if better {
                best_val = Some(val);
                best_row = row;
                best_col = col;
            }
        }
    }

    Peak {
        shift: ShiftVector::new(best_col as i64, best_row as i64),
        value: best_val.unwrap_or_else(Complex::zero),
    }
}
