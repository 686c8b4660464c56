use ndarray::{Array2, Zip};
use num_complex::Complex;
use num_traits::Zero;
use rustfft::{FftDirection, FftPlanner};
use tracing::trace;

use crate::error::{DriftError, Result};
use crate::frame::LuminanceFrame;

use super::surface::CorrelationSurface;

/// Compute the cross-correlation surface of `candidate` against `reference`.
///
/// Each image is taken to its oriented spectrum with a row transform, a
/// quarter turn and a second row transform. The product
/// `conj(ref) * candidate` is brought back with an inverse row transform,
/// three quarter turns and a second inverse row transform, which restores the
/// input orientation. Sample `[y, x]` of the result equals
/// `sum over n of ref[n] * candidate[n + (y, x)]` with cyclic indexing, so a
/// candidate displaced by `(x, y)` peaks at `[y, x]`.
pub fn correlate(
    reference: &LuminanceFrame,
    candidate: &LuminanceFrame,
) -> Result<CorrelationSurface> {
    if reference.size() != candidate.size() {
        return Err(DriftError::DimensionMismatch {
            reference: reference.size(),
            candidate: candidate.size(),
        });
    }
    let (w, h) = reference.size();
    if w == 0 || h == 0 {
        return Err(DriftError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let mut planner = FftPlanner::new();
    let ref_spectrum = oriented_spectrum(&reference.data, &mut planner);
    let mut cross = oriented_spectrum(&candidate.data, &mut planner);

    // Cross-power product, written in place over the candidate spectrum
    Zip::from(&mut cross)
        .and(&ref_spectrum)
        .for_each(|c, r| *c = r.conj() * *c);

    fft_rows(&mut cross, &mut planner, FftDirection::Inverse);
    let mut surface = rot90_turns(&cross, 3);
    fft_rows(&mut surface, &mut planner, FftDirection::Inverse);

    trace!(width = w, height = h, "Correlation surface computed");
    Ok(CorrelationSurface::new(surface))
}

/// Forward row transform, quarter turn, forward row transform.
/// Output shape is (width, height) of the input.
fn oriented_spectrum(data: &Array2<f64>, planner: &mut FftPlanner<f64>) -> Array2<Complex<f64>> {
    let mut work = data.mapv(|v| Complex::new(v, 0.0));
    fft_rows(&mut work, planner, FftDirection::Forward);
    let mut work = rot90(&work);
    fft_rows(&mut work, planner, FftDirection::Forward);
    work
}

/// 1D FFT of every row (last axis). Forward is unnormalized; inverse is
/// scaled by 1/N of the row length.
fn fft_rows(
    data: &mut Array2<Complex<f64>>,
    planner: &mut FftPlanner<f64>,
    direction: FftDirection,
) {
    let w = data.ncols();
    let fft = planner.plan_fft(w, direction);
    let scale = match direction {
        FftDirection::Forward => 1.0,
        FftDirection::Inverse => 1.0 / w as f64,
    };
    let mut scratch = vec![Complex::zero(); fft.get_inplace_scratch_len()];

    for mut row in data.rows_mut() {
        let mut row_data: Vec<Complex<f64>> = row.to_vec();
        fft.process_with_scratch(&mut row_data, &mut scratch);
        for (dst, src) in row.iter_mut().zip(row_data) {
            *dst = src * scale;
        }
    }
}

/// One counter-clockwise quarter turn: `out[i, j] = in[j, w - 1 - i]`.
fn rot90<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((w, h), |(i, j)| data[[j, w - 1 - i]].clone())
}

fn rot90_turns<T: Clone>(data: &Array2<T>, turns: usize) -> Array2<T> {
    let mut out = data.clone();
    for _ in 0..turns % 4 {
        out = rot90(&out);
    }
    out
}
