pub mod correlation;
pub mod peak;
pub mod shift;
pub mod surface;

pub use correlation::correlate;
pub use peak::{locate_peak, Peak};
pub use shift::{cyclic_shift, shift_image};
pub use surface::{render_surface, CorrelationSurface};

use crate::error::Result;
use crate::frame::LuminanceFrame;

/// Correlation surface and its peak for one candidate/reference pair.
#[derive(Clone, Debug)]
pub struct Registration {
    pub surface: CorrelationSurface,
    pub peak: Peak,
}

/// Register `candidate` against `reference`: correlate, then locate the peak.
pub fn register(reference: &LuminanceFrame, candidate: &LuminanceFrame) -> Result<Registration> {
    let surface = correlate(reference, candidate)?;
    let peak = locate_peak(&surface);
    Ok(Registration { surface, peak })
}
