use num_complex::Complex64;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TmmError {
    #[error("Invalid layer: index {index} with thickness {thickness} (need thickness > 0 and Re(n) > 0)")]
    InvalidLayer { index: Complex64, thickness: f64 },

    #[error("Invalid medium: index {index} (need Re(n) > 0)")]
    InvalidMedium { index: Complex64 },

    #[error("Invalid position {position} in a sequence of {len} layers")]
    InvalidPosition { position: usize, len: usize },

    #[error("Invalid position {position} in period {period} of a design with {periods} periods of {period_len} layers")]
    InvalidPeriodPosition {
        period: usize,
        position: usize,
        periods: usize,
        period_len: usize,
    },

    #[error("Invalid incidence angle {angle} rad (need 0 <= angle < pi/2)")]
    InvalidAngle { angle: f64 },

    #[error("Wavelength range contains no samples")]
    EmptyWavelengthRange,

    #[error("Invalid wavelength {wavelength} (need a finite positive value)")]
    InvalidWavelength { wavelength: f64 },

    #[error("Numerical instability at wavelength {wavelength}: {quantity} is not finite")]
    NumericalInstability {
        wavelength: f64,
        quantity: &'static str,
    },

    #[error("Spectra do not share a wavelength grid ({left} vs {right} samples)")]
    SpectrumMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, TmmError>;
