use crate::admittance::{resolve, Polarization};
use crate::error::{Result, TmmError};
use crate::stack::Stack;
use crate::transfer_matrix::AmplitudeCoefficients;
use crate::{IncidenceCondition, SpectralResult};
use num_complex::Complex64;
use rayon::prelude::*;

/// Evenly spaced wavelengths from `start` to `end` inclusive.
pub fn wavelength_grid(start: f64, end: f64, count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(TmmError::EmptyWavelengthRange);
    }
    for wavelength in [start, end] {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(TmmError::InvalidWavelength { wavelength });
        }
    }
    if count == 1 {
        return Ok(vec![start]);
    }
    let step = (end - start) / (count - 1) as f64;
    Ok((0..count)
        .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
        .collect())
}

fn finite(value: Complex64, wavelength: f64, quantity: &'static str) -> Result<Complex64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TmmError::NumericalInstability {
            wavelength,
            quantity,
        })
    }
}

/// Incident and exit admittances (Y₀, Yₛ) of a stack's bounding media.
pub fn boundary_admittances(stack: &Stack, condition: &IncidenceCondition) -> (Complex64, Complex64) {
    let n0 = stack.incident().index();
    let theta0 = condition.incidence_angle();
    let polarization = condition.polarization();
    let y0 = resolve(n0, theta0, n0, polarization).admittance;
    let ys = resolve(n0, theta0, stack.exit().index(), polarization).admittance;
    (y0, ys)
}

/// Complex amplitude reflection and transmission coefficients of the stack.
pub fn amplitude_coefficients(
    stack: &Stack,
    condition: &IncidenceCondition,
) -> Result<AmplitudeCoefficients> {
    let (y0, ys) = checked_boundary_admittances(stack, condition)?;
    coefficients_between(stack, condition, y0, ys)
}

fn checked_boundary_admittances(
    stack: &Stack,
    condition: &IncidenceCondition,
) -> Result<(Complex64, Complex64)> {
    let wavelength = condition.wavelength();
    let (y0, ys) = boundary_admittances(stack, condition);
    Ok((
        finite(y0, wavelength, "incident admittance")?,
        finite(ys, wavelength, "exit admittance")?,
    ))
}

fn coefficients_between(
    stack: &Stack,
    condition: &IncidenceCondition,
    y0: Complex64,
    ys: Complex64,
) -> Result<AmplitudeCoefficients> {
    let wavelength = condition.wavelength();
    let coeffs = stack.total_matrix(condition).coefficients(y0, ys);
    Ok(AmplitudeCoefficients {
        r: finite(coeffs.r, wavelength, "reflection coefficient")?,
        t: finite(coeffs.t, wavelength, "transmission coefficient")?,
    })
}

/// Reflectance and transmittance at a single incidence condition.
///
/// R = |r|² and T = Re(Yₛ)/Re(Y₀)·|t|² are computed independently, so
/// `R + T = 1` for lossless stacks is a check, not an identity.
pub fn evaluate(stack: &Stack, condition: &IncidenceCondition) -> Result<SpectralResult> {
    let wavelength = condition.wavelength();
    let (y0, ys) = checked_boundary_admittances(stack, condition)?;
    let coeffs = coefficients_between(stack, condition, y0, ys)?;

    let reflectance = coeffs.r.norm_sqr();
    let transmittance = ys.re / y0.re * coeffs.t.norm_sqr();
    if !transmittance.is_finite() {
        return Err(TmmError::NumericalInstability {
            wavelength,
            quantity: "transmittance",
        });
    }

    Ok(SpectralResult {
        wavelength,
        reflectance,
        transmittance,
    })
}

fn validate_request(
    wavelengths: &[f64],
    incidence_angle: f64,
    polarization: Polarization,
) -> Result<()> {
    if wavelengths.is_empty() {
        return Err(TmmError::EmptyWavelengthRange);
    }
    // Validates the angle even when every wavelength is fine.
    IncidenceCondition::new(wavelengths[0], incidence_angle, polarization)?;
    Ok(())
}

/// Sweep the stack's reflectance and transmittance over `wavelengths`,
/// one result per sample in input order.
pub fn sweep(
    stack: &Stack,
    wavelengths: &[f64],
    incidence_angle: f64,
    polarization: Polarization,
) -> Result<Vec<SpectralResult>> {
    validate_request(wavelengths, incidence_angle, polarization)?;
    log::debug!(
        "sweeping {} wavelengths over {} layers at {:.4} rad ({:?})",
        wavelengths.len(),
        stack.len(),
        incidence_angle,
        polarization
    );

    wavelengths
        .iter()
        .map(|&wavelength| {
            let condition = IncidenceCondition::new(wavelength, incidence_angle, polarization)?;
            evaluate(stack, &condition)
        })
        .collect()
}

/// Parallel variant of [`sweep`]: identical per-sample computation, spread
/// across the rayon thread pool.
pub fn par_sweep(
    stack: &Stack,
    wavelengths: &[f64],
    incidence_angle: f64,
    polarization: Polarization,
) -> Result<Vec<SpectralResult>> {
    validate_request(wavelengths, incidence_angle, polarization)?;
    log::debug!(
        "parallel sweep of {} wavelengths over {} layers on {} threads",
        wavelengths.len(),
        stack.len(),
        rayon::current_num_threads()
    );

    wavelengths
        .par_iter()
        .map(|&wavelength| {
            let condition = IncidenceCondition::new(wavelength, incidence_angle, polarization)?;
            evaluate(stack, &condition)
        })
        .collect()
}
