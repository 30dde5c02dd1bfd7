pub mod admittance;
pub mod analysis;
pub mod composer;
pub mod constants;
pub mod error;
pub mod layer;
pub mod stack;
pub mod sweep;
pub mod transfer_matrix;

pub use admittance::Polarization;
pub use error::{Result, TmmError};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

// ---------------------------------------------------------------------------
// Shared interface types
// ---------------------------------------------------------------------------

/// Wavelength, incidence angle and polarization of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidenceCondition {
    wavelength: f64,
    incidence_angle: f64,
    polarization: Polarization,
}

impl IncidenceCondition {
    /// `wavelength` must be finite and positive; `incidence_angle` (radians,
    /// measured in the incident medium) must lie in `[0, π/2)`.
    pub fn new(wavelength: f64, incidence_angle: f64, polarization: Polarization) -> Result<Self> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(TmmError::InvalidWavelength { wavelength });
        }
        if !(incidence_angle.is_finite() && (0.0..FRAC_PI_2).contains(&incidence_angle)) {
            return Err(TmmError::InvalidAngle {
                angle: incidence_angle,
            });
        }
        Ok(Self {
            wavelength,
            incidence_angle,
            polarization,
        })
    }

    /// Normal incidence.
    pub fn normal(wavelength: f64, polarization: Polarization) -> Result<Self> {
        Self::new(wavelength, 0.0, polarization)
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn incidence_angle(&self) -> f64 {
        self.incidence_angle
    }

    pub fn polarization(&self) -> Polarization {
        self.polarization
    }
}

/// Power reflectance and transmittance at one wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralResult {
    pub wavelength: f64,
    pub reflectance: f64,
    pub transmittance: f64,
}

/// Anything that contributes a 2×2 characteristic matrix to a stack.
pub trait OpticalElement: Send + Sync {
    /// Characteristic matrix for light arriving from a medium of index
    /// `incident_index` under `condition`.
    fn characteristic_matrix(
        &self,
        incident_index: Complex64,
        condition: &IncidenceCondition,
    ) -> transfer_matrix::CharacteristicMatrix;
}

/// Parameters of a Bragg-mirror scenario: a quarter-wave HL stack, the
/// sweep to run over it and any fabrication defects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbrParams {
    /// Incident medium index.
    pub incident_index: f64,
    /// Substrate (exit medium) index.
    pub substrate_index: f64,
    /// High-index layer.
    pub high_index: f64,
    /// Low-index layer.
    pub low_index: f64,
    /// Design wavelength λ₀; layers are λ₀/4 thick optically.
    pub design_wavelength: f64,
    /// Number of HL periods.
    pub periods: usize,
    /// First wavelength of the sweep.
    pub wavelength_start: f64,
    /// Last wavelength of the sweep.
    pub wavelength_end: f64,
    /// Number of wavelength samples.
    pub num_wavelengths: usize,
    /// Incidence angle in degrees.
    pub incidence_angle_deg: f64,
    pub polarization: Polarization,
    pub defects: Vec<composer::DefectSpec>,
}

impl Default for DbrParams {
    fn default() -> Self {
        Self {
            incident_index: 1.0, // air
            substrate_index: 1.5, // glass
            high_index: 2.05,
            low_index: 1.46,
            design_wavelength: 650.0, // nm
            periods: 10,
            wavelength_start: 350.0,
            wavelength_end: 900.0,
            num_wavelengths: 2000,
            incidence_angle_deg: 0.0,
            polarization: Polarization::TE,
            defects: Vec::new(),
        }
    }
}

/// Results of a scenario run, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    /// Wavelength samples, in sweep order.
    pub wavelengths: Vec<f64>,
    /// One result per wavelength sample.
    pub spectrum: Vec<SpectralResult>,
}

impl SimResult {
    pub fn reflectance(&self) -> Vec<f64> {
        self.spectrum.iter().map(|s| s.reflectance).collect()
    }

    pub fn transmittance(&self) -> Vec<f64> {
        self.spectrum.iter().map(|s| s.transmittance).collect()
    }
}

/// Build the stack described by `params`, including its defects.
pub fn build_stack(params: &DbrParams) -> Result<stack::Stack> {
    let design = composer::PeriodicDesign::quarter_wave_dbr(
        params.incident_index,
        params.substrate_index,
        params.high_index,
        params.low_index,
        params.design_wavelength,
        params.periods,
    )?;
    params
        .defects
        .iter()
        .try_fold(composer::StackComposer::new(design), |c, spec| c.with_defect(spec))?
        .build()
}

/// Run the full pipeline: compose the stack from params and sweep it in
/// parallel over the requested wavelength grid.
pub fn compute(params: &DbrParams) -> Result<SimResult> {
    let stack = build_stack(params)?;
    let wavelengths = sweep::wavelength_grid(
        params.wavelength_start,
        params.wavelength_end,
        params.num_wavelengths,
    )?;
    let angle = params.incidence_angle_deg.to_radians();
    let spectrum = sweep::par_sweep(&stack, &wavelengths, angle, params.polarization)?;

    Ok(SimResult {
        wavelengths,
        spectrum,
    })
}
