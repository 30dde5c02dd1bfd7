use crate::admittance::resolve;
use crate::error::{Result, TmmError};
use crate::transfer_matrix::CharacteristicMatrix;
use crate::{IncidenceCondition, OpticalElement};
use num_complex::Complex64;

/// A homogeneous thin-film layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    index: Complex64,
    thickness: f64,
}

impl Layer {
    /// Create a layer with a complex refractive index.
    ///
    /// Fails with [`TmmError::InvalidLayer`] unless `thickness > 0` and
    /// `Re(index) > 0` (both finite).
    pub fn new(index: Complex64, thickness: f64) -> Result<Self> {
        let valid_thickness = thickness.is_finite() && thickness > 0.0;
        let valid_index = index.is_finite() && index.re > 0.0;
        if !(valid_thickness && valid_index) {
            return Err(TmmError::InvalidLayer { index, thickness });
        }
        Ok(Self { index, thickness })
    }

    /// Create a lossless layer with a real refractive index.
    pub fn real(index: f64, thickness: f64) -> Result<Self> {
        Self::new(Complex64::new(index, 0.0), thickness)
    }

    pub fn index(&self) -> Complex64 {
        self.index
    }

    /// Physical thickness, in the same length unit as the wavelengths.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }
}

impl OpticalElement for Layer {
    fn characteristic_matrix(
        &self,
        incident_index: Complex64,
        condition: &IncidenceCondition,
    ) -> CharacteristicMatrix {
        let local = resolve(
            incident_index,
            condition.incidence_angle(),
            self.index,
            condition.polarization(),
        );
        CharacteristicMatrix::layer(
            self.index,
            self.thickness,
            condition.wavelength(),
            local.cos_theta,
            local.admittance,
        )
    }
}

/// A semi-infinite bounding medium (incident side or substrate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    index: Complex64,
}

impl Medium {
    /// Fails with [`TmmError::InvalidMedium`] unless `Re(index) > 0`.
    pub fn new(index: Complex64) -> Result<Self> {
        if !(index.is_finite() && index.re > 0.0) {
            return Err(TmmError::InvalidMedium { index });
        }
        Ok(Self { index })
    }

    pub fn real(index: f64) -> Result<Self> {
        Self::new(Complex64::new(index, 0.0))
    }

    pub fn index(&self) -> Complex64 {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admittance::Polarization;
    use std::f64::consts::PI;

    #[test]
    fn test_layer_validation() {
        assert!(Layer::real(1.46, 100.0).is_ok());
        assert!(Layer::new(Complex64::new(0.2, 3.5), 10.0).is_ok());

        let bad = [(1.46, 0.0), (1.46, -5.0), (0.0, 100.0), (-1.5, 100.0), (1.5, f64::NAN)];
        for (n, d) in bad {
            match Layer::real(n, d) {
                Err(TmmError::InvalidLayer { thickness, .. }) => {
                    assert!(thickness.is_nan() || thickness == d)
                }
                other => panic!("expected InvalidLayer for n={n}, d={d}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_medium_validation() {
        assert!(Medium::real(1.0).is_ok());
        assert_eq!(
            Medium::real(0.0),
            Err(TmmError::InvalidMedium {
                index: Complex64::new(0.0, 0.0)
            })
        );
    }

    #[test]
    fn test_quarter_wave_layer_matrix() {
        // At the design wavelength and normal incidence the diagonal vanishes.
        let lambda0 = 650.0;
        let layer = Layer::real(2.05, lambda0 / (4.0 * 2.05)).unwrap();
        let cond = IncidenceCondition::new(lambda0, 0.0, Polarization::TE).unwrap();
        let m = layer.characteristic_matrix(Complex64::new(1.0, 0.0), &cond);
        assert!(m.a.norm() < 1e-12, "a should be ~0 at quarter wave");
        assert!(m.d.norm() < 1e-12, "d should be ~0 at quarter wave");
    }

    #[test]
    fn test_oblique_layer_phase_shrinks() {
        // cos θ < 1 inside the layer reduces the phase thickness: a
        // quarter-wave layer is no longer exactly quarter-wave at 40°.
        let lambda0 = 650.0;
        let layer = Layer::real(1.46, lambda0 / (4.0 * 1.46)).unwrap();
        let cond = IncidenceCondition::new(lambda0, 40.0 * PI / 180.0, Polarization::TM).unwrap();
        let m = layer.characteristic_matrix(Complex64::new(1.0, 0.0), &cond);
        assert!(m.a.re > 0.05, "cos δ should be positive, got {}", m.a);
        let det = m.determinant();
        assert!((det - Complex64::new(1.0, 0.0)).norm() < 1e-12, "det = {det}");
    }
}
