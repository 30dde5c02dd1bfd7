use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Polarization state of the incident plane wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarization {
    /// Transverse electric (s-polarization).
    #[default]
    TE,
    /// Transverse magnetic (p-polarization).
    TM,
}

/// Propagation state of the wave inside one layer or medium.
#[derive(Debug, Clone, Copy)]
pub struct LocalPropagation {
    /// cos(θ), with the evanescent branch fixed as described in [`snell_angle`].
    pub cos_theta: Complex64,
    /// Tilted optical admittance Y.
    pub admittance: Complex64,
}

/// Local propagation angle via Snell's law, returned as (θ, cos θ).
///
/// `n₀·sin(θ₀) = n·sin(θ)` is solved with a complex inverse sine, so a layer
/// where `|n₀·sin(θ₀)/n| > 1` gets a complex angle and evanescent fields.
///
/// When cos θ comes out purely imaginary (real indices beyond the critical
/// angle) the sign is chosen so that `n·cos θ` has a non-positive imaginary
/// part, which makes the field decay away from the incident side under the
/// `[cos δ, i·sin δ/Y; i·Y·sin δ, cos δ]` matrix convention.
pub fn snell_angle(n0: Complex64, theta0: f64, n: Complex64) -> (Complex64, Complex64) {
    let sin_theta = n0 * theta0.sin() / n;
    let theta = sin_theta.asin();
    let mut cos_theta = theta.cos();

    if sin_theta.norm() > 1.0 {
        log::trace!("evanescent regime: |sin θ| = {:.6} for n = {n}", sin_theta.norm());
        let purely_imaginary = cos_theta.re.abs() <= 1e-12 * cos_theta.norm();
        if purely_imaginary && (n * cos_theta).im > 0.0 {
            cos_theta = -cos_theta;
        }
    }

    (theta, cos_theta)
}

/// Tilted optical admittance for a given polarization.
///
/// TE: `Y = n·cos θ`. TM: `Y = n / cos θ`.
pub fn admittance(n: Complex64, cos_theta: Complex64, polarization: Polarization) -> Complex64 {
    match polarization {
        Polarization::TE => n * cos_theta,
        Polarization::TM => n / cos_theta,
    }
}

/// Resolve angle and admittance of a medium with index `n`, for light
/// arriving from a medium `n0` at angle `theta0` (radians).
pub fn resolve(
    n0: Complex64,
    theta0: f64,
    n: Complex64,
    polarization: Polarization,
) -> LocalPropagation {
    let (_, cos_theta) = snell_angle(n0, theta0, n);
    LocalPropagation {
        cos_theta,
        admittance: admittance(n, cos_theta, polarization),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn real(x: f64) -> Complex64 {
        Complex64::new(x, 0.0)
    }

    #[test]
    fn test_normal_incidence_admittance_is_index() {
        let n = real(2.05);
        let te = resolve(real(1.0), 0.0, n, Polarization::TE);
        let tm = resolve(real(1.0), 0.0, n, Polarization::TM);
        assert_eq!(te.admittance, n);
        assert_eq!(tm.admittance, n);
        assert_eq!(te.cos_theta, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_snell_refraction_at_30_degrees() {
        let theta0 = PI / 6.0;
        let (theta, cos_theta) = snell_angle(real(1.0), theta0, real(1.5));
        let expected = (0.5_f64 / 1.5).asin();
        assert!((theta.re - expected).abs() < 1e-12, "theta = {theta}");
        assert!(theta.im.abs() < 1e-12, "theta = {theta}");
        assert!((cos_theta.re - expected.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_incident_medium_keeps_its_own_angle() {
        let theta0 = 0.7;
        let (theta, _) = snell_angle(real(1.46), theta0, real(1.46));
        assert!((theta.re - theta0).abs() < 1e-12, "theta = {theta}");
    }

    #[test]
    fn test_evanescent_branch_is_decaying() {
        // Glass into air at 60°: n0·sin θ0 / n = 1.3, beyond the critical angle.
        let n = real(1.0);
        let (_, cos_theta) = snell_angle(real(1.5), PI / 3.0, n);
        let expected_im = (1.5_f64 * (PI / 3.0).sin()).powi(2) - 1.0;
        assert!(cos_theta.re.abs() < 1e-9, "cos θ = {cos_theta}");
        assert!(
            (cos_theta.im + expected_im.sqrt()).abs() < 1e-9,
            "cos θ = {cos_theta}, expected -i·{}",
            expected_im.sqrt()
        );
        assert!((n * cos_theta).im < 0.0);
    }

    #[test]
    fn test_tm_admittance_is_index_over_cos() {
        let n = real(1.46);
        let p = resolve(real(1.0), PI / 4.0, n, Polarization::TM);
        let expected = n / p.cos_theta;
        assert!((p.admittance - expected).norm() < 1e-15);
        // Oblique TM admittance exceeds the index, TE falls below it.
        let s = resolve(real(1.0), PI / 4.0, n, Polarization::TE);
        assert!(p.admittance.re > n.re);
        assert!(s.admittance.re < n.re);
    }

    #[test]
    fn test_polarization_serde_names() {
        let json = serde_json::to_string(&Polarization::TM).unwrap();
        assert_eq!(json, "\"TM\"");
        let back: Polarization = serde_json::from_str("\"TE\"").unwrap();
        assert_eq!(back, Polarization::TE);
    }
}
