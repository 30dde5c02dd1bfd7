/// Physical thickness of a layer whose optical phase thickness at the
/// design wavelength is `fraction` of a full wave: d = fraction·λ₀ / n.
pub fn fractional_wave_thickness(index: f64, design_wavelength: f64, fraction: f64) -> f64 {
    fraction * design_wavelength / index
}

/// Quarter-wave thickness d = λ₀ / (4·n). The phase thickness at λ₀ is π/2.
pub fn quarter_wave_thickness(index: f64, design_wavelength: f64) -> f64 {
    fractional_wave_thickness(index, design_wavelength, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_quarter_wave_phase_is_half_pi() {
        let n = 2.05;
        let lambda0 = 650.0;
        let d = quarter_wave_thickness(n, lambda0);
        let delta = 2.0 * PI * n * d / lambda0;
        assert!((delta - PI / 2.0).abs() < 1e-12, "delta = {delta}");
    }

    #[test]
    fn test_sixth_wave_thickness() {
        // The contamination layer of the extra-layer scenario: λ₀ / (6·n₃)
        let d = fractional_wave_thickness(1.8, 650.0, 1.0 / 6.0);
        assert!((d - 650.0 / (6.0 * 1.8)).abs() < 1e-12, "d = {d}");
    }
}
