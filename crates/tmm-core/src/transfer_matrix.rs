use num_complex::Complex64;
use std::f64::consts::PI;

/// A 2×2 complex characteristic matrix relating the tangential field
/// components at the two faces of a layer (or of a whole stack).
///
/// ```text
/// [E_in]   [a  b] [E_out]
/// [H_in] = [c  d] [H_out]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicMatrix {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

/// Complex amplitude reflection and transmission coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeCoefficients {
    pub r: Complex64,
    pub t: Complex64,
}

impl CharacteristicMatrix {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    /// Identity matrix (empty stack).
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Characteristic matrix of a homogeneous layer from its phase
    /// thickness δ and tilted admittance Y.
    ///
    /// ```text
    /// [ cos δ       i·sin δ / Y ]
    /// [ i·Y·sin δ   cos δ       ]
    /// ```
    pub fn from_phase(delta: Complex64, admittance: Complex64) -> Self {
        let j = Complex64::new(0.0, 1.0);
        let cos_d = delta.cos();
        let sin_d = delta.sin();
        Self {
            a: cos_d,
            b: j * sin_d / admittance,
            c: j * admittance * sin_d,
            d: cos_d,
        }
    }

    /// Characteristic matrix of a layer of index `n` and thickness `d`
    /// at vacuum wavelength `wavelength`, given the local cos θ and admittance.
    ///
    /// δ = 2π·n·d·cos θ / λ
    pub fn layer(
        n: Complex64,
        thickness: f64,
        wavelength: f64,
        cos_theta: Complex64,
        admittance: Complex64,
    ) -> Self {
        let delta = 2.0 * PI * n * thickness * cos_theta / wavelength;
        Self::from_phase(delta, admittance)
    }

    /// Chain (multiply) this matrix with another: self · other.
    pub fn chain(&self, other: &CharacteristicMatrix) -> CharacteristicMatrix {
        CharacteristicMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
        }
    }

    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// Amplitude coefficients for incident admittance `y0` and exit
    /// (substrate) admittance `ys`.
    ///
    /// With B = a + b·Yₛ and C = c + d·Yₛ:
    /// r = (B·Y₀ − C) / (B·Y₀ + C), t = 2·Y₀ / (B·Y₀ + C)
    pub fn coefficients(&self, y0: Complex64, ys: Complex64) -> AmplitudeCoefficients {
        let big_b = self.a + self.b * ys;
        let big_c = self.c + self.d * ys;
        let denom = big_b * y0 + big_c;
        AmplitudeCoefficients {
            r: (big_b * y0 - big_c) / denom,
            t: 2.0 * y0 / denom,
        }
    }
}

impl Default for CharacteristicMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
