use crate::error::{Result, TmmError};
use crate::SpectralResult;

/// A contiguous wavelength region whose reflectance exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stopband {
    pub start: f64,
    pub end: f64,
}

impl Stopband {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    pub fn contains(&self, wavelength: f64) -> bool {
        (self.start..=self.end).contains(&wavelength)
    }
}

/// All regions with `R > threshold`, in sample order. Band edges are the
/// first and last samples above the threshold.
pub fn stopbands(spectrum: &[SpectralResult], threshold: f64) -> Vec<Stopband> {
    let mut bands = Vec::new();
    let mut current: Option<Stopband> = None;

    for sample in spectrum {
        if sample.reflectance > threshold {
            match current.as_mut() {
                Some(band) => band.end = sample.wavelength,
                None => {
                    current = Some(Stopband {
                        start: sample.wavelength,
                        end: sample.wavelength,
                    })
                }
            }
        } else if let Some(band) = current.take() {
            bands.push(band);
        }
    }
    bands.extend(current);
    bands
}

/// The widest region with `R > threshold`, if any.
pub fn widest_stopband(spectrum: &[SpectralResult], threshold: f64) -> Option<Stopband> {
    stopbands(spectrum, threshold)
        .into_iter()
        .max_by(|a, b| a.width().total_cmp(&b.width()))
}

/// Reflectance of the sample closest to `wavelength`.
pub fn reflectance_at(spectrum: &[SpectralResult], wavelength: f64) -> Option<f64> {
    spectrum
        .iter()
        .min_by(|a, b| {
            (a.wavelength - wavelength)
                .abs()
                .total_cmp(&(b.wavelength - wavelength).abs())
        })
        .map(|sample| sample.reflectance)
}

/// Largest |R_a − R_b| between two spectra on the same wavelength grid.
pub fn max_reflectance_difference(a: &[SpectralResult], b: &[SpectralResult]) -> Result<f64> {
    let mismatch = TmmError::SpectrumMismatch {
        left: a.len(),
        right: b.len(),
    };
    if a.len() != b.len() {
        return Err(mismatch);
    }
    let mut max_diff: f64 = 0.0;
    for (x, y) in a.iter().zip(b) {
        if (x.wavelength - y.wavelength).abs() > 1e-9 * x.wavelength.abs().max(1.0) {
            return Err(mismatch);
        }
        max_diff = max_diff.max((x.reflectance - y.reflectance).abs());
    }
    Ok(max_diff)
}
