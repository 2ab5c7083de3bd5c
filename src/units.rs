//! Conversions between laser wavelength and transition frequency.
//!
//! Frequencies are in MHz and wavelengths in nm, matching the units of the transition table.

/// Converts a vacuum wavelength in nm to a frequency in MHz.
///
/// Returns `None` for a zero wavelength.
pub fn wavelength_to_frequency(wavelength_nm: f64, c: f64) -> Option<f64> {
    if wavelength_nm == 0.0 {
        return None;
    }
    Some(c / wavelength_nm * 1e3)
}

/// Converts a frequency in MHz to a vacuum wavelength in nm.
///
/// Returns `None` for a zero frequency.
pub fn frequency_to_wavelength(frequency_mhz: f64, c: f64) -> Option<f64> {
    if frequency_mhz == 0.0 {
        return None;
    }
    Some(c / frequency_mhz * 1e3)
}
