//! Physical constants, in SI units.
//!
//! The values are those used to produce the reference caesium transition tables, and are
//! kept at that precision so that derived rates reproduce the reference output. They are
//! collected into an immutable [PhysicalConstants] object that is handed to the builder.

use serde::{Deserialize, Serialize};

/// Mathematical constant pi
pub const PI: f64 = std::f64::consts::PI;

/// Speed of light in SI units of m/s
pub const C: f64 = 2.99792e8;

/// Planck constant in SI units of J/Hz
pub const H: f64 = 6.62607e-34;

/// Elementary charge, in Coulombs.
pub const E_CHARGE: f64 = 1.60218e-19;

/// Bohr radius, in metres.
pub const BOHR_RADIUS: f64 = 5.29177e-11;

/// Vacuum permittivity, C^2 / (J m)
pub const EPSILON_0: f64 = 8.854187817e-12;

/// Boltzmann constant in SI units
pub const BOLTZCONST: f64 = 1.3806e-23;

/// The value of 1 Atomic Mass Unit (amu) in SI units of kg.
pub const AMU: f64 = 1.6605e-27;

/// Ratio of the full-width-half-maximum of the Maxwell-Boltzmann speed distribution to the
/// most probable speed `sqrt(2 kT / m)`.
pub const MB_FWHM_FACTOR: f64 = 1.177;

/// Set of physical constants shared by every stage of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Speed of light, m/s
    pub c: f64,
    /// Planck constant, J/Hz
    pub h: f64,
    /// Elementary charge, C
    pub e: f64,
    /// Bohr radius, m
    pub a0: f64,
    /// Vacuum permittivity, C^2 / (J m)
    pub epsilon_0: f64,
    /// Boltzmann constant, J/K
    pub k_b: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            c: C,
            h: H,
            e: E_CHARGE,
            a0: BOHR_RADIUS,
            epsilon_0: EPSILON_0,
            k_b: BOLTZCONST,
        }
    }
}

impl PhysicalConstants {
    /// Reduced Planck constant, J / (rad/s)
    pub fn hbar(&self) -> f64 {
        self.h / (2.0 * PI)
    }

    /// Converts an energy in Joules to a frequency in MHz.
    pub fn joules_to_mhz(&self) -> f64 {
        1e-6 / self.h
    }

    /// Converts an energy in electron-volts to a frequency in MHz.
    pub fn ev_to_mhz(&self) -> f64 {
        self.e * self.joules_to_mhz()
    }

    /// Converts a dipole moment in atomic units (e a0) to MHz/(V/m).
    pub fn ea0_to_mhz_per_v_m(&self) -> f64 {
        self.e * self.a0 * self.joules_to_mhz()
    }
}
