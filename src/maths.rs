//! Closed-form radiative and thermal rates.

use crate::constant::{PhysicalConstants, MB_FWHM_FACTOR, PI};

/// Full-width-half-maximum speed of a Maxwell-Boltzmann distribution.
///
/// # Arguments
///
/// `temperature`: temperature of the ensemble, in Kelvin.
///
/// `mass`: mass of one atom, in kg.
pub fn maxwell_boltzmann_fwhm_speed(temperature: f64, mass: f64, constants: &PhysicalConstants) -> f64 {
    MB_FWHM_FACTOR * (2.0 * constants.k_b * temperature / mass).sqrt()
}

/// Spontaneous emission rate of a dipole transition, in SI units of 1/s.
///
/// `gamma = |omega^3 d^2 / (3 pi eps0 hbar c^3)|`
///
/// # Arguments
///
/// `omega`: angular frequency of the transition, rad/s.
///
/// `dipole`: dipole moment, in SI units of C m.
pub fn spontaneous_decay_rate(omega: f64, dipole: f64, constants: &PhysicalConstants) -> f64 {
    (omega.powi(3) * dipole.powi(2)
        / (3.0 * PI * constants.epsilon_0 * constants.hbar() * constants.c.powi(3)))
    .abs()
}

/// Doppler broadened linewidth of a transition, in the frequency unit of `frequency`.
///
/// `speed` is the width of the velocity distribution along the beam, m/s.
pub fn doppler_width(frequency: f64, speed: f64, constants: &PhysicalConstants) -> f64 {
    frequency * speed / constants.c
}
