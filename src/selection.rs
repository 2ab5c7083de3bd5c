//! Electric-dipole selection rules.
//!
//! A dipole transition between two fine-structure states requires a parity change
//! (`Δl = ±1`) and `Δj ∈ {0, ±1}`. The change in `mj` fixes the polarization of the
//! light driving it: `Δmj = 0` for linear (π) light, `Δmj = ±1` for σ± light.

use crate::state::QuantumState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarization of a dipole transition, labelled by `q = mj_b - mj_a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Polarization {
    SigmaMinus,
    Pi,
    SigmaPlus,
}

impl Polarization {
    /// All polarizations, in ascending `q`.
    pub const ALL: [Polarization; 3] = [
        Polarization::SigmaMinus,
        Polarization::Pi,
        Polarization::SigmaPlus,
    ];

    /// The spherical index `q` of the polarization.
    pub fn q(self) -> i32 {
        match self {
            Polarization::SigmaMinus => -1,
            Polarization::Pi => 0,
            Polarization::SigmaPlus => 1,
        }
    }

    pub fn from_q(q: i32) -> Option<Polarization> {
        match q {
            -1 => Some(Polarization::SigmaMinus),
            0 => Some(Polarization::Pi),
            1 => Some(Polarization::SigmaPlus),
            _ => None,
        }
    }

    /// Polarization of the same transition driven in the opposite direction.
    pub fn reversed(self) -> Polarization {
        match self {
            Polarization::SigmaMinus => Polarization::SigmaPlus,
            Polarization::Pi => Polarization::Pi,
            Polarization::SigmaPlus => Polarization::SigmaMinus,
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Polarization::SigmaMinus => "sigma-",
            Polarization::Pi => "pi",
            Polarization::SigmaPlus => "sigma+",
        };
        f.write_str(name)
    }
}

/// `|Δl| = 1` and `|Δj| <= 1`, independent of `mj`.
fn fine_structure_permitted(a: &QuantumState, b: &QuantumState) -> bool {
    let delta_l = i64::from(a.l()) - i64::from(b.l());
    let delta_two_j = i64::from(a.two_j()) - i64::from(b.two_j());
    delta_l.abs() == 1 && delta_two_j.abs() <= 2
}

/// Whether a dipole transition between `a` and `b` is permitted under linear polarization.
pub fn is_linear_dipole_permitted(a: &QuantumState, b: &QuantumState) -> bool {
    fine_structure_permitted(a, b) && a.two_mj() == b.two_mj()
}

/// Classifies the dipole transition from `a` to `b`.
///
/// Returns the polarization `q = mj_b - mj_a` when the transition is dipole permitted for
/// some polarization, and `None` otherwise.
pub fn dipole_transition_type(a: &QuantumState, b: &QuantumState) -> Option<Polarization> {
    if !fine_structure_permitted(a, b) {
        return None;
    }
    let two_q = b.two_mj() - a.two_mj();
    // mj values of two states differ by an integer, so 2q is even.
    Polarization::from_q(two_q / 2)
}

/// Whether the transition from `a` to `b` is permitted for light of the given polarization.
pub fn is_dipole_permitted(a: &QuantumState, b: &QuantumState, polarization: Polarization) -> bool {
    dipole_transition_type(a, b) == Some(polarization)
}
