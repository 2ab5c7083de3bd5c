//! Predefined atomic species.
use crate::constant::AMU;
use serde::{Deserialize, Serialize};

/// Atomic species with tabulated masses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Caesium133,
    Rubidium87,
    Strontium88,
}

impl Species {
    /// Atomic mass, in atomic mass units.
    pub fn mass_amu(self) -> f64 {
        match self {
            Species::Caesium133 => 132.905_451_961,
            Species::Rubidium87 => 86.909_180_527,
            Species::Strontium88 => 87.905_612_5,
        }
    }

    /// Atomic mass, in kg.
    pub fn mass(self) -> f64 {
        self.mass_amu() * AMU
    }
}
