//! Configuration of an analysis run.
//!
//! A run is described by the state space to enumerate, the polarizations of light whose
//! transitions are tabulated, the thermal ensemble used for Doppler widths, and the set of
//! physical constants. Every field has a default, so a configuration file only needs to
//! list what differs, for example:
//!
//! ```yaml
//! state_space:
//!   nmin: 6
//!   nmax: 40
//!   lmax: 2
//!   sublevels: Disabled
//! polarizations: [Pi]
//! ensemble:
//!   temperature: 350.0
//! ```

use crate::constant::PhysicalConstants;
use crate::enumerate::StateSpace;
use crate::error::ConfigError;
use crate::maths;
use crate::selection::Polarization;
use crate::species::Species;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A thermal vapour of atoms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalEnsemble {
    /// Temperature of the vapour, in Kelvin
    pub temperature: f64,
    /// Mass of one atom, in kg
    pub mass: f64,
}

/// Room temperature caesium.
impl Default for ThermalEnsemble {
    fn default() -> Self {
        ThermalEnsemble {
            temperature: 298.0,
            mass: 2.21e-25,
        }
    }
}

impl ThermalEnsemble {
    pub fn for_species(species: Species, temperature: f64) -> Self {
        ThermalEnsemble {
            temperature,
            mass: species.mass(),
        }
    }

    /// Full-width-half-maximum of the speed distribution, m/s.
    pub fn fwhm_speed(&self, constants: &PhysicalConstants) -> f64 {
        maths::maxwell_boltzmann_fwhm_speed(self.temperature, self.mass, constants)
    }
}

/// Parameters of a transition table analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfiguration {
    pub state_space: StateSpace,
    /// Polarizations whose transitions are included in the table.
    pub polarizations: Vec<Polarization>,
    pub ensemble: ThermalEnsemble,
    pub constants: PhysicalConstants,
}

/// Per default, transitions of every polarization are tabulated for room temperature
/// caesium between n = 6 and n = 70.
impl Default for AnalysisConfiguration {
    fn default() -> Self {
        AnalysisConfiguration {
            state_space: StateSpace::default(),
            polarizations: Polarization::ALL.to_vec(),
            ensemble: ThermalEnsemble::default(),
            constants: PhysicalConstants::default(),
        }
    }
}

impl AnalysisConfiguration {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfiguration = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        AnalysisConfiguration::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let space = &self.state_space;
        let problem = if space.nmin > space.nmax {
            Some(format!(
                "nmin ({}) is larger than nmax ({})",
                space.nmin, space.nmax
            ))
        } else if space.nmax == 0 {
            Some("nmax must be at least 1".to_string())
        } else if self.polarizations.is_empty() {
            Some("at least one polarization must be selected".to_string())
        } else if !(self.ensemble.temperature > 0.0) {
            Some(format!(
                "temperature must be positive, got {}",
                self.ensemble.temperature
            ))
        } else if !(self.ensemble.mass > 0.0) {
            Some(format!("mass must be positive, got {}", self.ensemble.mass))
        } else {
            None
        };

        match problem {
            Some(message) => {
                warn!("event=config_rejected reason={:?}", message);
                Err(ConfigError::Invalid(message))
            }
            None => Ok(()),
        }
    }

    /// Whether transitions driven by `polarization` are tabulated.
    pub fn accepts(&self, polarization: Polarization) -> bool {
        self.polarizations.contains(&polarization)
    }
}
