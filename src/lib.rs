//! Spectroscopic structure of a single atomic species.
//!
//! The crate enumerates the fine-structure states `(n, l, j, mj)` of an atom over a range of
//! quantum numbers, applies the electric-dipole selection rules to every pair of states, and
//! tabulates the energy gap, dipole moment, spontaneous decay rate, natural linewidth and
//! Doppler width of each permitted transition. Energies and dipole matrix elements come from
//! an external [AtomicDataProvider](provider::AtomicDataProvider).
//!
//! ```no_run
//! use rydberg_spectra::builder::TransitionTableBuilder;
//! use rydberg_spectra::configuration::AnalysisConfiguration;
//! use rydberg_spectra::provider::TabulatedAtom;
//! use rydberg_spectra::rank::nearest_to_wavelength;
//!
//! let config = AnalysisConfiguration::load("caesium.yaml").unwrap();
//! let atom = TabulatedAtom::from_yaml_str(&std::fs::read_to_string("caesium_data.yaml").unwrap()).unwrap();
//! let table = TransitionTableBuilder::from_config(&config).build(&atom).unwrap();
//! for row in nearest_to_wavelength(852.0, &table, &config.constants).unwrap().iter().take(5) {
//!     println!("{} -> {}: {} MHz", row.transition.lower, row.transition.upper, row.deviation);
//! }
//! ```

pub mod builder;
pub mod configuration;
pub mod constant;
pub mod enumerate;
pub mod error;
pub mod maths;
pub mod provider;
pub mod rank;
pub mod selection;
pub mod species;
pub mod spectroscopic;
pub mod state;
pub mod transition;
pub mod units;

mod integration_tests;
