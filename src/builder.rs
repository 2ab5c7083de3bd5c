//! Assembly of the transition table.
//!
//! The builder walks every ordered pair of enumerated states, keeps the canonical pairs
//! (smaller `l` first) that are dipole permitted for one of the configured polarizations,
//! queries the atomic data provider for their energies and dipole matrix elements, and
//! derives the rates and linewidths of each transition.
//!
//! Provider queries are memoized and issued lazily, in pair order, on the calling thread.
//! Pairs rejected by the selection rules never cause a query. The per-pair derivation is
//! independent and runs in parallel; the results are collected in pair order so the table
//! is identical from run to run.

use crate::configuration::{AnalysisConfiguration, ThermalEnsemble};
use crate::constant::{PhysicalConstants, PI};
use crate::enumerate::StateSpace;
use crate::error::{BuildError, LookupError};
use crate::maths;
use crate::provider::{AtomicDataProvider, Memoized};
use crate::selection::{dipole_transition_type, Polarization};
use crate::state::QuantumState;
use crate::transition::{Transition, TransitionTable};
use log::{debug, info, warn};
use rayon::prelude::*;

/// A permitted, canonical state pair with the raw provider data for it.
#[derive(Debug, Clone, Copy)]
struct PairData {
    lower: QuantumState,
    upper: QuantumState,
    polarization: Polarization,
    /// Energy difference, eV.
    energy_gap: f64,
    /// Dipole matrix element, e a0.
    dipole: f64,
}

/// Builds a [TransitionTable] from a state space and an [AtomicDataProvider].
#[derive(Debug, Clone)]
pub struct TransitionTableBuilder {
    state_space: StateSpace,
    polarizations: Vec<Polarization>,
    ensemble: ThermalEnsemble,
    constants: PhysicalConstants,
}

impl TransitionTableBuilder {
    /// Creates a builder for the given state space, accepting every polarization.
    pub fn new(state_space: StateSpace) -> Self {
        TransitionTableBuilder {
            state_space,
            polarizations: Polarization::ALL.to_vec(),
            ensemble: ThermalEnsemble::default(),
            constants: PhysicalConstants::default(),
        }
    }

    pub fn from_config(config: &AnalysisConfiguration) -> Self {
        TransitionTableBuilder {
            state_space: config.state_space,
            polarizations: config.polarizations.clone(),
            ensemble: config.ensemble,
            constants: config.constants,
        }
    }

    /// Restricts the table to transitions driven by the given polarizations.
    pub fn polarizations(mut self, polarizations: &[Polarization]) -> Self {
        self.polarizations = polarizations.to_vec();
        self
    }

    pub fn ensemble(mut self, ensemble: ThermalEnsemble) -> Self {
        self.ensemble = ensemble;
        self
    }

    pub fn constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Every canonical, dipole permitted state pair in the state space, with the
    /// polarization driving it, in enumeration order.
    pub fn canonical_pairs(&self) -> Vec<(QuantumState, QuantumState, Polarization)> {
        let states: Vec<QuantumState> = self.state_space.states().collect();
        let mut pairs = Vec::new();
        for lower in &states {
            for upper in &states {
                if upper.l() <= lower.l() {
                    continue;
                }
                match dipole_transition_type(lower, upper) {
                    Some(polarization) if self.polarizations.contains(&polarization) => {
                        pairs.push((*lower, *upper, polarization))
                    }
                    _ => {}
                }
            }
        }
        pairs
    }

    /// Queries the provider for every permitted pair and assembles the table.
    ///
    /// A failed lookup aborts the build and reports the pair it was made for.
    pub fn build<P>(&self, provider: P) -> Result<TransitionTable, BuildError>
    where
        P: AtomicDataProvider,
    {
        info!(
            "event=build_table status=start states={} polarizations={:?}",
            self.state_space.len(),
            self.polarizations
        );
        let provider = Memoized::new(provider);

        let pairs = self.canonical_pairs();
        let mut data = Vec::with_capacity(pairs.len());
        for (lower, upper, polarization) in pairs {
            let lookup_error = |source: LookupError| BuildError::Lookup {
                lower,
                upper,
                source,
            };
            let energy_lower = provider.energy(lower.level()).map_err(lookup_error)?;
            let energy_upper = provider.energy(upper.level()).map_err(lookup_error)?;
            let dipole = provider
                .dipole_matrix_element(&lower, &upper, polarization)
                .map_err(lookup_error)?;
            data.push(PairData {
                lower,
                upper,
                polarization,
                energy_gap: energy_upper - energy_lower,
                dipole,
            });
        }
        let stats = provider.stats();
        debug!(
            "event=build_table provider_energy_queries={} provider_dipole_queries={} memo_hits={}",
            stats.energy_queries, stats.dipole_queries, stats.hits
        );

        let fwhm_speed = self.ensemble.fwhm_speed(&self.constants);
        let transitions: Vec<Transition> = data
            .par_iter()
            .map(|pair| self.derive(pair, fwhm_speed))
            .collect();

        let mut table = TransitionTable::with_capacity(transitions.len());
        for transition in transitions {
            if transition.delta == 0.0 {
                warn!(
                    "event=degenerate_transition lower=\"{}\" upper=\"{}\"",
                    transition.lower, transition.upper
                );
            }
            table.insert(transition)?;
        }
        info!(
            "event=build_table status=ok transitions={}",
            table.len()
        );
        Ok(table)
    }

    /// Converts the raw provider data of a pair into a transition.
    fn derive(&self, pair: &PairData, fwhm_speed: f64) -> Transition {
        let constants = &self.constants;
        let delta = pair.energy_gap * constants.ev_to_mhz();
        let dipole = pair.dipole * constants.ea0_to_mhz_per_v_m();

        let omega = delta * 1e6 * 2.0 * PI;
        let dipole_si = dipole / constants.joules_to_mhz();
        let gamma = 1e-6 * maths::spontaneous_decay_rate(omega, dipole_si, constants);

        Transition {
            lower: pair.lower,
            upper: pair.upper,
            delta,
            dipole,
            polarization: pair.polarization,
            gamma,
            linewidth: gamma / (2.0 * PI),
            doppler: maths::doppler_width(delta, fwhm_speed, constants),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::SublevelOption;
    use crate::provider::TabulatedAtom;
    use crate::state::Level;
    use assert_approx_eq::assert_approx_eq;
    use std::cell::RefCell;

    /// Hydrogen-like energies and a unit dipole for every query.
    struct Hydrogenic {
        energy_queries: RefCell<Vec<Level>>,
    }

    impl Hydrogenic {
        fn new() -> Self {
            Hydrogenic {
                energy_queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl AtomicDataProvider for Hydrogenic {
        fn energy(&self, level: Level) -> Result<f64, LookupError> {
            self.energy_queries.borrow_mut().push(level);
            let n = f64::from(level.n());
            // fine-structure splitting to keep the j levels apart
            Ok(-13.6 / (n * n) + 1e-6 * level.j())
        }

        fn dipole_matrix_element(
            &self,
            _a: &QuantumState,
            _b: &QuantumState,
            _q: Polarization,
        ) -> Result<f64, LookupError> {
            Ok(1.0)
        }
    }

    fn state(n: u32, l: u32, j: f64, mj: f64) -> QuantumState {
        QuantumState::new(n, l, j, mj).unwrap()
    }

    #[test]
    fn test_pairs_are_canonical_and_permitted() {
        let builder =
            TransitionTableBuilder::new(StateSpace::new(6, 8, 2, SublevelOption::Enabled));
        let pairs = builder.canonical_pairs();
        assert!(!pairs.is_empty());
        for (lower, upper, polarization) in &pairs {
            assert!(lower.l() < upper.l());
            assert_eq!(dipole_transition_type(lower, upper), Some(*polarization));
        }
    }

    #[test]
    fn test_linear_only_builder() {
        let builder = TransitionTableBuilder::new(StateSpace::new(6, 7, 1, SublevelOption::Enabled))
            .polarizations(&[Polarization::Pi]);
        let table = builder.build(Hydrogenic::new()).unwrap();
        assert!(!table.is_empty());
        for transition in &table {
            assert_eq!(transition.polarization, Polarization::Pi);
            assert_eq!(transition.lower.two_mj(), transition.upper.two_mj());
        }
        // 4 s sublevels, each coupled to the p1/2 and p3/2 sublevel of equal mj in 2 shells.
        assert_eq!(table.len(), 2 * 2 * 2 * 2);
    }

    #[test]
    fn test_each_energy_queried_once() {
        let provider = Hydrogenic::new();
        let builder =
            TransitionTableBuilder::new(StateSpace::new(6, 9, 2, SublevelOption::Enabled));
        builder.build(&provider).unwrap();
        let queries = provider.energy_queries.borrow();
        let mut distinct = queries.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(queries.len(), distinct.len());
    }

    #[test]
    fn test_derived_quantities() {
        let ground = state(6, 0, 0.5, 0.5);
        let excited = state(6, 1, 1.5, 0.5);
        let mut atom = TabulatedAtom::new();
        atom.insert_level(ground.level(), -3.893_905);
        atom.insert_level(Level::new(6, 1, 0.5).unwrap(), -2.386_178);
        atom.insert_level(excited.level(), -2.439_298);
        for lower in ground.level().sublevels() {
            for upper in excited.level().sublevels().chain(Level::new(6, 1, 0.5).unwrap().sublevels()) {
                if let Some(q) = dipole_transition_type(&lower, &upper) {
                    atom.insert_dipole(lower, upper, q, 3.0);
                }
            }
        }

        let constants = PhysicalConstants::default();
        let ensemble = ThermalEnsemble::default();
        let table = TransitionTableBuilder::new(StateSpace::new(6, 6, 1, SublevelOption::Enabled))
            .constants(constants)
            .ensemble(ensemble)
            .build(&atom)
            .unwrap();
        let d2 = table.get(&ground, &excited).unwrap();

        let delta = (-2.439_298 - -3.893_905) * constants.ev_to_mhz();
        assert_approx_eq!(d2.delta, delta, 1e-6);
        assert_approx_eq!(d2.dipole, 3.0 * constants.ea0_to_mhz_per_v_m(), 1e-12);

        let omega = 2.0 * PI * delta * 1e6;
        let dipole_si = 3.0 * constants.e * constants.a0;
        let gamma = omega.powi(3) * dipole_si.powi(2)
            / (3.0 * PI * constants.epsilon_0 * constants.hbar() * constants.c.powi(3))
            * 1e-6;
        assert_approx_eq!(d2.gamma / gamma, 1.0, 1e-9);
        assert_approx_eq!(d2.linewidth, d2.gamma / (2.0 * PI), 1e-12);
        assert_approx_eq!(
            d2.doppler,
            delta * ensemble.fwhm_speed(&constants) / constants.c,
            1e-6
        );
    }

    #[test]
    fn test_lookup_failure_names_the_pair() {
        let mut atom = TabulatedAtom::new();
        atom.insert_level(Level::new(6, 0, 0.5).unwrap(), -3.9);
        let builder = TransitionTableBuilder::new(StateSpace::new(6, 6, 1, SublevelOption::Disabled));
        match builder.build(&atom) {
            Err(BuildError::Lookup {
                lower,
                upper,
                source: LookupError::MissingLevel(level),
            }) => {
                assert_eq!(lower.level(), Level::new(6, 0, 0.5).unwrap());
                assert_eq!(upper.level(), level);
            }
            other => panic!("expected a lookup failure, got {:?}", other),
        }
    }

    #[test]
    fn test_excluded_pairs_are_never_queried() {
        // Only the linear-polarization pairs have data; σ± pairs would fail if queried.
        let ground = state(6, 0, 0.5, 0.5);
        let mut atom = TabulatedAtom::new();
        atom.insert_level(ground.level(), -3.9);
        atom.insert_level(Level::new(6, 1, 0.5).unwrap(), -2.4);
        atom.insert_level(Level::new(6, 1, 1.5).unwrap(), -2.3);
        for upper in StateSpace::new(6, 6, 1, SublevelOption::Enabled).states() {
            for lower in ground.level().sublevels() {
                if upper.l() == 1 && upper.two_mj() == lower.two_mj() {
                    atom.insert_dipole(lower, upper, Polarization::Pi, 1.0);
                }
            }
        }
        let table = TransitionTableBuilder::new(StateSpace::new(6, 6, 1, SublevelOption::Enabled))
            .polarizations(&[Polarization::Pi])
            .build(&atom)
            .unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_build_from_config() {
        let config = AnalysisConfiguration::from_yaml_str(
            "state_space:\n  nmin: 6\n  nmax: 10\n  lmax: 2\n",
        )
        .unwrap();
        let first = TransitionTableBuilder::from_config(&config)
            .build(Hydrogenic::new())
            .unwrap();
        let second = TransitionTableBuilder::from_config(&config)
            .build(Hydrogenic::new())
            .unwrap();
        assert_eq!(first.rows(), second.rows());
        for transition in &first {
            if transition.delta != 0.0 {
                assert!(transition.gamma > 0.0);
            }
        }
    }
}
