//! Dipole transitions and the table that holds them.
//!
//! Unit conventions of the table:
//!  * energy differences and linewidths in MHz,
//!  * dipole moments in MHz/(V/m),
//!  * decay rates in 1/µs.

use crate::constant::PhysicalConstants;
use crate::error::TableError;
use crate::selection::Polarization;
use crate::state::QuantumState;
use crate::units;
use hashbrown::HashMap;
use serde::Serialize;
use std::io;

/// An electric-dipole transition between two states.
///
/// Transitions are stored canonically, with `lower.l() < upper.l()`, so each pair of states
/// appears only once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State with the smaller orbital quantum number.
    pub lower: QuantumState,
    /// State with the larger orbital quantum number.
    pub upper: QuantumState,
    /// Energy of `upper` less the energy of `lower`, MHz.
    pub delta: f64,
    /// Dipole moment, MHz/(V/m).
    pub dipole: f64,
    /// Polarization `q = mj_upper - mj_lower` of the light driving the transition.
    pub polarization: Polarization,
    /// Spontaneous decay rate, 1/µs.
    pub gamma: f64,
    /// Natural linewidth, MHz.
    pub linewidth: f64,
    /// Doppler broadened linewidth (FWHM), MHz.
    pub doppler: f64,
}

impl Transition {
    /// The canonical `(lower, upper)` pair identifying the transition.
    pub fn key(&self) -> (QuantumState, QuantumState) {
        (self.lower, self.upper)
    }

    /// Vacuum wavelength of the transition in nm, or `None` for degenerate states.
    pub fn wavelength(&self, constants: &PhysicalConstants) -> Option<f64> {
        units::frequency_to_wavelength(self.delta.abs(), constants.c)
    }

    /// Radiative lifetime `1/gamma` in µs, or `None` when the rate vanishes.
    pub fn lifetime(&self) -> Option<f64> {
        if self.gamma > 0.0 {
            Some(1.0 / self.gamma)
        } else {
            None
        }
    }
}

/// A row of the CSV export.
#[derive(Serialize)]
struct CsvRow {
    lower: String,
    lower_mj: f64,
    upper: String,
    upper_mj: f64,
    delta: f64,
    dipole: f64,
    q: i32,
    gamma: f64,
    linewidth: f64,
    doppler: f64,
}

impl From<&Transition> for CsvRow {
    fn from(t: &Transition) -> Self {
        CsvRow {
            lower: t.lower.level().to_string(),
            lower_mj: t.lower.mj(),
            upper: t.upper.level().to_string(),
            upper_mj: t.upper.mj(),
            delta: t.delta,
            dipole: t.dipole,
            q: t.polarization.q(),
            gamma: t.gamma,
            linewidth: t.linewidth,
            doppler: t.doppler,
        }
    }
}

/// Transitions of one analysis run, in insertion order and keyed by their state pair.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rows: Vec<Transition>,
    index: HashMap<(QuantumState, QuantumState), usize>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TransitionTable {
            rows: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Appends a transition.
    ///
    /// Fails if the transition is not stored canonically, or if its pair is already present.
    pub fn insert(&mut self, transition: Transition) -> Result<(), TableError> {
        let (lower, upper) = transition.key();
        if lower.l() >= upper.l() {
            return Err(TableError::NotCanonical { lower, upper });
        }
        if self.index.contains_key(&(lower, upper)) {
            return Err(TableError::Duplicate { lower, upper });
        }
        self.index.insert((lower, upper), self.rows.len());
        self.rows.push(transition);
        Ok(())
    }

    /// Looks up the transition between two states, given in either order.
    pub fn get(&self, a: &QuantumState, b: &QuantumState) -> Option<&Transition> {
        self.index
            .get(&(*a, *b))
            .or_else(|| self.index.get(&(*b, *a)))
            .map(|&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.rows.iter()
    }

    /// The transitions, in insertion order.
    pub fn rows(&self) -> &[Transition] {
        &self.rows
    }

    /// Writes the table as CSV, one row per transition.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        for transition in &self.rows {
            writer.serialize(CsvRow::from(transition))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TransitionTable {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
