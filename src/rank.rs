//! Ranking of transitions by spectral proximity.
//!
//! Used to find which unintended transitions lie close to a driving laser, or which
//! transition most likely produced an observed line.

use crate::constant::PhysicalConstants;
use crate::transition::{Transition, TransitionTable};
use crate::units;

/// A transition together with its distance from a reference frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub transition: &'a Transition,
    /// `||delta| - |reference||`, MHz.
    pub deviation: f64,
}

/// Sorts the transitions of a table by `||delta| - |reference_delta||`, nearest first.
///
/// Transitions at equal distance keep their order in the table. The table is not modified.
pub fn compare_transitions(reference_delta: f64, table: &TransitionTable) -> Vec<Ranked<'_>> {
    let reference = reference_delta.abs();
    let mut ranked: Vec<Ranked<'_>> = table
        .iter()
        .map(|transition| Ranked {
            transition,
            deviation: (transition.delta.abs() - reference).abs(),
        })
        .collect();
    ranked.sort_by(|a, b| a.deviation.total_cmp(&b.deviation));
    ranked
}

/// Ranks the transitions of a table by proximity to light of the given wavelength, in nm.
///
/// Returns `None` for a zero wavelength.
pub fn nearest_to_wavelength<'a>(
    wavelength_nm: f64,
    table: &'a TransitionTable,
    constants: &PhysicalConstants,
) -> Option<Vec<Ranked<'a>>> {
    let frequency = units::wavelength_to_frequency(wavelength_nm, constants.c)?;
    Some(compare_transitions(frequency, table))
}
