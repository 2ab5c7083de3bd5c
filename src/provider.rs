//! Sources of atomic structure data.
//!
//! The level energies and dipole matrix elements of a species are supplied by an external
//! model, abstracted here as an [AtomicDataProvider]. Queries are pure functions of their
//! arguments, so they are memoized for the duration of a run by [Memoized].

use crate::error::{DataError, LookupError};
use crate::selection::Polarization;
use crate::state::{Level, QuantumState};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};

/// Supplies level energies and dipole matrix elements for one atomic species.
pub trait AtomicDataProvider {
    /// Energy of a fine-structure level, in eV.
    fn energy(&self, level: Level) -> Result<f64, LookupError>;

    /// Dipole matrix element `<a| d_q |b>`, in atomic units of e a0.
    fn dipole_matrix_element(
        &self,
        a: &QuantumState,
        b: &QuantumState,
        q: Polarization,
    ) -> Result<f64, LookupError>;
}

impl<P> AtomicDataProvider for &P
where
    P: AtomicDataProvider + ?Sized,
{
    fn energy(&self, level: Level) -> Result<f64, LookupError> {
        (**self).energy(level)
    }

    fn dipole_matrix_element(
        &self,
        a: &QuantumState,
        b: &QuantumState,
        q: Polarization,
    ) -> Result<f64, LookupError> {
        (**self).dipole_matrix_element(a, b, q)
    }
}

/// Counts of provider queries made through a [Memoized] wrapper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    /// Energy queries forwarded to the wrapped provider.
    pub energy_queries: usize,
    /// Dipole queries forwarded to the wrapped provider.
    pub dipole_queries: usize,
    /// Queries answered from the memo.
    pub hits: usize,
}

type DipoleKey = (QuantumState, QuantumState, Polarization);

/// Memoizes the queries made to a provider.
///
/// Only successful lookups are stored; a failed query is forwarded again if repeated.
pub struct Memoized<P> {
    inner: P,
    energies: RefCell<HashMap<Level, f64>>,
    dipoles: RefCell<HashMap<DipoleKey, f64>>,
    stats: Cell<MemoStats>,
}

impl<P> Memoized<P>
where
    P: AtomicDataProvider,
{
    pub fn new(inner: P) -> Self {
        Memoized {
            inner,
            energies: RefCell::new(HashMap::new()),
            dipoles: RefCell::new(HashMap::new()),
            stats: Cell::new(MemoStats::default()),
        }
    }

    pub fn stats(&self) -> MemoStats {
        self.stats.get()
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn record(&self, update: impl FnOnce(&mut MemoStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

impl<P> AtomicDataProvider for Memoized<P>
where
    P: AtomicDataProvider,
{
    fn energy(&self, level: Level) -> Result<f64, LookupError> {
        if let Some(&energy) = self.energies.borrow().get(&level) {
            self.record(|s| s.hits += 1);
            return Ok(energy);
        }
        self.record(|s| s.energy_queries += 1);
        let energy = self.inner.energy(level)?;
        self.energies.borrow_mut().insert(level, energy);
        Ok(energy)
    }

    fn dipole_matrix_element(
        &self,
        a: &QuantumState,
        b: &QuantumState,
        q: Polarization,
    ) -> Result<f64, LookupError> {
        let key = (*a, *b, q);
        if let Some(&dipole) = self.dipoles.borrow().get(&key) {
            self.record(|s| s.hits += 1);
            return Ok(dipole);
        }
        self.record(|s| s.dipole_queries += 1);
        let dipole = self.inner.dipole_matrix_element(a, b, q)?;
        self.dipoles.borrow_mut().insert(key, dipole);
        Ok(dipole)
    }
}

/// A tabulated level energy, as stored in atomic data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Spectroscopic label, e.g. `6p1.5`.
    pub state: String,
    /// Energy in eV.
    pub energy: f64,
}

/// A tabulated dipole matrix element, as stored in atomic data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DipoleRecord {
    pub lower: String,
    pub lower_mj: f64,
    pub upper: String,
    pub upper_mj: f64,
    pub q: i32,
    /// Matrix element in e a0.
    pub value: f64,
}

/// Contents of an atomic data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomicData {
    pub levels: Vec<LevelRecord>,
    pub dipoles: Vec<DipoleRecord>,
}

/// An in-memory provider backed by tables of energies and dipole matrix elements.
///
/// A dipole element tabulated for `a -> b` with index `q` also answers the reverse query
/// `b -> a` with index `-q`, with the phase `(-1)^q` of the hermitian conjugate.
#[derive(Debug, Clone, Default)]
pub struct TabulatedAtom {
    energies: HashMap<Level, f64>,
    dipoles: HashMap<DipoleKey, f64>,
}

impl TabulatedAtom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_level(&mut self, level: Level, energy: f64) {
        self.energies.insert(level, energy);
    }

    pub fn insert_dipole(
        &mut self,
        a: QuantumState,
        b: QuantumState,
        q: Polarization,
        value: f64,
    ) {
        self.dipoles.insert((a, b, q), value);
    }

    /// Number of tabulated levels.
    pub fn level_count(&self) -> usize {
        self.energies.len()
    }

    /// Builds a provider from the contents of an atomic data file.
    pub fn from_data(data: AtomicData) -> Result<Self, DataError> {
        let mut atom = TabulatedAtom::new();
        for record in data.levels {
            atom.insert_level(record.state.parse()?, record.energy);
        }
        for record in data.dipoles {
            let lower = sublevel(&record.lower, record.lower_mj)?;
            let upper = sublevel(&record.upper, record.upper_mj)?;
            let q = Polarization::from_q(record.q).ok_or(DataError::Polarization(record.q))?;
            atom.insert_dipole(lower, upper, q, record.value);
        }
        Ok(atom)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, DataError> {
        TabulatedAtom::from_data(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, DataError> {
        TabulatedAtom::from_data(serde_json::from_str(input)?)
    }

    fn check_domain(level: Level) -> Result<(), LookupError> {
        if level.l() >= level.n() {
            return Err(LookupError::InvalidState(level));
        }
        Ok(())
    }
}

fn sublevel(label: &str, mj: f64) -> Result<QuantumState, DataError> {
    let level: Level = label.parse()?;
    level.sublevel(mj).map_err(|source| {
        DataError::State(crate::error::ParseStateError::State {
            input: format!("{} mj={}", label, mj),
            source,
        })
    })
}

impl AtomicDataProvider for TabulatedAtom {
    fn energy(&self, level: Level) -> Result<f64, LookupError> {
        TabulatedAtom::check_domain(level)?;
        self.energies
            .get(&level)
            .copied()
            .ok_or(LookupError::MissingLevel(level))
    }

    fn dipole_matrix_element(
        &self,
        a: &QuantumState,
        b: &QuantumState,
        q: Polarization,
    ) -> Result<f64, LookupError> {
        TabulatedAtom::check_domain(a.level())?;
        TabulatedAtom::check_domain(b.level())?;
        if let Some(&value) = self.dipoles.get(&(*a, *b, q)) {
            return Ok(value);
        }
        if let Some(&value) = self.dipoles.get(&(*b, *a, q.reversed())) {
            let phase = if q.q() % 2 == 0 { 1.0 } else { -1.0 };
            return Ok(phase * value);
        }
        Err(LookupError::MissingDipole {
            lower: *a,
            upper: *b,
            q: q.q(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(label: &str, mj: f64) -> QuantumState {
        sublevel(label, mj).unwrap()
    }

    const CAESIUM_YAML: &str = r#"
levels:
  - state: 6s0.5
    energy: -3.8939
  - state: 6p1.5
    energy: -2.3392
dipoles:
  - lower: 6s0.5
    lower_mj: 0.5
    upper: 6p1.5
    upper_mj: 1.5
    q: 1
    value: 4.4786
"#;

    #[test]
    fn test_tabulated_lookups() {
        let atom = TabulatedAtom::from_yaml_str(CAESIUM_YAML).unwrap();
        assert_eq!(atom.level_count(), 2);
        assert_eq!(atom.energy("6s0.5".parse().unwrap()), Ok(-3.8939));

        let ground = state("6s0.5", 0.5);
        let excited = state("6p1.5", 1.5);
        assert_eq!(
            atom.dipole_matrix_element(&ground, &excited, Polarization::SigmaPlus),
            Ok(4.4786)
        );
        assert_eq!(
            atom.dipole_matrix_element(&excited, &ground, Polarization::SigmaMinus),
            Ok(-4.4786)
        );
    }

    #[test]
    fn test_lookup_failures() {
        let atom = TabulatedAtom::from_yaml_str(CAESIUM_YAML).unwrap();
        let missing: Level = "7s0.5".parse().unwrap();
        assert_eq!(atom.energy(missing), Err(LookupError::MissingLevel(missing)));

        let unphysical = Level::new(2, 2, 2.5).unwrap();
        assert_eq!(
            atom.energy(unphysical),
            Err(LookupError::InvalidState(unphysical))
        );

        let ground = state("6s0.5", 0.5);
        let excited = state("6p1.5", 0.5);
        assert!(matches!(
            atom.dipole_matrix_element(&ground, &excited, Polarization::Pi),
            Err(LookupError::MissingDipole { q: 0, .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let atom = TabulatedAtom::from_json_str(
            r#"{"levels": [{"state": "6s0.5", "energy": -3.8939}]}"#,
        )
        .unwrap();
        assert_eq!(atom.level_count(), 1);
    }

    #[test]
    fn test_bad_data_is_rejected() {
        assert!(matches!(
            TabulatedAtom::from_yaml_str("levels:\n  - state: 6x0.5\n    energy: 1.0\n"),
            Err(DataError::State(_))
        ));
        let bad_q = CAESIUM_YAML.replace("q: 1", "q: 2");
        assert!(matches!(
            TabulatedAtom::from_yaml_str(&bad_q),
            Err(DataError::Polarization(2))
        ));
    }

    /// Counts every query forwarded to it.
    struct Counting {
        atom: TabulatedAtom,
        calls: Cell<usize>,
    }

    impl AtomicDataProvider for Counting {
        fn energy(&self, level: Level) -> Result<f64, LookupError> {
            self.calls.set(self.calls.get() + 1);
            self.atom.energy(level)
        }

        fn dipole_matrix_element(
            &self,
            a: &QuantumState,
            b: &QuantumState,
            q: Polarization,
        ) -> Result<f64, LookupError> {
            self.calls.set(self.calls.get() + 1);
            self.atom.dipole_matrix_element(a, b, q)
        }
    }

    #[test]
    fn test_memoized_forwards_each_query_once() {
        let counting = Counting {
            atom: TabulatedAtom::from_yaml_str(CAESIUM_YAML).unwrap(),
            calls: Cell::new(0),
        };
        let memo = Memoized::new(&counting);
        let level: Level = "6s0.5".parse().unwrap();
        let ground = state("6s0.5", 0.5);
        let excited = state("6p1.5", 1.5);
        for _ in 0..5 {
            memo.energy(level).unwrap();
            memo.dipole_matrix_element(&ground, &excited, Polarization::SigmaPlus)
                .unwrap();
        }
        assert_eq!(counting.calls.get(), 2);
        assert_eq!(
            memo.stats(),
            MemoStats {
                energy_queries: 1,
                dipole_queries: 1,
                hits: 8
            }
        );
    }

    #[test]
    fn test_memoized_does_not_store_failures() {
        let counting = Counting {
            atom: TabulatedAtom::new(),
            calls: Cell::new(0),
        };
        let memo = Memoized::new(&counting);
        let level: Level = "6s0.5".parse().unwrap();
        assert!(memo.energy(level).is_err());
        assert!(memo.energy(level).is_err());
        assert_eq!(counting.calls.get(), 2);
    }
}
