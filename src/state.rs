//! Atomic quantum numbers.
//!
//! The half-integer quantum numbers `j` and `mj` are stored doubled, as integers, so that
//! every comparison made while enumerating states or applying selection rules is exact.
//! They are only converted to `f64` at the API boundary.

use crate::error::StateError;
use crate::spectroscopic;
use std::fmt;

/// Converts a half-integer value into its doubled integer representation.
fn doubled(name: &'static str, value: f64) -> Result<i64, StateError> {
    let twice = value * 2.0;
    if !twice.is_finite() || twice.fract() != 0.0 || twice.abs() > i32::MAX as f64 {
        return Err(StateError::NotHalfInteger { name, value });
    }
    Ok(twice as i64)
}

/// A fine-structure level `(n, l, j)`, degenerate in `mj`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level {
    n: u32,
    l: u32,
    two_j: u32,
}

impl Level {
    /// Creates a level from half-integer `j`.
    pub fn new(n: u32, l: u32, j: f64) -> Result<Self, StateError> {
        let two_j = doubled("j", j)?;
        if two_j < 0 {
            return Err(StateError::InvalidJ { l, j });
        }
        Level::from_doubled(n, l, two_j as u32)
    }

    /// Creates a level from `2j`.
    pub fn from_doubled(n: u32, l: u32, two_j: u32) -> Result<Self, StateError> {
        if n == 0 {
            return Err(StateError::ZeroPrincipal);
        }
        let two_l = 2 * i64::from(l);
        if (i64::from(two_j) - two_l).abs() != 1 {
            return Err(StateError::InvalidJ {
                l,
                j: f64::from(two_j) / 2.0,
            });
        }
        Ok(Level { n, l, two_j })
    }

    pub(crate) fn new_unchecked(n: u32, l: u32, two_j: u32) -> Self {
        debug_assert!(n >= 1 && (2 * l as i64 - two_j as i64).abs() == 1);
        Level { n, l, two_j }
    }

    /// Principal quantum number.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Orbital angular momentum quantum number.
    pub fn l(&self) -> u32 {
        self.l
    }

    /// Total angular momentum quantum number.
    pub fn j(&self) -> f64 {
        f64::from(self.two_j) / 2.0
    }

    /// `2j`, exact.
    pub fn two_j(&self) -> u32 {
        self.two_j
    }

    /// Degeneracy `2j + 1` of the level.
    pub fn degeneracy(&self) -> u32 {
        self.two_j + 1
    }

    /// Returns the magnetic sublevel `mj` of this level.
    pub fn sublevel(&self, mj: f64) -> Result<QuantumState, StateError> {
        QuantumState::new(self.n, self.l, self.j(), mj)
    }

    /// Iterates over the sublevels of this level, in ascending `mj`.
    pub fn sublevels(&self) -> impl Iterator<Item = QuantumState> {
        let level = *self;
        let two_j = self.two_j as i32;
        (0..=two_j).map(move |k| QuantumState {
            level,
            two_mj: 2 * k - two_j,
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match spectroscopic::build_state_str(self) {
            Some(label) => f.write_str(&label),
            None => write!(f, "({}, {}, {})", self.n, self.l, self.j()),
        }
    }
}

/// A single atomic state `(n, l, j, mj)`.
///
/// The derived ordering is the enumeration order: `n`, then `l`, then `j`, then `mj`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuantumState {
    level: Level,
    two_mj: i32,
}

impl QuantumState {
    /// Creates a state from half-integer `j` and `mj`.
    pub fn new(n: u32, l: u32, j: f64, mj: f64) -> Result<Self, StateError> {
        let level = Level::new(n, l, j)?;
        let two_mj = doubled("mj", mj)?;
        QuantumState::from_level(level, two_mj as i32)
    }

    /// Creates a state from `2j` and `2mj`.
    pub fn from_doubled(n: u32, l: u32, two_j: u32, two_mj: i32) -> Result<Self, StateError> {
        QuantumState::from_level(Level::from_doubled(n, l, two_j)?, two_mj)
    }

    fn from_level(level: Level, two_mj: i32) -> Result<Self, StateError> {
        let two_j = level.two_j as i32;
        if two_mj.abs() > two_j || (two_j - two_mj) % 2 != 0 {
            return Err(StateError::InvalidMj {
                j: level.j(),
                mj: f64::from(two_mj) / 2.0,
            });
        }
        Ok(QuantumState { level, two_mj })
    }

    pub(crate) fn new_unchecked(n: u32, l: u32, two_j: u32, two_mj: i32) -> Self {
        debug_assert!(two_mj.abs() <= two_j as i32);
        QuantumState {
            level: Level::new_unchecked(n, l, two_j),
            two_mj,
        }
    }

    /// The `(n, l, j)` level this state belongs to.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn n(&self) -> u32 {
        self.level.n
    }

    pub fn l(&self) -> u32 {
        self.level.l
    }

    pub fn j(&self) -> f64 {
        self.level.j()
    }

    pub fn mj(&self) -> f64 {
        f64::from(self.two_mj) / 2.0
    }

    pub fn two_j(&self) -> u32 {
        self.level.two_j
    }

    pub fn two_mj(&self) -> i32 {
        self.two_mj
    }

    /// The quantum numbers as `(n, l, j, mj)`.
    pub fn as_tuple(&self) -> (u32, u32, f64, f64) {
        (self.n(), self.l(), self.j(), self.mj())
    }
}

impl From<QuantumState> for Level {
    fn from(state: QuantumState) -> Self {
        state.level
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mj={}", self.level, self.mj())
    }
}
