//! Enumeration of the atomic states within a range of principal and orbital quantum numbers.
//!
//! States are produced lazily in a fixed order: `n` ascending, then `l`, then `j`
//! (`l - 1/2` before `l + 1/2`), then `mj` from `-j` to `j`. The orbital quantum number is
//! bounded by both `lmax` and the physical limit `l <= n - 1`.

use crate::state::{Level, QuantumState};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Whether magnetic sublevels are expanded during enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SublevelOption {
    /// Every `mj` from `-j` to `j` is produced.
    Enabled,
    /// One state per level is produced, with `mj = j`.
    Disabled,
}

impl Default for SublevelOption {
    fn default() -> Self {
        SublevelOption::Enabled
    }
}

/// Bounds of the state space to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSpace {
    /// Smallest principal quantum number (inclusive).
    pub nmin: u32,
    /// Largest principal quantum number (inclusive).
    pub nmax: u32,
    /// Largest orbital quantum number (inclusive).
    pub lmax: u32,
    pub sublevels: SublevelOption,
}

impl Default for StateSpace {
    fn default() -> Self {
        StateSpace {
            nmin: 6,
            nmax: 70,
            lmax: 1,
            sublevels: SublevelOption::Enabled,
        }
    }
}

impl StateSpace {
    pub fn new(nmin: u32, nmax: u32, lmax: u32, sublevels: SublevelOption) -> Self {
        StateSpace {
            nmin,
            nmax,
            lmax,
            sublevels,
        }
    }

    /// Iterates over every state in the space. Each call starts a fresh iteration.
    pub fn states(&self) -> States {
        States {
            space: *self,
            cursor: Cursor::Start,
        }
    }

    /// Iterates over the `(n, l, j)` levels in the space, regardless of the sublevel option.
    pub fn levels(&self) -> impl Iterator<Item = Level> {
        let space = StateSpace {
            sublevels: SublevelOption::Disabled,
            ..*self
        };
        space.states().map(|state| state.level())
    }

    /// Number of states the enumeration produces.
    pub fn len(&self) -> usize {
        let nmin = self.nmin.max(1);
        if nmin > self.nmax {
            return 0;
        }
        (nmin..=self.nmax)
            .map(|n| {
                let l_top = self.lmax.min(n - 1) as usize;
                match self.sublevels {
                    // sum over l of (2l) + (2l + 2) sublevels, less the absent j = -1/2 for l = 0
                    SublevelOption::Enabled => 2 * (l_top + 1) * (l_top + 1),
                    SublevelOption::Disabled => 2 * l_top + 1,
                }
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn l_bound(&self, n: u32) -> u32 {
        self.lmax.min(n - 1)
    }

    fn expand(&self) -> bool {
        self.sublevels == SublevelOption::Enabled
    }

    /// First `2mj` of a level with `2j`.
    fn first_two_mj(&self, two_j: u32) -> i32 {
        if self.expand() {
            -(two_j as i32)
        } else {
            two_j as i32
        }
    }

    fn first(&self) -> Option<QuantumState> {
        let n = self.nmin.max(1);
        if n > self.nmax {
            return None;
        }
        Some(QuantumState::new_unchecked(n, 0, 1, self.first_two_mj(1)))
    }

    /// The state following `state`, or `None` once the space is exhausted.
    fn successor(&self, state: &QuantumState) -> Option<QuantumState> {
        let (n, l, two_j, two_mj) = (state.n(), state.l(), state.two_j(), state.two_mj());

        if self.expand() && two_mj < two_j as i32 {
            return Some(QuantumState::new_unchecked(n, l, two_j, two_mj + 2));
        }
        if two_j < 2 * l + 1 {
            let two_j = two_j + 2;
            return Some(QuantumState::new_unchecked(n, l, two_j, self.first_two_mj(two_j)));
        }
        if l < self.l_bound(n) {
            let l = l + 1;
            let two_j = 2 * l - 1;
            return Some(QuantumState::new_unchecked(n, l, two_j, self.first_two_mj(two_j)));
        }
        if n < self.nmax {
            return Some(QuantumState::new_unchecked(n + 1, 0, 1, self.first_two_mj(1)));
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Start,
    At(QuantumState),
    Done,
}

/// Lazy iterator over the states of a [StateSpace].
#[derive(Debug, Clone)]
pub struct States {
    space: StateSpace,
    cursor: Cursor,
}

impl Iterator for States {
    type Item = QuantumState;

    fn next(&mut self) -> Option<QuantumState> {
        let next = match self.cursor {
            Cursor::Start => self.space.first(),
            Cursor::At(ref state) => self.space.successor(state),
            Cursor::Done => None,
        };
        self.cursor = match next {
            Some(state) => Cursor::At(state),
            None => Cursor::Done,
        };
        next
    }
}

impl FusedIterator for States {}
