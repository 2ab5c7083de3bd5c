//! Spectroscopic notation for fine-structure levels, e.g. `6s0.5` or `34d2.5`.
//!
//! The grammar is `<n><orbital letter><j>`, with orbital letters `s p d f g h i k` for
//! `l = 0..7`. Parsing is strict: `n` has no leading zeros and `j` is written as
//! `<integer>.5`, so building a string from a parsed level always returns the input.

use crate::error::ParseStateError;
use crate::state::Level;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

/// Orbital letters indexed by `l`.
pub const ORBITAL_LETTERS: [char; 8] = ['s', 'p', 'd', 'f', 'g', 'h', 'i', 'k'];

static STATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([1-9][0-9]*)([spdfghik])([0-9]+)\.5$").expect("state pattern is valid")
});

/// Orbital quantum number for a spectroscopic letter.
pub fn orbital_number(letter: char) -> Option<u32> {
    ORBITAL_LETTERS
        .iter()
        .position(|&c| c == letter)
        .map(|l| l as u32)
}

/// Spectroscopic letter for an orbital quantum number.
pub fn orbital_letter(l: u32) -> Option<char> {
    ORBITAL_LETTERS.get(l as usize).copied()
}

/// Parses a spectroscopic state string into its level.
pub fn parse_spec_state(input: &str) -> Result<Level, ParseStateError> {
    let format_error = || ParseStateError::Format(input.to_string());
    let captures = STATE_PATTERN.captures(input).ok_or_else(format_error)?;

    let n: u32 = captures[1].parse().map_err(|_| format_error())?;
    let l = captures[2]
        .chars()
        .next()
        .and_then(orbital_number)
        .ok_or_else(format_error)?;
    let j_floor: u32 = captures[3].parse().map_err(|_| format_error())?;
    let two_j = j_floor
        .checked_mul(2)
        .and_then(|v| v.checked_add(1))
        .ok_or_else(format_error)?;

    Level::from_doubled(n, l, two_j).map_err(|source| ParseStateError::State {
        input: input.to_string(),
        source,
    })
}

/// Builds the spectroscopic string of a level. Levels with `l > 7` have no letter.
pub fn build_state_str(level: &Level) -> Option<String> {
    let letter = orbital_letter(level.l())?;
    Some(format!("{}{}{}.5", level.n(), letter, level.two_j() / 2))
}

impl FromStr for Level {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spec_state(s)
    }
}
