//! Integration tests for the transition table
//!
//! Builds tables for a caesium-like atom whose energies follow the Rydberg formula with
//! quantum defects, and checks the table against the selection rules and the ranking.
