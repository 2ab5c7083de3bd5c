//! End-to-end tests of the enumeration, selection and table building stages.
pub mod transition_table;
