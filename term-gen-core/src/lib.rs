//! Character-level term generation library.
//!
//! This crate learns a first-order Markov chain over the characters of a
//! set of example sequences, then synthesizes new, plausible-looking
//! sequences from it:
//! - Raw frequency collection (term counts, term lengths, initial units,
//!   unit transitions)
//! - Super-linear re-weighting of the counts (`floor(c^1.3)` by default)
//! - Cumulative-weight sampling, term by term and unit by unit
//! - Training-data I/O helpers

/// Models, weighting and generation.
pub mod model;

/// Error types for configuration and generation.
pub mod error;

/// I/O utilities (training file loading, path helpers).
pub mod io;
