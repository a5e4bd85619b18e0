use thiserror::Error;

/// Errors raised by `Generator::generate` and friends.
///
/// Sampling misses inside a term (unknown transition, zero-weight category)
/// are not errors; they only end the growth of that term.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
	#[error("cannot produce a sequence: no initial unit can be sampled")]
	NoInitialUnit,

	#[error("cannot produce a sequence: sampled term length is not positive")]
	EmptyTermLength,
}

/// Errors raised while building a generator configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
	#[error("re-weighting exponent must be finite and positive, got {0}")]
	InvalidExponent(f64),
}
