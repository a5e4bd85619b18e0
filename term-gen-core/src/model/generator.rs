use std::collections::HashSet;

use log::trace;
use rand::Rng;

use crate::error::GenerationError;
use super::generator_config::GeneratorConfig;
use super::raw_model::RawModel;
use super::weighted_model::WeightedModel;

/// Term count used when no term count can be sampled.
pub const DEFAULT_TERM_COUNT: usize = 1;

/// Term length used when no term length can be sampled.
pub const DEFAULT_TERM_LENGTH: usize = 6;

/// High-level interface: train once, then generate sequences.
///
/// # Responsibilities
/// - Build a `RawModel` and derive its `WeightedModel`
/// - Generate sequences term by term, unit by unit
/// - Keep the normalized training sequences so callers can filter out copies
///
/// # Invariants
/// - The models are never mutated after construction, so a `Generator`
///   can be shared across threads behind a plain reference
#[derive(Clone, Debug)]
pub struct Generator {
	raw: RawModel,
	weighted: WeightedModel,
	/// Lowercased training sequences, terms joined by a single space.
	known: HashSet<String>,
}

impl Generator {
	/// Trains a generator with the default configuration.
	pub fn train<I, S>(sources: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::with_config(sources, &GeneratorConfig::default())
	}

	/// Trains a generator with a custom configuration.
	///
	/// # Notes
	/// - Never fails: degenerate sources produce an empty model, and the
	///   failure is reported by `generate` instead.
	pub fn with_config<I, S>(sources: I, config: &GeneratorConfig) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let sources: Vec<S> = sources.into_iter().collect();
		let raw = RawModel::train(&sources);
		let weighted = config.weighting().apply(&raw);
		let known = sources
			.iter()
			.map(|source| Self::normalize(source.as_ref()))
			.filter(|source| !source.is_empty())
			.collect();

		Self { raw, weighted, known }
	}

	/// Raw counts, as observed in the training data.
	pub fn raw(&self) -> &RawModel {
		&self.raw
	}

	/// Re-weighted model used for sampling.
	pub fn weighted(&self) -> &WeightedModel {
		&self.weighted
	}

	/// Returns `true` if `sequence` matches a training sequence.
	///
	/// Comparison is case-insensitive and ignores whitespace differences.
	pub fn is_known(&self, sequence: &str) -> bool {
		self.known.contains(&Self::normalize(sequence))
	}

	/// Canonical form used to compare sequences: lowercased, terms joined
	/// by a single space.
	pub fn normalize(sequence: &str) -> String {
		sequence
			.split_whitespace()
			.map(str::to_lowercase)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Generates one sequence using the thread-local random source.
	///
	/// # Errors
	/// See `generate_with`.
	pub fn generate(&self) -> Result<String, GenerationError> {
		self.generate_with(&mut rand::rng())
	}

	/// Generates one sequence drawing from `rng`.
	///
	/// The same model and the same stream of draws always give the same
	/// sequence.
	///
	/// # Behavior
	/// - Draws a term count (1 if none can be drawn).
	/// - For each term, draws a target length (6 if none can be drawn) and an
	///   initial unit, then grows the term one transition at a time.
	/// - A term stops growing early when the previous unit has no usable
	///   transition; this is not an error.
	///
	/// # Errors
	/// - `NoInitialUnit` if no initial unit can be drawn.
	/// - `EmptyTermLength` if the drawn length is zero.
	///
	/// Terms already produced by this call are discarded on error.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
		let term_count = self.weighted.sample_term_count(rng).unwrap_or(DEFAULT_TERM_COUNT);

		let mut terms = Vec::with_capacity(term_count);
		for _ in 0..term_count {
			terms.push(self.generate_term(rng)?);
		}
		Ok(terms.join(" "))
	}

	/// Generates a single term.
	fn generate_term<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
		let length = self.weighted.sample_term_length(rng).unwrap_or(DEFAULT_TERM_LENGTH);
		let initial = self
			.weighted
			.sample_initial_unit(rng)
			.map_err(|_| GenerationError::NoInitialUnit)?;
		if length == 0 {
			return Err(GenerationError::EmptyTermLength);
		}

		let mut term = String::from(initial);
		let mut previous = initial;
		let mut current_length = 1;
		while current_length < length {
			match self.weighted.sample_next_unit(previous, rng) {
				Ok(unit) => {
					term.push(unit);
					previous = unit;
					current_length += 1;
				}
				Err(miss) => {
					trace!("term {term:?} stopped at {current_length}/{length} units: {miss:?} after {previous:?}");
					break;
				}
			}
		}
		Ok(term)
	}

	/// Generates `count` sequences using the thread-local random source.
	///
	/// # Errors
	/// See `generate_list_with`.
	pub fn generate_list(&self, count: i64) -> Result<Vec<String>, GenerationError> {
		self.generate_list_with(count, &mut rand::rng())
	}

	/// Generates `count` sequences drawing from `rng`.
	///
	/// # Behavior
	/// - A negative or zero `count` gives an empty list.
	/// - Results are not deduplicated.
	///
	/// # Errors
	/// The first failing draw aborts the whole batch. Callers needing partial
	/// results should call `generate_with` themselves.
	pub fn generate_list_with<R: Rng + ?Sized>(
		&self,
		count: i64,
		rng: &mut R,
	) -> Result<Vec<String>, GenerationError> {
		let count = usize::try_from(count).unwrap_or(0);
		(0..count).map(|_| self.generate_with(rng)).collect()
	}
}
