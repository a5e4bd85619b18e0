use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use super::category::{Category, FixedCategory};
use super::frequency_map::FrequencyMap;

/// Raw observation counts learned from a set of source sequences.
///
/// A `RawModel` holds the three fixed categories and one transition table per
/// character that was ever followed by another character inside a term
/// (a first-order Markov chain over characters).
///
/// # Responsibilities
/// - Tokenize source sequences into whitespace-delimited terms
/// - Count term counts, term lengths, initial units and unit transitions
///
/// # Invariants
/// - Every count is >= 1
/// - A source sequence without any term contributes nothing
/// - The model is never modified once `train` returns
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawModel {
	/// Number of terms per source sequence.
	term_count: FrequencyMap<usize>,
	/// Character length of each term.
	term_length: FrequencyMap<usize>,
	/// First character of each term.
	initial_unit: FrequencyMap<char>,
	/// Mapping from a character to the characters observed right after it.
	transitions: BTreeMap<char, FrequencyMap<char>>,
	/// Number of source sequences that contributed at least one term.
	source_count: usize,
}

impl RawModel {
	/// Builds a raw model from a collection of source sequences.
	///
	/// # Notes
	/// - Never fails: empty or whitespace-only sources are skipped, and an
	///   empty collection yields an empty model.
	/// - Terms are split on runs of Unicode whitespace.
	pub fn train<I, S>(sources: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut model = Self::default();
		for source in sources {
			model.add_source(source.as_ref());
		}

		debug!(
			"trained raw model: {} sources, {} distinct lengths, {} initial units, {} transition categories",
			model.source_count,
			model.term_length.len(),
			model.initial_unit.len(),
			model.transitions.len()
		);
		model
	}

	/// Adds one source sequence to the counts.
	fn add_source(&mut self, source: &str) {
		let terms: Vec<&str> = source.split_whitespace().collect();
		if terms.is_empty() {
			return;
		}

		self.source_count += 1;
		self.term_count.record(terms.len());
		for term in terms {
			self.add_term(term);
		}
	}

	/// Adds one term: its length, its first unit, then each transition.
	///
	/// A single-character term only contributes a length and an initial unit.
	fn add_term(&mut self, term: &str) {
		let mut units = term.chars();
		let Some(first) = units.next() else {
			return;
		};

		self.term_length.record(term.chars().count());
		self.initial_unit.record(first);

		let mut previous = first;
		for unit in units {
			self.transitions.entry(previous).or_default().record(unit);
			previous = unit;
		}
	}

	/// Term-count observations.
	pub fn term_count(&self) -> &FrequencyMap<usize> {
		&self.term_count
	}

	/// Term-length observations.
	pub fn term_length(&self) -> &FrequencyMap<usize> {
		&self.term_length
	}

	/// Initial-unit observations.
	pub fn initial_unit(&self) -> &FrequencyMap<char> {
		&self.initial_unit
	}

	/// Transition observations out of `previous`, if it was ever followed by a unit.
	pub fn transitions(&self, previous: char) -> Option<&FrequencyMap<char>> {
		self.transitions.get(&previous)
	}

	/// Iterates over every transition table, ordered by source character.
	pub fn transition_tables(&self) -> impl Iterator<Item = (char, &FrequencyMap<char>)> {
		self.transitions.iter().map(|(unit, table)| (*unit, table))
	}

	/// Number of source sequences that contributed at least one term.
	pub fn source_count(&self) -> usize {
		self.source_count
	}

	/// Returns `true` if no term was ever observed.
	pub fn is_empty(&self) -> bool {
		self.source_count == 0
	}

	/// Every category holding at least one observation.
	pub fn categories(&self) -> Vec<Category> {
		let fixed = FixedCategory::ALL
			.into_iter()
			.filter(|fixed| match fixed {
				FixedCategory::TermCount => !self.term_count.is_empty(),
				FixedCategory::TermLength => !self.term_length.is_empty(),
				FixedCategory::InitialUnit => !self.initial_unit.is_empty(),
			})
			.map(Category::Fixed);
		let transitions = self.transitions.keys().map(|unit| Category::Transition(*unit));
		fixed.chain(transitions).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_terms_lengths_and_initials() {
		let model = RawModel::train(["Ada Lovelace", "Alan", "  Alan  "]);

		assert_eq!(model.source_count(), 3);
		assert_eq!(model.term_count().get(&2), Some(1));
		assert_eq!(model.term_count().get(&1), Some(2));
		assert_eq!(model.term_length().get(&3), Some(1));
		assert_eq!(model.term_length().get(&8), Some(1));
		assert_eq!(model.term_length().get(&4), Some(2));
		assert_eq!(model.initial_unit().get(&'A'), Some(3));
		assert_eq!(model.initial_unit().get(&'L'), Some(1));
	}

	#[test]
	fn counts_transitions_within_terms_only() {
		let model = RawModel::train(["ab ba"]);

		assert_eq!(model.transitions('a').and_then(|t| t.get(&'b')), Some(1));
		assert_eq!(model.transitions('b').and_then(|t| t.get(&'a')), Some(1));
		// No transition across the space between terms
		assert_eq!(model.transitions('b').and_then(|t| t.get(&'b')), None);
		assert_eq!(model.transition_tables().count(), 2);
	}

	#[test]
	fn single_unit_term_has_no_transition() {
		let model = RawModel::train(["x"]);

		assert_eq!(model.term_length().get(&1), Some(1));
		assert_eq!(model.initial_unit().get(&'x'), Some(1));
		assert!(model.transitions('x').is_none());
	}

	#[test]
	fn final_units_do_not_open_categories() {
		let model = RawModel::train(["cat"]);

		assert!(model.transitions('c').is_some());
		assert!(model.transitions('a').is_some());
		assert!(model.transitions('t').is_none());
	}

	#[test]
	fn degenerate_sources_yield_an_empty_model() {
		let empty: [&str; 0] = [];
		for model in [RawModel::train(empty), RawModel::train(["", "   ", "\t\n"])] {
			assert!(model.is_empty());
			assert!(model.term_count().is_empty());
			assert!(model.term_length().is_empty());
			assert!(model.initial_unit().is_empty());
			assert!(model.categories().is_empty());
		}
	}

	#[test]
	fn reserved_words_are_plain_training_data() {
		let model = RawModel::train(["termCount initialUnit"]);

		assert_eq!(model.initial_unit().get(&'t'), Some(1));
		assert_eq!(model.initial_unit().get(&'i'), Some(1));
		assert_eq!(model.term_count().get(&2), Some(1));
		assert!(model.categories().contains(&Category::Transition('t')));
	}

	#[test]
	fn counts_characters_not_bytes() {
		let model = RawModel::train(["Élodie"]);

		assert_eq!(model.term_length().get(&6), Some(1));
		assert_eq!(model.initial_unit().get(&'É'), Some(1));
		assert_eq!(model.transitions('É').and_then(|t| t.get(&'l')), Some(1));
	}
}
