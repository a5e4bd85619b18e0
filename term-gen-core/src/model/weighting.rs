use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::ConfigError;
use super::category::{Category, FixedCategory};
use super::raw_model::RawModel;
use super::weighted_model::WeightedModel;

/// Default re-weighting exponent.
///
/// Values above 1.0 favor frequent choices beyond their empirical share.
pub const DEFAULT_EXPONENT: f64 = 1.3;

/// Transform from raw counts to biased sampling weights.
///
/// Every count `c` becomes `floor(c^exponent)`. With the default exponent
/// a count of 1 stays 1, 10 becomes 19 and 100 becomes 398.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weighting {
	exponent: f64,
}

impl Default for Weighting {
	fn default() -> Self {
		Self { exponent: DEFAULT_EXPONENT }
	}
}

impl Weighting {
	/// Creates a weighting with a custom exponent.
	///
	/// # Errors
	/// Returns an error if the exponent is not finite or not strictly positive.
	pub fn new(exponent: f64) -> Result<Self, ConfigError> {
		if !exponent.is_finite() || exponent <= 0.0 {
			return Err(ConfigError::InvalidExponent(exponent));
		}
		Ok(Self { exponent })
	}

	pub fn exponent(&self) -> f64 {
		self.exponent
	}

	/// Re-weights a single raw count.
	pub fn weight(&self, count: u64) -> u64 {
		(count as f64).powf(self.exponent).floor() as u64
	}

	/// Derives a weighted model from raw counts.
	///
	/// The raw model is left untouched. Each non-empty category gets a
	/// selection weight equal to the sum of its re-weighted values; empty
	/// categories get none.
	pub fn apply(&self, raw: &RawModel) -> WeightedModel {
		let term_count = raw.term_count().map_weights(|c| self.weight(c));
		let term_length = raw.term_length().map_weights(|c| self.weight(c));
		let initial_unit = raw.initial_unit().map_weights(|c| self.weight(c));
		let transitions = raw
			.transition_tables()
			.map(|(unit, table)| (unit, table.map_weights(|c| self.weight(c))))
			.collect::<BTreeMap<_, _>>();

		let mut selection_weights = HashMap::new();
		let fixed = [
			(FixedCategory::TermCount, term_count.is_empty(), term_count.total()),
			(FixedCategory::TermLength, term_length.is_empty(), term_length.total()),
			(FixedCategory::InitialUnit, initial_unit.is_empty(), initial_unit.total()),
		];
		for (category, is_empty, total) in fixed {
			if !is_empty {
				selection_weights.insert(Category::Fixed(category), total);
			}
		}
		for (unit, table) in &transitions {
			selection_weights.insert(Category::Transition(*unit), table.total());
		}

		debug!(
			"weighted model with exponent {}: {} categories",
			self.exponent,
			selection_weights.len()
		);

		WeightedModel::new(
			self.exponent,
			term_count,
			term_length,
			initial_unit,
			transitions,
			selection_weights,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_exponent_matches_reference_values() {
		let weighting = Weighting::default();
		assert_eq!(weighting.exponent(), 1.3);
		assert_eq!(weighting.weight(1), 1);
		assert_eq!(weighting.weight(2), 2);
		assert_eq!(weighting.weight(10), 19);
		assert_eq!(weighting.weight(100), 398);
	}

	#[test]
	fn linear_exponent_keeps_counts() {
		let weighting = Weighting::new(1.0).unwrap();
		for count in [1, 2, 7, 1000] {
			assert_eq!(weighting.weight(count), count);
		}
	}

	#[test]
	fn rejects_invalid_exponents() {
		for exponent in [0.0, -1.3, f64::NAN, f64::INFINITY] {
			assert!(Weighting::new(exponent).is_err());
		}
	}

	#[test]
	fn apply_reweights_without_touching_raw_counts() {
		let sources: Vec<&str> = std::iter::repeat_n("ab", 10).collect();
		let raw = RawModel::train(sources);
		let weighted = Weighting::default().apply(&raw);

		assert_eq!(raw.initial_unit().get(&'a'), Some(10));
		assert_eq!(weighted.initial_unit().get(&'a'), Some(19));
		assert_eq!(weighted.transitions('a').and_then(|t| t.get(&'b')), Some(19));
		assert_eq!(weighted.selection_weight(&Category::Transition('a')), Some(19));
		assert_eq!(
			weighted.selection_weight(&Category::Fixed(FixedCategory::TermCount)),
			Some(19)
		);
	}

	#[test]
	fn empty_model_has_no_selection_weights() {
		let weighted = Weighting::default().apply(&RawModel::train(["", "   "]));
		assert!(weighted.selection_weights().is_empty());
		assert!(weighted.initial_unit().is_empty());
	}
}
