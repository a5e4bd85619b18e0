use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Ordered mapping from a choice to its integer weight.
///
/// Conceptually, this is one bucket of a Markov chain: every entry is an
/// outgoing edge weighted by how many times it was observed (or by the
/// re-weighted value of that count once the model has been weighted).
///
/// ## Responsibilities:
/// - Accumulate occurrences during training
/// - Derive a re-weighted copy for sampling
/// - Select a choice from a drawn index by cumulative weight
///
/// ## Invariants
/// - Entries keep the order of their first occurrence, which keeps sampling
///   reproducible under a seeded random source
/// - Each key appears exactly once
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyMap<K: Eq + Hash> {
	/// Choices with their weight, in insertion order.
	/// Example: [('e', 42), ('a', 3)]
	entries: Vec<(K, u64)>,
	/// Position of each key inside `entries`.
	#[serde(skip)]
	index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Default for FrequencyMap<K> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Eq + Hash + Clone> FrequencyMap<K> {
	/// Creates a new empty map.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Records one occurrence of `choice`.
	///
	/// - If the choice already exists, its count is increased.
	/// - Otherwise, it is appended with an initial count of 1.
	pub(crate) fn record(&mut self, choice: K) {
		match self.index.get(&choice) {
			Some(&position) => self.entries[position].1 += 1,
			None => {
				self.index.insert(choice.clone(), self.entries.len());
				self.entries.push((choice, 1));
			}
		}
	}

	/// Returns the weight of `choice`, if present.
	pub fn get(&self, choice: &K) -> Option<u64> {
		self.index.get(choice).map(|&position| self.entries[position].1)
	}

	/// Number of distinct choices.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(choice, weight)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
		self.entries.iter().map(|(choice, weight)| (choice, *weight))
	}

	/// Sum of all weights.
	pub fn total(&self) -> u64 {
		self.entries.iter().map(|(_, weight)| weight).sum()
	}

	/// Returns a copy of this map with every weight passed through `transform`.
	///
	/// Entries whose transformed weight is 0 are kept; they simply take no
	/// width during sampling.
	pub(crate) fn map_weights<F>(&self, transform: F) -> Self
	where
		F: Fn(u64) -> u64,
	{
		Self {
			entries: self
				.entries
				.iter()
				.map(|(choice, weight)| (choice.clone(), transform(*weight)))
				.collect(),
			index: self.index.clone(),
		}
	}

	/// Builds a map from explicit `(choice, weight)` pairs, keeping their order.
	#[cfg(test)]
	pub(crate) fn from_weights<I: IntoIterator<Item = (K, u64)>>(entries: I) -> Self {
		let entries: Vec<(K, u64)> = entries.into_iter().collect();
		let index = entries
			.iter()
			.enumerate()
			.map(|(position, (choice, _))| (choice.clone(), position))
			.collect();
		Self { entries, index }
	}

	/// Selects the choice covering `drawn` on the cumulative weight line.
	///
	/// `drawn` is expected in `[0, total)`. The walk is an O(n) scan with a
	/// cumulative subtraction, returning the first choice whose cumulative
	/// weight exceeds the drawn index.
	///
	/// Returns `None` if `drawn` falls outside the weight line.
	pub(crate) fn pick(&self, drawn: u64) -> Option<&K> {
		let mut remaining = drawn;
		for (choice, weight) in &self.entries {
			if remaining < *weight {
				return Some(choice);
			}
			remaining -= weight;
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn map_of(choices: &str) -> FrequencyMap<char> {
		let mut map = FrequencyMap::new();
		for c in choices.chars() {
			map.record(c);
		}
		map
	}

	#[test]
	fn record_keeps_first_occurrence_order() {
		let map = map_of("banana");
		let order: Vec<char> = map.iter().map(|(c, _)| *c).collect();
		assert_eq!(order, vec!['b', 'a', 'n']);
		assert_eq!(map.get(&'a'), Some(3));
		assert_eq!(map.get(&'n'), Some(2));
		assert_eq!(map.get(&'z'), None);
		assert_eq!(map.total(), 6);
	}

	#[test]
	fn pick_walks_cumulative_weights() {
		// b:1, a:3, n:2 -> [0] b, [1..4) a, [4..6) n
		let map = map_of("banana");
		assert_eq!(map.pick(0), Some(&'b'));
		assert_eq!(map.pick(1), Some(&'a'));
		assert_eq!(map.pick(3), Some(&'a'));
		assert_eq!(map.pick(4), Some(&'n'));
		assert_eq!(map.pick(5), Some(&'n'));
		assert_eq!(map.pick(6), None);
	}

	#[test]
	fn zero_weights_take_no_width() {
		let map = map_of("abb").map_weights(|w| if w == 1 { 0 } else { w });
		assert_eq!(map.get(&'a'), Some(0));
		assert_eq!(map.len(), 2);
		assert_eq!(map.pick(0), Some(&'b'));
		assert_eq!(map.pick(1), Some(&'b'));
	}

	#[test]
	fn empty_map_picks_nothing() {
		let map: FrequencyMap<usize> = FrequencyMap::new();
		assert!(map.is_empty());
		assert_eq!(map.total(), 0);
		assert_eq!(map.pick(0), None);
	}
}
