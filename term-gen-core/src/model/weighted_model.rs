use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use rand::Rng;

use super::category::{Category, FixedCategory};
use super::frequency_map::FrequencyMap;

/// Why a weighted draw produced no choice.
///
/// A miss is a normal outcome of sampling, not an error: callers decide
/// whether it ends a term, falls back to a default, or aborts generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Miss {
	/// The category does not exist in the model.
	Absent,
	/// The category exists but has no positive weight to draw from.
	Unweighted,
}

/// Sampling view of a trained model.
///
/// Holds the re-weighted categories and the per-category selection weights.
/// Built by `Weighting::apply`, read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedModel {
	exponent: f64,
	term_count: FrequencyMap<usize>,
	term_length: FrequencyMap<usize>,
	initial_unit: FrequencyMap<char>,
	transitions: BTreeMap<char, FrequencyMap<char>>,
	/// Sum of the re-weighted values of every non-empty category.
	selection_weights: HashMap<Category, u64>,
}

impl WeightedModel {
	pub(crate) fn new(
		exponent: f64,
		term_count: FrequencyMap<usize>,
		term_length: FrequencyMap<usize>,
		initial_unit: FrequencyMap<char>,
		transitions: BTreeMap<char, FrequencyMap<char>>,
		selection_weights: HashMap<Category, u64>,
	) -> Self {
		Self { exponent, term_count, term_length, initial_unit, transitions, selection_weights }
	}

	/// Exponent the weights were derived with.
	pub fn exponent(&self) -> f64 {
		self.exponent
	}

	pub fn term_count(&self) -> &FrequencyMap<usize> {
		&self.term_count
	}

	pub fn term_length(&self) -> &FrequencyMap<usize> {
		&self.term_length
	}

	pub fn initial_unit(&self) -> &FrequencyMap<char> {
		&self.initial_unit
	}

	pub fn transitions(&self, previous: char) -> Option<&FrequencyMap<char>> {
		self.transitions.get(&previous)
	}

	/// Selection weight of a category, `None` if the category is absent.
	pub fn selection_weight(&self, category: &Category) -> Option<u64> {
		self.selection_weights.get(category).copied()
	}

	/// All selection weights.
	pub fn selection_weights(&self) -> &HashMap<Category, u64> {
		&self.selection_weights
	}

	/// Draws a term count.
	pub fn sample_term_count<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, Miss> {
		self.draw(FixedCategory::TermCount.into(), Some(&self.term_count), rng).copied()
	}

	/// Draws a target term length.
	pub fn sample_term_length<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, Miss> {
		self.draw(FixedCategory::TermLength.into(), Some(&self.term_length), rng).copied()
	}

	/// Draws the first unit of a term.
	pub fn sample_initial_unit<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<char, Miss> {
		self.draw(FixedCategory::InitialUnit.into(), Some(&self.initial_unit), rng).copied()
	}

	/// Draws the unit following `previous`.
	pub fn sample_next_unit<R: Rng + ?Sized>(&self, previous: char, rng: &mut R) -> Result<char, Miss> {
		self.draw(Category::Transition(previous), self.transitions.get(&previous), rng).copied()
	}

	/// Weighted draw shared by every sampling call.
	///
	/// Draws a uniform index in `[0, total)` where `total` is the category's
	/// selection weight, then walks the choices in insertion order.
	fn draw<'a, K, R>(
		&self,
		category: Category,
		choices: Option<&'a FrequencyMap<K>>,
		rng: &mut R,
	) -> Result<&'a K, Miss>
	where
		K: Eq + Hash + Clone,
		R: Rng + ?Sized,
	{
		let total = self.selection_weight(&category).ok_or(Miss::Absent)?;
		if total == 0 {
			return Err(Miss::Unweighted);
		}
		let choices = choices.ok_or(Miss::Absent)?;

		let drawn = rng.random_range(0..total);
		choices.pick(drawn).ok_or(Miss::Unweighted)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::raw_model::RawModel;
	use crate::model::weighting::Weighting;

	fn weighted(sources: &[&str]) -> WeightedModel {
		Weighting::default().apply(&RawModel::train(sources))
	}

	#[test]
	fn single_choice_is_always_drawn() {
		let model = weighted(&["cat", "cat", "cat"]);
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			assert_eq!(model.sample_initial_unit(&mut rng), Ok('c'));
			assert_eq!(model.sample_next_unit('c', &mut rng), Ok('a'));
			assert_eq!(model.sample_term_length(&mut rng), Ok(3));
		}
	}

	#[test]
	fn unknown_transition_is_absent() {
		let model = weighted(&["cat"]);
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(model.sample_next_unit('t', &mut rng), Err(Miss::Absent));
		assert_eq!(model.sample_next_unit('z', &mut rng), Err(Miss::Absent));
	}

	#[test]
	fn empty_model_misses_everything() {
		let model = weighted(&[]);
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(model.sample_term_count(&mut rng), Err(Miss::Absent));
		assert_eq!(model.sample_term_length(&mut rng), Err(Miss::Absent));
		assert_eq!(model.sample_initial_unit(&mut rng), Err(Miss::Absent));
	}

	#[test]
	fn zero_total_is_unweighted() {
		let mut weights = HashMap::new();
		weights.insert(Category::Fixed(FixedCategory::InitialUnit), 0);
		let mut initial_unit = FrequencyMap::new();
		initial_unit.record('q');
		let model = WeightedModel::new(
			1.3,
			FrequencyMap::new(),
			FrequencyMap::new(),
			initial_unit.map_weights(|_| 0),
			BTreeMap::new(),
			weights,
		);

		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(model.sample_initial_unit(&mut rng), Err(Miss::Unweighted));
	}

	#[test]
	fn draws_follow_weights() {
		// 'a' observed 10 times (weight 19), 'b' once (weight 1)
		let mut sources = vec!["a"; 10];
		sources.push("b");
		let model = weighted(&sources);
		let mut rng = StdRng::seed_from_u64(42);

		let trials = 20_000;
		let hits = (0..trials)
			.filter(|_| model.sample_initial_unit(&mut rng) == Ok('b'))
			.count();
		// Expected share 1/20 = 5%
		let share = hits as f64 / trials as f64;
		assert!((0.035..0.065).contains(&share), "share of 'b' was {share}");
	}
}
