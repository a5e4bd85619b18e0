use std::fmt;

/// One of the three statistical categories every model carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixedCategory {
	/// Number of terms per source sequence.
	TermCount,
	/// Character length of a term.
	TermLength,
	/// First character of a term.
	InitialUnit,
}

impl FixedCategory {
	/// All fixed categories, in model order.
	pub const ALL: [FixedCategory; 3] = [Self::TermCount, Self::TermLength, Self::InitialUnit];

	/// Reserved name of the category (`termCount`, `termLength`, `initialUnit`).
	pub fn name(&self) -> &'static str {
		match self {
			Self::TermCount => "termCount",
			Self::TermLength => "termLength",
			Self::InitialUnit => "initialUnit",
		}
	}
}

/// Key of a bucket of weighted choices.
///
/// Fixed categories and per-character transition tables live in separate
/// variants, so a training character can never shadow a fixed category,
/// even when it prints the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Fixed(FixedCategory),
	/// Characters observed right after the given character.
	Transition(char),
}

impl From<FixedCategory> for Category {
	fn from(fixed: FixedCategory) -> Self {
		Category::Fixed(fixed)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Category::Fixed(fixed) => f.write_str(fixed.name()),
			Category::Transition(unit) => write!(f, "{unit}"),
		}
	}
}
