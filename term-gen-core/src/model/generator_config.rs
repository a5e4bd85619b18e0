use crate::error::ConfigError;
use super::weighting::{DEFAULT_EXPONENT, Weighting};

/// Construction options of a `Generator`.
///
/// # Invariants
/// - `exponent` is always finite and strictly positive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
	/// Re-weighting exponent applied to raw counts (default 1.3).
	exponent: f64,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self { exponent: DEFAULT_EXPONENT }
	}
}

impl GeneratorConfig {
	/// Creates a configuration with the given re-weighting exponent.
	///
	/// # Errors
	/// Returns an error if the exponent is not finite or not strictly positive.
	pub fn with_exponent(exponent: f64) -> Result<Self, ConfigError> {
		let mut config = Self::default();
		config.set_exponent(exponent)?;
		Ok(config)
	}

	/// Returns the current re-weighting exponent.
	pub fn exponent(&self) -> f64 {
		self.exponent
	}

	/// Sets the re-weighting exponent.
	///
	/// # Errors
	/// Returns an error if the value is not finite or not strictly positive.
	/// The previous exponent is kept in that case.
	pub fn set_exponent(&mut self, exponent: f64) -> Result<(), ConfigError> {
		Weighting::new(exponent)?;
		self.exponent = exponent;
		Ok(())
	}

	/// Weighting stage matching this configuration.
	pub(crate) fn weighting(&self) -> Weighting {
		// The exponent was validated when set.
		Weighting::new(self.exponent).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_reference_exponent() {
		assert_eq!(GeneratorConfig::default().exponent(), 1.3);
		assert_eq!(GeneratorConfig::default().weighting(), Weighting::default());
	}

	#[test]
	fn invalid_exponent_keeps_previous_value() {
		let mut config = GeneratorConfig::with_exponent(2.0).unwrap();
		assert_eq!(
			config.set_exponent(-1.0),
			Err(ConfigError::InvalidExponent(-1.0))
		);
		assert_eq!(config.exponent(), 2.0);
		assert_eq!(config.weighting().exponent(), 2.0);
	}
}
