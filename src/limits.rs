//! Bounds enforced on expressions by the parser.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bounds an expression must respect to be accepted
///
/// Limits can only be tightened: every setter clamps to the bound in [`Limits::DEFAULT`], so no configuration lets an
/// expression through that the defaults would reject. At the default bounds a roll set's total always fits in an
/// `i64`.
///
/// # Examples
/// ```
/// use fairroll::Limits;
///
/// let limits = Limits::DEFAULT.with_max_dice(10).with_max_sides(20);
/// assert_eq!(limits.max_terms(), 20);
/// assert_eq!(limits.max_dice(), 10);
/// assert_eq!(limits.max_sides(), 20);
///
/// let loosened = Limits::DEFAULT.with_max_sides(1_000_000);
/// assert_eq!(loosened.max_sides(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
	feature = "serde",
	derive(Serialize, Deserialize),
	serde(from = "UncheckedLimits", rename_all = "camelCase")
)]
pub struct Limits {
	/// Maximum number of terms (dice and constants together)
	max_terms: usize,

	/// Maximum number of sides a single die may have
	max_sides: u32,

	/// Maximum number of dice across all dice terms
	max_dice: u32,
}

impl Limits {
	/// 20 terms, 1000 sides, 100 dice.
	pub const DEFAULT: Self = Self {
		max_terms: 20,
		max_sides: 1000,
		max_dice: 100,
	};

	/// Sets the maximum number of terms, up to the default of 20.
	#[must_use]
	pub const fn with_max_terms(mut self, max_terms: usize) -> Self {
		self.max_terms = if max_terms < Self::DEFAULT.max_terms {
			max_terms
		} else {
			Self::DEFAULT.max_terms
		};
		self
	}

	/// Sets the maximum number of sides per die, up to the default of 1000.
	#[must_use]
	pub const fn with_max_sides(mut self, max_sides: u32) -> Self {
		self.max_sides = if max_sides < Self::DEFAULT.max_sides {
			max_sides
		} else {
			Self::DEFAULT.max_sides
		};
		self
	}

	/// Sets the maximum total number of dice, up to the default of 100.
	#[must_use]
	pub const fn with_max_dice(mut self, max_dice: u32) -> Self {
		self.max_dice = if max_dice < Self::DEFAULT.max_dice {
			max_dice
		} else {
			Self::DEFAULT.max_dice
		};
		self
	}

	/// Gets the maximum number of terms.
	#[must_use]
	#[inline]
	pub const fn max_terms(&self) -> usize {
		self.max_terms
	}

	/// Gets the maximum number of sides per die.
	#[must_use]
	#[inline]
	pub const fn max_sides(&self) -> u32 {
		self.max_sides
	}

	/// Gets the maximum total number of dice.
	#[must_use]
	#[inline]
	pub const fn max_dice(&self) -> u32 {
		self.max_dice
	}
}

impl Default for Limits {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Deserialized form of [`Limits`], clamped through the setters on conversion
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UncheckedLimits {
	max_terms: usize,
	max_sides: u32,
	max_dice: u32,
}

#[cfg(feature = "serde")]
impl Default for UncheckedLimits {
	fn default() -> Self {
		let Limits {
			max_terms,
			max_sides,
			max_dice,
		} = Limits::DEFAULT;
		Self {
			max_terms,
			max_sides,
			max_dice,
		}
	}
}

#[cfg(feature = "serde")]
impl From<UncheckedLimits> for Limits {
	fn from(limits: UncheckedLimits) -> Self {
		Self::DEFAULT
			.with_max_terms(limits.max_terms)
			.with_max_sides(limits.max_sides)
			.with_max_dice(limits.max_dice)
	}
}
