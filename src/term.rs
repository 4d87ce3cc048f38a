//! Validated terms of a dice expression and the ordered sequence they form.
//!
//! Terms are only ever produced by the [parser](crate::parse), which guarantees every bound in [`Limits`] holds.
//! Everything downstream (rolling, evaluating) relies on that.
//!
//! [`Limits`]: crate::Limits

use alloc::{string::String, vec::Vec};
use core::{fmt, ops::Deref};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest constant value (or count/sides component) accepted in an expression: `2^53 - 1`.
/// This is the largest integer an IEEE 754 double represents exactly, so totals stay exact for JSON consumers.
/// Combined with the term limit, it also keeps every total well within `i64`.
pub const MAX_VALUE: u64 = (1 << 53) - 1;

/// Sign carried by a term, taken from the operator preceding it (`+` when there is none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
#[expect(clippy::exhaustive_enums, reason = "A sign is either positive or negative")]
pub enum Sign {
	/// Added to the total
	#[default]
	Plus,

	/// Subtracted from the total
	Minus,
}

impl Sign {
	/// Gets the sign for an operator character, if it is one.
	#[must_use]
	pub const fn from_op(op: char) -> Option<Self> {
		match op {
			'+' => Some(Self::Plus),
			'-' => Some(Self::Minus),
			_ => None,
		}
	}

	/// Applies the sign to a value.
	#[must_use]
	#[expect(
		clippy::arithmetic_side_effects,
		reason = "Values handed to this are bounded by the parser and can never be i64::MIN"
	)]
	pub const fn apply(self, val: i64) -> i64 {
		match self {
			Self::Plus => val,
			Self::Minus => -val,
		}
	}
}

impl fmt::Display for Sign {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Plus => "+",
			Self::Minus => "-",
		})
	}
}

/// One signed operand of a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
	feature = "serde",
	derive(Serialize, Deserialize),
	serde(tag = "kind", rename_all = "lowercase")
)]
#[non_exhaustive]
pub enum Term {
	/// Group of dice, such as `2d6` or `-1d4`
	Dice {
		/// Sign of the term
		sign: Sign,

		/// Number of dice to roll (at least 1)
		count: u32,

		/// Number of sides on each die (at least 1)
		sides: u32,

		/// Token exactly as it appeared in the expression, including its operator
		raw: String,
	},

	/// Flat value, such as `3` or `-2`
	#[cfg_attr(feature = "serde", serde(rename = "const"))]
	Constant {
		/// Sign of the term
		sign: Sign,

		/// Unsigned value (at most [`MAX_VALUE`])
		value: u64,

		/// Token exactly as it appeared in the expression, including its operator
		raw: String,
	},
}

impl Term {
	/// Gets the sign of the term.
	#[must_use]
	pub const fn sign(&self) -> Sign {
		match self {
			Self::Dice { sign, .. } | Self::Constant { sign, .. } => *sign,
		}
	}

	/// Gets the token text the term was parsed from.
	#[must_use]
	pub fn raw(&self) -> &str {
		match self {
			Self::Dice { raw, .. } | Self::Constant { raw, .. } => raw,
		}
	}

	/// Gets the number of dice this term rolls (zero for constants).
	#[must_use]
	pub const fn dice_count(&self) -> u32 {
		match self {
			Self::Dice { count, .. } => *count,
			Self::Constant { .. } => 0,
		}
	}

	/// Checks whether the term will always yield the same total.
	/// Constants always do, and dice only do when they have a single side.
	#[must_use]
	pub const fn is_deterministic(&self) -> bool {
		match self {
			Self::Dice { sides, .. } => *sides == 1,
			Self::Constant { .. } => true,
		}
	}
}

impl fmt::Display for Term {
	/// Formats the term as the raw token it was parsed from.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.raw())
	}
}

/// Ordered sequence of validated [`Term`]s, as written from left to right
///
/// # Examples
/// ```
/// use fairroll::{Term, Terms};
///
/// let terms: Terms = "2d6 + 1d4 - 3".parse()?;
/// assert_eq!(terms.len(), 3);
/// assert_eq!(terms.dice_count(), 3);
/// assert!(matches!(terms[2], Term::Constant { value: 3, .. }));
/// assert_eq!(terms.to_string(), "2d6+1d4-3");
/// # Ok::<(), fairroll::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Terms(Vec<Term>);

impl Terms {
	/// Wraps terms that have already passed validation.
	#[must_use]
	pub(crate) const fn new(terms: Vec<Term>) -> Self {
		Self(terms)
	}

	/// Total number of dice across all dice terms.
	#[must_use]
	pub fn dice_count(&self) -> u32 {
		self.0.iter().map(Term::dice_count).sum()
	}

	/// Checks whether every term is deterministic (see [`Term::is_deterministic()`]).
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		self.0.iter().all(Term::is_deterministic)
	}

	/// Unwraps the terms into a plain vector.
	#[must_use]
	pub fn into_inner(self) -> Vec<Term> {
		self.0
	}
}

impl Deref for Terms {
	type Target = [Term];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<'a> IntoIterator for &'a Terms {
	type Item = &'a Term;
	type IntoIter = core::slice::Iter<'a, Term>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl fmt::Display for Terms {
	/// Formats the terms as the concatenation of their raw tokens, which is the whitespace-stripped expression they
	/// were parsed from.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for term in &self.0 {
			f.write_str(term.raw())?;
		}
		Ok(())
	}
}

#[cfg(feature = "parse")]
impl core::str::FromStr for Terms {
	type Err = crate::Error;

	/// Parses an expression using [`Limits::DEFAULT`](crate::Limits::DEFAULT).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		crate::parse::terms(s, &crate::Limits::DEFAULT)
	}
}
