//! Outcomes of rolling a sequence of terms, and the [`Roller`]s that produce them.

pub mod roller;

use alloc::{
	borrow::ToOwned,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::roller::Roller;

/// Result of rolling a single [`Term`](crate::Term)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the serialized form, which is fixed")]
pub struct TermRoll {
	/// Raw text of the term that was rolled
	pub term: String,

	/// Every individual die face rolled, in order (empty for constants)
	pub rolls: Vec<u32>,

	/// Signed total of the term
	#[cfg_attr(feature = "serde", serde(rename = "termTotal"))]
	pub total: i64,
}

impl TermRoll {
	/// Checks whether the term was a constant (nothing was rolled for it).
	#[must_use]
	pub fn is_constant(&self) -> bool {
		self.rolls.is_empty()
	}
}

impl Describe for TermRoll {
	/// Builds a string of the term and, for dice, a list of the individual faces rolled.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of faces will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	/// Any sign on the term is left out, since it is described by the operator between terms.
	///
	/// # Examples
	/// ```
	/// use fairroll::{roll::Describe, TermRoll};
	///
	/// let roll = TermRoll { term: "-4d6".to_owned(), rolls: vec![6, 2, 5, 3], total: -16 };
	/// assert_eq!(roll.describe(None), "4d6[6, 2, 5, 3]");
	/// assert_eq!(roll.describe(Some(2)), "4d6[6, 2, 2 more...]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let term = self.term.trim_start_matches(['+', '-']);
		if self.is_constant() {
			return term.to_owned();
		}

		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			term,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

/// Outcome of rolling every term of an expression once
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RollSet {
	/// Results of each term, in expression order
	terms: Vec<TermRoll>,

	/// Sum of all of the terms' signed totals
	total: i64,
}

impl RollSet {
	/// Creates a roll set from term results, totalling them in order.
	#[must_use]
	pub fn new(terms: Vec<TermRoll>) -> Self {
		let total = terms.iter().map(|term| term.total).sum();
		Self { terms, total }
	}

	/// Gets the results of each term, in expression order.
	#[must_use]
	pub fn terms(&self) -> &[TermRoll] {
		&self.terms
	}

	/// Gets the grand total.
	#[must_use]
	pub const fn total(&self) -> i64 {
		self.total
	}
}

impl Describe for RollSet {
	/// Builds a string of every term (see [`TermRoll::describe()`]) joined by the operators between them.
	///
	/// # Examples
	/// ```
	/// use fairroll::{roll::Describe, RollSet, TermRoll};
	///
	/// let set = RollSet::new(vec![
	/// 	TermRoll { term: "2d6".to_owned(), rolls: vec![3, 5], total: 8 },
	/// 	TermRoll { term: "-1d4".to_owned(), rolls: vec![2], total: -2 },
	/// 	TermRoll { term: "+3".to_owned(), rolls: vec![], total: 3 },
	/// ]);
	/// assert_eq!(set.total(), 9);
	/// assert_eq!(set.describe(None), "2d6[3, 5] - 1d4[2] + 3");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let mut text = String::new();

		for (idx, term) in self.terms.iter().enumerate() {
			let negative = term.term.starts_with('-');
			match (idx, negative) {
				(0, true) => text.push('-'),
				(0, false) => {}
				(_, true) => text.push_str(" - "),
				(_, false) => text.push_str(" + "),
			}
			text.push_str(&term.describe(list_limit));
		}

		text
	}
}

impl fmt::Display for RollSet {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed string of the results, listing every individual die face that was rolled (ideally, up to
	/// `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}
