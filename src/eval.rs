//! Evaluation of whole expressions, including advantage and disadvantage.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{roll::RollSet, term::Terms, Roller};
#[cfg(feature = "parse")]
use crate::{Error, Limits};

/// How many times an expression is rolled and which outcome is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Mode {
	/// Roll once
	#[default]
	Normal,

	/// Roll twice and keep the higher total
	Advantage,

	/// Roll twice and keep the lower total
	Disadvantage,
}

impl Mode {
	/// Gets the number of independent roll sets the mode needs.
	#[must_use]
	pub const fn roll_count(self) -> usize {
		match self {
			Self::Normal => 1,
			Self::Advantage | Self::Disadvantage => 2,
		}
	}

	/// Picks the index of the total to keep: the highest for [`Self::Advantage`], the lowest for
	/// [`Self::Disadvantage`], and always the first for [`Self::Normal`].
	/// Ties go to the earliest index.
	///
	/// # Examples
	/// ```
	/// use fairroll::Mode;
	///
	/// assert_eq!(Mode::Advantage.select(&[7, 12]), 1);
	/// assert_eq!(Mode::Disadvantage.select(&[7, 12]), 0);
	/// assert_eq!(Mode::Advantage.select(&[9, 9]), 0);
	/// assert_eq!(Mode::Normal.select(&[3]), 0);
	/// ```
	#[must_use]
	pub fn select(self, totals: &[i64]) -> usize {
		let mut selected = 0;
		let mut best = match totals.first() {
			Some(total) => *total,
			None => return 0,
		};

		for (idx, total) in totals.iter().copied().enumerate().skip(1) {
			let better = match self {
				Self::Normal => false,
				Self::Advantage => total > best,
				Self::Disadvantage => total < best,
			};
			if better {
				selected = idx;
				best = total;
			}
		}

		selected
	}

	/// Gets the name of the mode, as accepted by [`Mode::from_str()`].
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::Advantage => "advantage",
			Self::Disadvantage => "disadvantage",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Mode {
	type Err = UnknownMode;

	/// Parses a mode name, ignoring ASCII case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Self::Normal, Self::Advantage, Self::Disadvantage]
			.into_iter()
			.find(|mode| mode.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownMode(s.into()))
	}
}

/// Error for a string that doesn't name a [`Mode`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown roll mode \"{0}\" (expected normal, advantage or disadvantage)")]
#[expect(clippy::exhaustive_structs, reason = "Only ever wraps the rejected input")]
pub struct UnknownMode(pub String);

/// Full result of evaluating an expression: every roll set made, and the one that was kept
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct Evaluation {
	/// Expression exactly as it was given
	expression: String,

	/// Mode the expression was evaluated with
	mode: Mode,

	/// Roll sets in the order they were rolled
	roll_sets: Vec<RollSet>,

	/// Index of the kept roll set
	selected_index: usize,

	/// Total of the kept roll set
	total: i64,
}

impl Evaluation {
	/// Rolls already-parsed terms as many times as the mode requires and keeps the outcome it selects.
	/// Each roll set is drawn independently from `roller`.
	///
	/// # Examples
	/// ```
	/// use fairroll::{roll::roller::Iter as IterRoller, Evaluation, Mode, Terms};
	///
	/// let terms: Terms = "1d20+5".parse()?;
	/// let eval = Evaluation::roll("1d20 + 5", Mode::Disadvantage, &terms, &mut IterRoller::new([17, 4]));
	/// assert_eq!(eval.roll_sets().len(), 2);
	/// assert_eq!(eval.selected_index(), 1);
	/// assert_eq!(eval.total(), 9);
	/// # Ok::<(), fairroll::Error>(())
	/// ```
	#[must_use]
	pub fn roll(expression: impl Into<String>, mode: Mode, terms: &Terms, roller: &mut impl Roller) -> Self {
		let roll_sets = (0..mode.roll_count()).map(|_| roller.roll(terms)).collect::<Vec<_>>();
		let totals = roll_sets.iter().map(RollSet::total).collect::<Vec<_>>();
		let selected_index = mode.select(&totals);
		let total = totals.get(selected_index).copied().unwrap_or_default();

		let expression = expression.into();

		#[cfg(feature = "logging")]
		log::debug!("evaluated \"{expression}\" ({mode}): totals {totals:?}, kept #{selected_index} = {total}");

		Self {
			expression,
			mode,
			roll_sets,
			selected_index,
			total,
		}
	}

	/// Gets the expression exactly as it was given.
	#[must_use]
	pub fn expression(&self) -> &str {
		&self.expression
	}

	/// Gets the mode the expression was evaluated with.
	#[must_use]
	pub const fn mode(&self) -> Mode {
		self.mode
	}

	/// Gets every roll set, in the order they were rolled.
	#[must_use]
	pub fn roll_sets(&self) -> &[RollSet] {
		&self.roll_sets
	}

	/// Gets the index of the kept roll set.
	#[must_use]
	pub const fn selected_index(&self) -> usize {
		self.selected_index
	}

	/// Gets the kept roll set.
	#[must_use]
	pub fn selected(&self) -> Option<&RollSet> {
		self.roll_sets.get(self.selected_index)
	}

	/// Gets the total of the kept roll set.
	#[must_use]
	pub const fn total(&self) -> i64 {
		self.total
	}
}

/// Parses an expression with the given limits and evaluates it in the given mode using `roller`.
/// The expression is parsed once, and the same terms are rolled for every roll set.
///
/// # Errors
/// If the expression is rejected by the parser, its error is returned (see [`crate::parse::terms()`]).
/// Rolling itself never fails.
///
/// # Examples
/// ```
/// use fairroll::{evaluate_with, roll::roller::Max as MaxRoller, Limits, Mode};
///
/// let eval = evaluate_with("3d6 - 2", Mode::Normal, &Limits::DEFAULT, &mut MaxRoller)?;
/// assert_eq!(eval.total(), 16);
///
/// let strict = Limits::DEFAULT.with_max_dice(2);
/// assert!(evaluate_with("3d6 - 2", Mode::Normal, &strict, &mut MaxRoller).is_err());
/// # Ok::<(), fairroll::Error>(())
/// ```
#[cfg(feature = "parse")]
pub fn evaluate_with(
	expression: &str,
	mode: Mode,
	limits: &Limits,
	roller: &mut impl Roller,
) -> Result<Evaluation, Error> {
	let terms = crate::parse::terms(expression, limits)?;
	Ok(Evaluation::roll(expression, mode, &terms, roller))
}

/// Evaluates an expression in the given mode with the default [`Limits`] and a [secure roller].
///
/// # Errors
/// If the expression is rejected by the parser, its error is returned (see [`crate::parse::terms()`]).
///
/// # Examples
/// ```
/// use fairroll::{evaluate, Mode};
///
/// let eval = evaluate("1d20+5", Mode::Advantage)?;
/// assert_eq!(eval.roll_sets().len(), 2);
/// assert!(eval.roll_sets().iter().all(|set| set.total() <= eval.total()));
/// assert!((6..=25).contains(&eval.total()));
/// # Ok::<(), fairroll::Error>(())
/// ```
///
/// [secure roller]: crate::roll::roller::Secure
#[cfg(all(feature = "parse", feature = "secure"))]
pub fn evaluate(expression: &str, mode: Mode) -> Result<Evaluation, Error> {
	evaluate_with(
		expression,
		mode,
		&Limits::DEFAULT,
		&mut crate::roll::roller::Secure::default(),
	)
}
