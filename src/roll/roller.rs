//! Abstractions for rolling [`Terms`] using various means.

use alloc::vec::Vec;
use core::iter::Peekable;

#[cfg(feature = "secure")]
use rand::{rngs::OsRng, CryptoRng, Rng, RngCore};

use super::{RollSet, TermRoll};
use crate::term::{Term, Terms};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die, producing a value in `1..=sides`.
	///
	/// # Panics
	/// Implementations may panic if `sides` is zero, since no valid roll exists.
	/// The parser never produces such a die.
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Rolls every term once, in order, drawing fresh values for each die.
	/// Constants contribute their signed value without any rolls.
	fn roll(&mut self, terms: &Terms) -> RollSet
	where
		Self: Sized,
	{
		let mut results = Vec::with_capacity(terms.len());

		for term in terms {
			let result = match term {
				Term::Constant { sign, value, raw } => TermRoll {
					term: raw.clone(),
					rolls: Vec::new(),
					total: sign.apply(constant_val(*value)),
				},
				Term::Dice {
					sign,
					count,
					sides,
					raw,
				} => {
					let rolls = (0..*count).map(|_| self.roll_die(*sides)).collect::<Vec<_>>();
					let sum = rolls.iter().copied().map(i64::from).sum();

					#[cfg(feature = "logging")]
					log::trace!("rolled {raw}: {rolls:?}");

					TermRoll {
						term: raw.clone(),
						rolls,
						total: sign.apply(sum),
					}
				}
			};
			results.push(result);
		}

		RollSet::new(results)
	}
}

/// Converts a constant's value for totalling.
#[expect(
	clippy::cast_possible_wrap,
	reason = "Constants are bounded by MAX_VALUE, far below i64::MAX"
)]
const fn constant_val(value: u64) -> i64 {
	value as i64
}

/// Generates rolls with a cryptographically secure random number generator, so results can't be predicted or replayed.
/// Requires the `secure` feature (enabled by default).
///
/// Values are drawn uniformly (without modulo bias) with [`Rng::gen_range()`].
/// The default instance uses the operating system's entropy source ([`OsRng`]), which holds no state and can't be
/// seeded. Any other [`CryptoRng`] can be supplied with [`Secure::new()`].
///
/// # Examples
/// ```
/// use fairroll::{roll::roller::{Roller, Secure}, Terms};
///
/// let terms: Terms = "4d6".parse()?;
/// let rolled = Secure::default().roll(&terms);
/// assert_eq!(rolled.terms()[0].rolls.len(), 4);
/// assert!(rolled.terms()[0].rolls.iter().all(|roll| (1..=6).contains(roll)));
/// # Ok::<(), fairroll::Error>(())
/// ```
#[cfg(feature = "secure")]
#[derive(Debug, Clone)]
pub struct Secure<R = OsRng>(R);

#[cfg(feature = "secure")]
impl<R: RngCore + CryptoRng> Secure<R> {
	/// Creates a new secure roller that uses the given RNG to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: R) -> Self {
		Self(rng)
	}
}

#[cfg(feature = "secure")]
impl Default for Secure<OsRng> {
	#[inline]
	fn default() -> Self {
		Self(OsRng)
	}
}

#[cfg(feature = "secure")]
impl<R: RngCore + CryptoRng> Roller for Secure<R> {
	/// Rolls a single die using the RNG the roller was created with.
	///
	/// # Panics
	/// If `sides` is zero. This can only happen when terms were built without going through the parser.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		assert!(sides >= 1, "invalid random range: a die must have at least one side");
		self.0.gen_range(1..=sides)
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use fairroll::{roll::roller::{Roller, Val as ValRoller}, Terms};
///
/// let mut roller = ValRoller(3);
/// let rolled = roller.roll(&"4d6 - 1d8 + 2".parse::<Terms>()?);
/// assert_eq!(rolled.terms()[0].rolls, vec![3, 3, 3, 3]);
/// assert_eq!(rolled.total(), 12 - 3 + 2);
/// # Ok::<(), fairroll::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use fairroll::{roll::roller::{Max as MaxRoller, Roller}, Terms};
///
/// let rolled = MaxRoller.roll(&"2d20 + 1d4".parse::<Terms>()?);
/// assert_eq!(rolled.total(), 44);
/// # Ok::<(), fairroll::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use fairroll::{roll::roller::{Iter as IterRoller, Roller}, Terms};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let rolled = roller.roll(&"3d6 - 2d10".parse::<Terms>()?);
/// assert_eq!(rolled.terms()[0].rolls, vec![1, 2, 3]);
/// assert_eq!(rolled.terms()[1].rolls, vec![4, 10]);
/// assert_eq!(rolled.total(), 6 - 14);
/// # Ok::<(), fairroll::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
