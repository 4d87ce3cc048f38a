//! Parsing and validation of dice expressions into [`Terms`].
//!
//! Parsing happens in two passes. The first is a plain syntax pass (see [`tokens()`]) that splits the
//! whitespace-stripped expression into signed tokens. The second checks every token against the [`Limits`] from left
//! to right, stopping at the first violation.

use alloc::{
	borrow::ToOwned,
	string::{String, ToString},
	vec::Vec,
};
use core::{iter, ops::Range};

use chumsky::{prelude::*, span::Span as _};

use crate::{
	term::{Sign, Term, Terms, MAX_VALUE},
	Error, Limits,
};

/// Parser extras shared by every parser in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Signed operand from the syntax pass, not yet checked against any limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Token<'src> {
	/// Explicit sign, if an operator preceded the operand
	pub sign: Option<Sign>,

	/// Digits before the `d` (the count of a dice term or the value of a constant)
	pub first: &'src str,

	/// Digits after the `d`, for dice terms
	pub sides: Option<&'src str>,

	/// Full text of the token, sign included
	pub raw: &'src str,

	/// Location of the token in the expression
	pub span: SimpleSpan,
}

impl Token<'_> {
	/// Gets the location of the token as a byte range.
	#[must_use]
	pub fn range(&self) -> Range<usize> {
		self.span.start()..self.span.end()
	}
}

/// Generates a parser for a term operator (`+` or `-`).
fn sign<'src>() -> impl Parser<'src, &'src str, Sign, Extra<'src>> + Clone {
	choice((just('+').to(Sign::Plus), just('-').to(Sign::Minus)))
}

/// Generates a parser for one token whose sign is handled by `sign`.
fn token<'src>(
	sign: impl Parser<'src, &'src str, Option<Sign>, Extra<'src>> + Clone,
) -> impl Parser<'src, &'src str, Token<'src>, Extra<'src>> + Clone {
	let digits = text::digits(10).to_slice();

	sign.then(digits.clone())
		.then(just('d').ignore_then(digits).or_not())
		.map_with(|((sign, first), sides), e| Token {
			sign,
			first,
			sides,
			raw: e.slice(),
			span: e.span(),
		})
}

/// Generates a parser that splits a whitespace-free expression like "2d6+1d4-3" into its tokens and expects end of
/// input. Only the first token may omit its operator.
///
/// # Examples
/// ```
/// use chumsky::Parser;
///
/// let tokens = fairroll::parse::tokens().parse("2d6-3").into_result().unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].sides, Some("6"));
/// assert_eq!(tokens[1].raw, "-3");
/// ```
pub fn tokens<'src>() -> impl Parser<'src, &'src str, Vec<Token<'src>>, Extra<'src>> + Clone {
	token(sign().or_not())
		.then(token(sign().map(Some)).repeated().collect::<Vec<_>>())
		.map(|(first, rest)| iter::once(first).chain(rest).collect::<Vec<_>>())
		.then_ignore(end())
}

/// Parses and validates an expression into its terms.
/// All whitespace is removed before parsing, so `"2d6 + 3"` and `"2d6+3"` are equivalent.
///
/// # Errors
/// The first rule the expression violates is returned as an [`Error`], and no terms are produced.
/// Rules are checked in this order:
/// 1. The expression must not be empty.
/// 2. It must match the grammar (`[+-]` then `N` or `NdM`, then any number of `+`/`-` followed by `N` or `NdM`).
/// 3. It must have no more than [`Limits::max_terms()`] terms.
/// 4. Every number must be at most [`MAX_VALUE`].
/// 5. Every dice term must have at least one die with at least one side, no more than [`Limits::max_sides()`] sides, and
///    the dice counted so far must not exceed [`Limits::max_dice()`].
///
/// # Examples
/// ```
/// use fairroll::{parse, Error, Limits, Term};
///
/// let terms = parse::terms("2d6 + 1d4 + 3", &Limits::DEFAULT)?;
/// assert_eq!(terms.len(), 3);
/// assert!(matches!(terms[0], Term::Dice { count: 2, sides: 6, .. }));
///
/// let err = parse::terms("1d1001", &Limits::DEFAULT).unwrap_err();
/// assert!(matches!(err, Error::DiceSidesExceedLimit { sides: 1001, .. }));
/// # Ok::<(), Error>(())
/// ```
pub fn terms(input: &str, limits: &Limits) -> Result<Terms, Error> {
	let result = validate(input, limits);

	#[cfg(feature = "logging")]
	{
		match &result {
			Ok(terms) => log::trace!("parsed \"{input}\" into {} terms", terms.len()),
			Err(err) => log::debug!("rejected \"{input}\" ({}): {err}", err.kind()),
		}
	}

	result
}

/// Runs every validation step in order.
fn validate(input: &str, limits: &Limits) -> Result<Terms, Error> {
	let expr = input.chars().filter(|c| !c.is_whitespace()).collect::<String>();
	if expr.is_empty() {
		return Err(Error::EmptyExpression);
	}

	let tokens = tokens().parse(expr.as_str()).into_result().map_err(|errs| {
		errs.first().map_or_else(
			|| Error::SyntaxMismatch {
				reason: "unrecognized input".to_owned(),
				span: 0..expr.len(),
			},
			|err| Error::SyntaxMismatch {
				reason: err.to_string(),
				span: err.span().start()..err.span().end(),
			},
		)
	})?;

	// The grammar has no alternatives that could consume input differently, but the tokens must still add up to
	// exactly what was written.
	if tokens.iter().map(|token| token.raw).collect::<String>() != expr {
		return Err(Error::TokenReconstructionMismatch);
	}

	if tokens.len() > limits.max_terms() {
		return Err(Error::TooManyTerms {
			count: tokens.len(),
			max: limits.max_terms(),
		});
	}

	let mut dice_total: u64 = 0;
	let mut terms = Vec::with_capacity(tokens.len());

	for token in tokens {
		let sign = token.sign.unwrap_or_default();
		let raw = token.raw.to_owned();
		let invalid_number = || Error::InvalidNumber {
			token: token.raw.to_owned(),
			span: token.range(),
		};

		let first = parse_number(token.first).ok_or_else(invalid_number)?;
		let Some(sides) = token.sides else {
			terms.push(Term::Constant {
				sign,
				value: first,
				raw,
			});
			continue;
		};
		let sides = parse_number(sides).ok_or_else(invalid_number)?;

		if first < 1 || sides < 1 {
			return Err(Error::InvalidDiceTerm {
				token: raw,
				span: token.range(),
			});
		}

		let Some(sides) = u32::try_from(sides).ok().filter(|sides| *sides <= limits.max_sides()) else {
			return Err(Error::DiceSidesExceedLimit {
				token: raw,
				sides,
				max: limits.max_sides(),
				span: token.range(),
			});
		};

		dice_total = dice_total.saturating_add(first);
		let Some(count) = u32::try_from(first)
			.ok()
			.filter(|_| dice_total <= u64::from(limits.max_dice()))
		else {
			return Err(Error::DiceCountExceedsLimit {
				token: raw,
				total: dice_total,
				max: limits.max_dice(),
				span: token.range(),
			});
		};

		terms.push(Term::Dice {
			sign,
			count,
			sides,
			raw,
		});
	}

	Ok(Terms::new(terms))
}

/// Parses a string of ASCII digits, accepting only values up to [`MAX_VALUE`].
fn parse_number(digits: &str) -> Option<u64> {
	digits.parse::<u64>().ok().filter(|val| *val <= MAX_VALUE)
}
