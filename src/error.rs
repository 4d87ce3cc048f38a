//! Validation errors raised while parsing an expression.

use alloc::string::String;
use core::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error produced when an expression is rejected.
/// Only the first violated rule is reported, in the order the variants are listed here.
///
/// Spans are byte ranges in the whitespace-stripped expression.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// Nothing is left of the expression after removing whitespace.
	///
	/// # Examples
	/// ```
	/// use fairroll::{Error, Terms};
	///
	/// assert!(matches!(" \t ".parse::<Terms>(), Err(Error::EmptyExpression)));
	/// ```
	#[error("expression is empty")]
	EmptyExpression,

	/// The expression does not follow the `[+-]NdM|N ([+-]NdM|N)*` grammar.
	#[error("syntax does not match NdM format: {reason}")]
	SyntaxMismatch {
		/// What the parser expected and found instead
		reason: String,

		/// Location of the first syntax problem
		span: Range<usize>,
	},

	/// Reading the tokens back in order does not reproduce the expression.
	#[error("unsupported token format")]
	TokenReconstructionMismatch,

	/// There are more terms than allowed.
	#[error("too many terms ({count}, max {max})")]
	TooManyTerms {
		/// Number of terms in the expression
		count: usize,

		/// Configured maximum
		max: usize,
	},

	/// A number in a term doesn't fit in the accepted integer range.
	#[error("invalid number in term \"{token}\"")]
	InvalidNumber {
		/// Offending token
		token: String,

		/// Location of the token
		span: Range<usize>,
	},

	/// A dice term has zero dice or zero sides.
	#[error("invalid dice term \"{token}\": count and sides must be at least 1")]
	InvalidDiceTerm {
		/// Offending token
		token: String,

		/// Location of the token
		span: Range<usize>,
	},

	/// A die has more sides than allowed.
	#[error("dice sides exceed limit in \"{token}\" ({sides}, max {max})")]
	DiceSidesExceedLimit {
		/// Offending token
		token: String,

		/// Number of sides requested
		sides: u64,

		/// Configured maximum
		max: u32,

		/// Location of the token
		span: Range<usize>,
	},

	/// The running total of dice went over the limit at this token.
	#[error("dice count exceeds limit at \"{token}\" ({total}, max {max})")]
	DiceCountExceedsLimit {
		/// Token that pushed the total over
		token: String,

		/// Running total of dice including this token
		total: u64,

		/// Configured maximum
		max: u32,

		/// Location of the token
		span: Range<usize>,
	},
}

impl Error {
	/// Stable error code shared by every validation error, for clients that don't branch on the kind.
	pub const CODE: &'static str = "INVALID_EXPRESSION";

	/// Gets the kind of error, without any of its data.
	#[must_use]
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::EmptyExpression => ErrorKind::EmptyExpression,
			Self::SyntaxMismatch { .. } => ErrorKind::SyntaxMismatch,
			Self::TokenReconstructionMismatch => ErrorKind::TokenReconstructionMismatch,
			Self::TooManyTerms { .. } => ErrorKind::TooManyTerms,
			Self::InvalidNumber { .. } => ErrorKind::InvalidNumber,
			Self::InvalidDiceTerm { .. } => ErrorKind::InvalidDiceTerm,
			Self::DiceSidesExceedLimit { .. } => ErrorKind::DiceSidesExceedLimit,
			Self::DiceCountExceedsLimit { .. } => ErrorKind::DiceCountExceedsLimit,
		}
	}

	/// Gets the span of the expression the error points at, if it points anywhere specific.
	#[must_use]
	pub fn span(&self) -> Option<Range<usize>> {
		match self {
			Self::SyntaxMismatch { span, .. }
			| Self::InvalidNumber { span, .. }
			| Self::InvalidDiceTerm { span, .. }
			| Self::DiceSidesExceedLimit { span, .. }
			| Self::DiceCountExceedsLimit { span, .. } => Some(span.clone()),
			Self::EmptyExpression | Self::TokenReconstructionMismatch | Self::TooManyTerms { .. } => None,
		}
	}

	/// Gets the offending token, for errors caused by a single term.
	#[must_use]
	pub fn token(&self) -> Option<&str> {
		match self {
			Self::InvalidNumber { token, .. }
			| Self::InvalidDiceTerm { token, .. }
			| Self::DiceSidesExceedLimit { token, .. }
			| Self::DiceCountExceedsLimit { token, .. } => Some(token),
			_ => None,
		}
	}

	/// Builds the structured details to report alongside the error message.
	#[must_use]
	pub fn details(&self) -> Details {
		Details {
			field: "expression",
			kind: self.kind(),
			token: self.token().map(String::from),
			span: self.span(),
		}
	}
}

/// Discriminant of an [`Error`], for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
	feature = "serde",
	derive(Serialize, Deserialize),
	serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[non_exhaustive]
pub enum ErrorKind {
	/// See [`Error::EmptyExpression`].
	EmptyExpression,
	/// See [`Error::SyntaxMismatch`].
	SyntaxMismatch,
	/// See [`Error::TokenReconstructionMismatch`].
	TokenReconstructionMismatch,
	/// See [`Error::TooManyTerms`].
	TooManyTerms,
	/// See [`Error::InvalidNumber`].
	InvalidNumber,
	/// See [`Error::InvalidDiceTerm`].
	InvalidDiceTerm,
	/// See [`Error::DiceSidesExceedLimit`].
	DiceSidesExceedLimit,
	/// See [`Error::DiceCountExceedsLimit`].
	DiceCountExceedsLimit,
}

impl ErrorKind {
	/// Gets the stable identifier of the kind.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::EmptyExpression => "EMPTY_EXPRESSION",
			Self::SyntaxMismatch => "SYNTAX_MISMATCH",
			Self::TokenReconstructionMismatch => "TOKEN_RECONSTRUCTION_MISMATCH",
			Self::TooManyTerms => "TOO_MANY_TERMS",
			Self::InvalidNumber => "INVALID_NUMBER",
			Self::InvalidDiceTerm => "INVALID_DICE_TERM",
			Self::DiceSidesExceedLimit => "DICE_SIDES_EXCEED_LIMIT",
			Self::DiceCountExceedsLimit => "DICE_COUNT_EXCEEDS_LIMIT",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Structured details about an [`Error`], as a transport layer would attach to its response
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[non_exhaustive]
pub struct Details {
	/// Request field the error concerns (always `expression`)
	pub field: &'static str,

	/// Kind of error
	pub kind: ErrorKind,

	/// Offending token, if the error is about a single term
	#[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
	pub token: Option<String>,

	/// Byte range in the whitespace-stripped expression, if the error points somewhere specific
	#[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
	pub span: Option<Range<usize>>,
}
