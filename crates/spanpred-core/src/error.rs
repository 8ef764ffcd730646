use crate::{
    eval::EvalError, expr::TypeError, interval::ComposeError, pushdown::PushdownError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Union of every core failure, with a stable classification.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Pushdown(#[from] PushdownError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Compose(ComposeError::NotClosed { .. }) => ErrorClass::InvariantViolation,
            Self::Compose(_) | Self::Type(_) => ErrorClass::Invalid,
            Self::Eval(EvalError::MissingField { .. }) => ErrorClass::NotFound,
            Self::Eval(_) => ErrorClass::Invalid,
            Self::Pushdown(_) => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Compose(_) => ErrorOrigin::Compose,
            Self::Eval(_) => ErrorOrigin::Eval,
            Self::Pushdown(_) => ErrorOrigin::Pushdown,
            Self::Type(_) => ErrorOrigin::Expr,
        }
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Invalid,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Invalid => "invalid",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Compose,
    Eval,
    Expr,
    Pushdown,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compose => "compose",
            Self::Eval => "eval",
            Self::Expr => "expr",
            Self::Pushdown => "pushdown",
        };
        write!(f, "{label}")
    }
}
