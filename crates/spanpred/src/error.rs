use derive_more::Display;
use serde::{Deserialize, Serialize};
use spanpred_config::ConfigError;
use spanpred_core::{
    error::{Error as CoreError, ErrorClass, ErrorOrigin as CoreErrorOrigin},
    eval::EvalError,
    expr::TypeError,
    interval::ComposeError,
    pushdown::PushdownError,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_interval(name: &str) -> Self {
        Self::new(
            ErrorKind::NotFound,
            ErrorOrigin::Registry,
            format!("no interval named '{name}'"),
        )
    }

    pub(crate) fn unknown_entity(interval: &str, entity: &str) -> Self {
        Self::new(
            ErrorKind::NotFound,
            ErrorOrigin::Registry,
            format!("interval '{interval}' refers to unregistered entity '{entity}'"),
        )
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        let kind = match err.class() {
            ErrorClass::Invalid => ErrorKind::Invalid,
            ErrorClass::InvariantViolation => ErrorKind::Internal,
            ErrorClass::NotFound => ErrorKind::NotFound,
            ErrorClass::Unsupported => ErrorKind::Unsupported,
        };

        Self::new(kind, err.origin().into(), err.to_string())
    }
}

macro_rules! from_core {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    CoreError::from(err).into()
                }
            }
        )*
    };
}

from_core!(ComposeError, EvalError, PushdownError, TypeError);

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ErrorKind::Unavailable,
            ConfigError::Invalid(_) | ConfigError::Parse(_) => ErrorKind::Invalid,
        };

        Self::new(kind, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Ill-typed input: accessors, values, config shape.
    Invalid,

    /// A named interval, entity or field does not exist.
    NotFound,

    /// Valid predicate that a backend cannot translate.
    Unsupported,

    /// Config source could not be read.
    Unavailable,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Compose,
    Config,
    Eval,
    Expr,
    Pushdown,
    Registry,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Compose => Self::Compose,
            CoreErrorOrigin::Eval => Self::Eval,
            CoreErrorOrigin::Expr => Self::Expr,
            CoreErrorOrigin::Pushdown => Self::Pushdown,
        }
    }
}
