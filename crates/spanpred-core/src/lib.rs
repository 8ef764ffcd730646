//! Core of spanpred: typed expression trees, the rewrites over them, and
//! the interval-predicate composer built from both.
//!
//! The composer takes two accessors (`entity -> T?`) and a comparison value
//! and returns one closed `entity -> bool` tree. That tree can be evaluated
//! locally ([`eval`]) or rendered for a backend ([`pushdown`]).

// public exports are one module level down
pub mod error;
pub mod eval;
pub mod expr;
pub mod interval;
pub mod model;
pub mod pushdown;
pub mod rewrite;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Domain vocabulary only; errors and rewrite passes stay in their modules.
///

pub mod prelude {
    pub use crate::{
        interval::{Accessor, Bounds, Predicate, compose, compose_closed, compose_half_open},
        model::{
            entity::EntityModel,
            field::{EntityFieldKind, EntityFieldModel},
        },
        traits::{Comparable, Entity},
        types::{Date, Timestamp},
        value::{Value, ValueType},
    };
}
