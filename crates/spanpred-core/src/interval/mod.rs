//! Interval-containment predicates.
//!
//! An interval is described by two accessors on an entity (its start and
//! end, either possibly absent). Composition inlines them into a shared
//! template and yields one closed `entity -> bool` predicate:
//!
//! ```text
//! (start == null || start <= v)  &&  (end == null || end >= v)
//! ```
//!
//! with `<=`/`>=` relaxed to `<`/`>` on an excluded side.

mod compose;
mod template;
mod typed;


pub use compose::{
    BoundSide, Bounds, ComposeError, ENTITY_PARAM, compose, compose_closed, compose_dyn,
    compose_half_open,
};
pub use template::{IntervalTemplate, TemplateSlot};
pub use typed::{Accessor, Predicate, field_accessor, unbounded_accessor};
