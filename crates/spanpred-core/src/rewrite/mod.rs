//! Structural tree rewrites.
//!
//! Every pass is a total function from a tree to a new tree. Nothing is
//! mutated in place; subtrees a pass does not touch are shared with its input.
//!
//! - `substitute`: identity-keyed sub-tree replacement
//! - `unify_parameters`: collapse all free parameters into one
//! - `bind_constants`: parameter → literal, keyed by parameter identity
//! - `normalize`: constant folding

mod bind;
mod normalize;
mod substitute;
mod unify;


pub use bind::{ConstantBindings, bind_constants};
pub use normalize::normalize;
pub use substitute::substitute;
pub use unify::unify_parameters;
