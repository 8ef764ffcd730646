//! ## Crate layout
//! - `core`: expression trees, rewrites, the interval composer, local
//!   evaluation and filter rendering.
//! - `config`: TOML interval definitions.
//! - `error`: public error taxonomy over both.
//!
//! [`IntervalRegistry`] ties the two together: intervals named in config are
//! resolved against registered entity models and composed on request.

pub use spanpred_config as config;
pub use spanpred_core as core;

pub mod error;
mod registry;

pub use error::Error;
pub use registry::IntervalRegistry;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        IntervalRegistry,
        config::Config,
        core::{
            eval::eval_predicate,
            expr::Lambda,
            prelude::*,
            pushdown::render_filter,
        },
    };
}
