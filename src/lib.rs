//! pylight - incremental Python highlighting engine
//!
//! Lines are highlighted one at a time, in any order, while a
//! per-document context remembers the imports and variables seen so far.

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use config::Config;
pub use error::{PylightError, Result};
