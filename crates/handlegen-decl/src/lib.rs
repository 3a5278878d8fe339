//! Declaration model of a parsed C translation unit.
//!
//! Only the surface a wrapper generator needs is modelled: enumerations,
//! function declarations, and typedef/record declarations.

mod types;
mod item;
mod module;

pub mod filter;

pub use types::*;
pub use item::*;
pub use module::*;
