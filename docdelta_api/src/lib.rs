//! Shared docdelta data models consumed by the core library and report readers.

pub mod block;
pub mod record;

pub use block::*;
pub use record::*;
