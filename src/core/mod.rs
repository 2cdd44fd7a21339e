//! Core primitives shared by the box loader and writer

pub mod codec;
pub mod error;

pub use error::{BoxError, BoxResult};
