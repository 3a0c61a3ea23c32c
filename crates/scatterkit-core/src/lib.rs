//! scatterkit Core - Basic data structures for detector data reduction
//!
//! This crate provides the fundamental data structures used throughout
//! the scatterkit toolkit:
//!
//! - [`Frame`] - 2D double-precision detector image (also used for masks)
//! - [`MdDict`] / [`MdValue`] - Nested metadata with physical units
//! - [`XrData`] - Data object carried together with its metadata
//! - [`Error`] - Shared error type (configuration and shape errors)

pub mod error;
pub mod frame;
pub mod metadata;

pub use error::{Error, Result};
pub use frame::Frame;
pub use metadata::{
    CORE_KEYS, KeyKind, KeySpec, MdDict, MdNode, MdValue, PATH_SEPARATOR, TEXT_UNITS, Value,
    XrData, core_key,
};
