//! # coilflow
//!
//! Bidirectional codec between raw register bytes and logical values for
//! heat pump register tables.
//!
//! - [`CoilDefinition`] - static description of one register (width,
//!   factor, bounds, mapping, word order)
//! - [`Coil`] - a definition plus its current value, assignable from
//!   either side
//! - [`CoilTable`] - definitions loaded from a JSON register table
//!
//! Failures are split by where they happen: [`ValidationError`] when a
//! logical value is assigned, [`DecodeError`] when device bytes are
//! assigned, and [`EncodeError`] when the value is turned back into bytes.

pub mod coil;
pub mod config;
pub mod error;
pub mod hex;

pub use coil::{Coil, CoilDefinition, CoilDefinitionBuilder, CoilMapping, CoilValue};
pub use config::{CoilConfig, CoilTable};
pub use error::{CoilflowError, DecodeError, EncodeError, Result, ValidationError};
