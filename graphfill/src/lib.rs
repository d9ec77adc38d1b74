//! # Graphfill - Random Object Graph Population
//!
//! Graphfill builds instances of arbitrary types and fills every public field
//! with a plausible random value, recursing through nested composites,
//! collections, optional values and enumerations. It is meant for tests that
//! need richly populated inputs, such as checking that a mapping copies every
//! field.
//!
//! ## Quick Start
//!
//! ```rust
//! use graphfill::{RandomValues, Randomizable};
//!
//! #[derive(Debug, Default, Randomizable)]
//! pub struct Address {
//!     pub street: String,
//!     pub number: u16,
//! }
//!
//! #[derive(Debug, Default, Randomizable)]
//! pub struct Customer {
//!     pub name: String,
//!     pub address: Option<Address>,
//!     pub tags: Vec<String>,
//! }
//!
//! let customer: Customer = RandomValues::new().create_random().unwrap();
//! assert!(customer.name.starts_with("name"));
//! assert!(customer.address.is_some());
//! assert!(!customer.tags.is_empty());
//! ```
//!
//! Self-referential types are populated once per level: a type that already
//! appeared higher up in the graph is left at its default.

extern crate self as graphfill;

pub mod classify;
pub mod collections;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod instantiate;
pub mod populator;
pub mod primitives;
pub mod registry;
pub mod rng;
pub mod values;

pub use classify::{Classification, classify, resolve};
pub use config::{ConfigError, DEFAULT_MAX_COLLECTION_SIZE, PopulateConfig};
pub use descriptor::{AnyValue, FieldDescriptor, Randomizable, Shape, TypeDescriptor};
pub use error::{InstantiationError, PopulateError, Result};
pub use populator::GenerationContext;
pub use rng::create_rng;
pub use values::RandomValues;

// Re-export derive macro from separate crate when derive feature is enabled
#[cfg(feature = "derive")]
pub use graphfill_derive::Randomizable;
