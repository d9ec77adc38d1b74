//! Derive macro for the graphfill random populator
//!
//! This crate provides `#[derive(Randomizable)]`, which describes a type's
//! shape to the populator.

use proc_macro::TokenStream;

mod derive;

/// Derive macro implementing the `Randomizable` trait
///
/// Structs are described as composites whose public fields are populated in
/// declaration order; private fields keep the value the constructor gave them.
/// Enums must be fieldless and are described by their declared values.
///
/// # Basic Usage
///
/// ```rust
/// use graphfill::Randomizable;
///
/// #[derive(Default, Randomizable)]
/// pub struct User {
///     pub id: u32,
///     pub name: String,
///     pub active: bool,
///     revision: u32,
/// }
///
/// #[derive(Randomizable)]
/// pub enum Status {
///     Active,
///     Inactive,
/// }
/// ```
///
/// # Construction
///
/// By default instances are built with `Default::default()`. Types without a
/// `Default` implementation name a constructor or opt out of construction:
///
/// ```rust
/// use graphfill::Randomizable;
///
/// #[derive(Randomizable)]
/// #[randomizable(constructor = "Account::empty")]
/// pub struct Account {
///     pub owner: String,
/// }
///
/// impl Account {
///     fn empty() -> Self {
///         Self { owner: String::new() }
///     }
/// }
///
/// #[derive(Randomizable)]
/// #[randomizable(no_default)]
/// pub struct Connection {
///     pub host: String,
/// }
/// ```
///
/// # Supported Attributes
///
/// - `#[randomizable(constructor = "path")]`: builds the instance by calling `path()`
/// - `#[randomizable(no_default)]`: the populator never instantiates the type
/// - `#[randomizable(skip)]` on a field: the field is never populated
///
/// # Generic Types
///
/// Every type parameter gets a `Randomizable` bound:
///
/// ```rust
/// use graphfill::Randomizable;
///
/// #[derive(Default, Randomizable)]
/// pub struct Page<T> {
///     pub items: Vec<T>,
///     pub number: u32,
/// }
/// ```
#[proc_macro_derive(Randomizable, attributes(randomizable))]
pub fn derive_randomizable(input: TokenStream) -> TokenStream {
    derive::derive_randomizable_impl(input)
}
