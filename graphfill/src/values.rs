//! The public entry point: [`RandomValues`].

use std::any::Any;

use chrono::{NaiveDate, NaiveDateTime};
use rand::RngCore;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::classify::{Classification, resolve};
use crate::config::PopulateConfig;
use crate::descriptor::{Randomizable, Shape, downcast_value};
use crate::error::{InstantiationError, PopulateError, Result};
use crate::instantiate::instantiate;
use crate::populator::GenerationContext;
use crate::primitives;
use crate::rng::create_rng;

/// Creates and populates instances with random values.
///
/// ```rust
/// use graphfill::{RandomValues, Randomizable};
///
/// #[derive(Debug, Default, Randomizable)]
/// pub struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let point: Point = RandomValues::new().create_random().unwrap();
/// # let _ = point;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomValues {
    config: PopulateConfig,
}

impl RandomValues {
    /// Create a helper with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a helper from an explicit configuration
    pub fn with_config(config: PopulateConfig) -> Self {
        Self { config }
    }

    /// Set the maximum number of elements generated per collection
    pub fn with_max_collection_size(mut self, max_collection_size: usize) -> Self {
        self.config.max_collection_size = max_collection_size;
        self
    }

    /// Set the maximum depth of nested composite instances
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = Some(max_depth);
        self
    }

    /// Seed every random source this helper creates
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    pub fn max_collection_size(&self) -> usize {
        self.config.max_collection_size
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.config.max_depth
    }

    pub fn seed(&self) -> Option<u64> {
        self.config.seed
    }

    fn rng(&self) -> StdRng {
        create_rng(self.config.seed)
    }

    /// Create an instance of `T` and populate it with random values
    pub fn create_random<T: Randomizable>(&self) -> Result<T> {
        self.create_random_with(|_: &mut T| {})
    }

    /// Create and populate an instance of `T`, then hand it to `callback` for
    /// custom assignments
    pub fn create_random_with<T, F>(&self, callback: F) -> Result<T>
    where
        T: Randomizable,
        F: FnOnce(&mut T),
    {
        let mut instance = self.create_random_with_rng::<T>(&mut self.rng())?;
        callback(&mut instance);
        Ok(instance)
    }

    /// Alias of [`create_random_with`](Self::create_random_with)
    pub fn create_instance_with_random_values<T, F>(&self, callback: F) -> Result<T>
    where
        T: Randomizable,
        F: FnOnce(&mut T),
    {
        self.create_random_with(callback)
    }

    /// Create and populate an instance of `T` drawing from `rng`.
    ///
    /// Only a failure to build `T` itself is reported; failures further down
    /// the graph leave the affected fields at their defaults.
    pub fn create_random_with_rng<T: Randomizable>(&self, rng: &mut dyn RngCore) -> Result<T> {
        self.config.validate()?;

        let descriptor = T::descriptor();
        let type_name = descriptor.name();
        let resolved = resolve(descriptor);
        let mut context = GenerationContext::new(rng, &self.config);

        let value = match resolved.classification {
            Classification::Composite(composite) => {
                let mut instance = instantiate(composite.construct).map_err(|source| {
                    PopulateError::instantiation(resolved.target.name(), source)
                })?;
                context.populate_fields(&mut *instance, &resolved.target, 1);
                resolved
                    .rewrap(instance)
                    .map_err(|source| PopulateError::instantiation(type_name, source))?
            }
            Classification::Enum(shape) if shape.variants.is_empty() => {
                return Err(PopulateError::EmptyEnum { type_name });
            }
            Classification::Unsupported => {
                return Err(PopulateError::Unsupported { type_name });
            }
            _ => context.random_value(&descriptor, "", 0).ok_or_else(|| {
                PopulateError::instantiation(
                    type_name,
                    InstantiationError::failed("no value could be generated"),
                )
            })?,
        };

        downcast_value::<T>(value).map_err(|source| PopulateError::instantiation(type_name, source))
    }

    /// Generate a single random value of `T`
    pub fn random_value<T: Randomizable>(&self) -> Result<T> {
        self.create_random()
    }

    /// Populate the eligible fields of `instance` and return it
    pub fn populate<T: Randomizable>(&self, mut instance: T) -> Result<T> {
        self.populate_in_place(&mut instance)?;
        Ok(instance)
    }

    /// Populate the eligible fields of `instance` in place
    pub fn populate_in_place<T: Randomizable>(&self, instance: &mut T) -> Result<()> {
        self.populate_in_place_with_rng(instance, &mut self.rng())
    }

    /// Populate the eligible fields of `instance` in place, drawing from `rng`.
    ///
    /// `T` must be a composite, optionally behind `Option`/`Box` wrappers. The
    /// composite inside the wrappers is populated; an empty `Option` is left
    /// unchanged. Any other type is [`PopulateError::Unsupported`].
    pub fn populate_in_place_with_rng<T: Randomizable>(
        &self,
        instance: &mut T,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        self.config.validate()?;

        let descriptor = T::descriptor();
        let resolved = resolve(descriptor);
        if !matches!(resolved.classification, Classification::Composite(_)) {
            return Err(PopulateError::Unsupported {
                type_name: descriptor.name(),
            });
        }
        let Some(target) = resolved.target_mut(instance as &mut dyn Any) else {
            return Ok(());
        };

        let mut context = GenerationContext::new(rng, &self.config);
        context.populate_fields(target, &resolved.target, 1);
        Ok(())
    }

    /// Pick one declared value of the enumeration `T`
    pub fn random_enum_value<T: Randomizable>(&self) -> Result<T> {
        let descriptor = T::descriptor();
        let type_name = descriptor.name();
        let Shape::Enumeration(shape) = descriptor.shape() else {
            return Err(PopulateError::NotAnEnum { type_name });
        };

        let value = primitives::random_enum(&mut self.rng(), &shape)
            .ok_or(PopulateError::EmptyEnum { type_name })?;
        downcast_value::<T>(value).map_err(|source| PopulateError::instantiation(type_name, source))
    }

    pub fn random_bool(&self) -> bool {
        primitives::random_bool(&mut self.rng(), "")
    }

    pub fn random_byte(&self) -> u8 {
        primitives::random_byte(&mut self.rng(), "")
    }

    pub fn random_sbyte(&self) -> i8 {
        primitives::random_sbyte(&mut self.rng(), "")
    }

    pub fn random_short(&self) -> i16 {
        primitives::random_short(&mut self.rng(), "")
    }

    pub fn random_ushort(&self) -> u16 {
        primitives::random_ushort(&mut self.rng(), "")
    }

    pub fn random_int(&self) -> i32 {
        primitives::random_int(&mut self.rng(), "")
    }

    pub fn random_uint(&self) -> u32 {
        primitives::random_uint(&mut self.rng(), "")
    }

    pub fn random_long(&self) -> i64 {
        primitives::random_long(&mut self.rng(), "")
    }

    pub fn random_ulong(&self) -> u64 {
        primitives::random_ulong(&mut self.rng(), "")
    }

    pub fn random_float(&self) -> f32 {
        primitives::random_float(&mut self.rng(), "")
    }

    pub fn random_double(&self) -> f64 {
        primitives::random_double(&mut self.rng(), "")
    }

    pub fn random_decimal(&self) -> Decimal {
        primitives::random_decimal(&mut self.rng(), "")
    }

    pub fn random_char(&self) -> char {
        primitives::random_char(&mut self.rng(), "")
    }

    pub fn random_bytes(&self) -> Vec<u8> {
        primitives::random_bytes(&mut self.rng(), "")
    }

    pub fn random_date(&self) -> NaiveDate {
        primitives::random_date(&mut self.rng(), "")
    }

    pub fn random_date_time(&self) -> NaiveDateTime {
        primitives::random_date_time(&mut self.rng(), "")
    }

    pub fn random_uuid(&self) -> Uuid {
        primitives::random_uuid(&mut self.rng(), "")
    }

    /// The prefix followed by a random identifier
    pub fn random_string(&self, prefix: Option<&str>) -> String {
        primitives::random_identifier_string(&mut self.rng(), prefix.unwrap_or_default())
    }
}
