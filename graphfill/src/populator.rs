//! Recursive type-driven population of object graphs.
//!
//! A [`GenerationContext`] lives for exactly one top-level call. It holds the
//! random source, the configuration and the depth at which each composite
//! type was first created. That map is what stops self-referential types from
//! recursing forever.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::{Rng, RngCore};
use tracing::{debug, trace, warn};

use crate::classify::{Classification, resolve};
use crate::config::PopulateConfig;
use crate::descriptor::{AnyValue, CompositeShape, SequenceShape, TypeDescriptor};
use crate::instantiate::{COMPONENT_NAME, try_instantiate};
use crate::primitives;

/// Per-call generation state
pub struct GenerationContext<'a> {
    rng: &'a mut dyn RngCore,
    config: &'a PopulateConfig,
    first_seen: HashMap<TypeId, usize>,
}

impl<'a> GenerationContext<'a> {
    /// Create a fresh context for one top-level call
    pub fn new(rng: &'a mut dyn RngCore, config: &'a PopulateConfig) -> Self {
        Self {
            rng,
            config,
            first_seen: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn first_seen_depth(&self, type_id: TypeId) -> Option<usize> {
        self.first_seen.get(&type_id).copied()
    }

    /// Assign a generated value to every eligible field of `instance`.
    ///
    /// Fields that yield no value keep whatever the constructor put there.
    pub fn populate_fields(
        &mut self,
        instance: &mut dyn Any,
        descriptor: &TypeDescriptor,
        depth: usize,
    ) {
        for field in descriptor.fields() {
            let field_type = field.descriptor();
            let Some(value) = self.random_value(&field_type, field.name(), depth) else {
                continue;
            };
            if field.set(instance, value).is_err() {
                warn!(
                    field = field.name(),
                    "{} generated a value of the wrong type for {}.{}",
                    COMPONENT_NAME,
                    descriptor.name(),
                    field.name()
                );
            }
        }
    }

    /// Generate a value for `descriptor`, or `None` if nothing can be generated.
    ///
    /// `depth` is the depth of the object holding the value; collections and
    /// composites are generated one level deeper.
    pub fn random_value(
        &mut self,
        descriptor: &TypeDescriptor,
        label: &str,
        depth: usize,
    ) -> Option<AnyValue> {
        let resolved = resolve(*descriptor);
        let target = &resolved.target;

        let value = match resolved.classification {
            Classification::Primitive(generator) => Some(generator.generate(&mut *self.rng, label)),
            Classification::Array(sequence)
            | Classification::List(sequence)
            | Classification::Enumerable(sequence) => {
                self.random_sequence(target, sequence, label, depth + 1)
            }
            Classification::Composite(composite) => {
                self.random_composite(target, composite, depth + 1)
            }
            Classification::Enum(enumeration) => primitives::random_enum(&mut *self.rng, &enumeration),
            Classification::Unsupported => {
                trace!(type_name = target.name(), label = label, "no generation strategy, skipping");
                None
            }
        }?;

        match resolved.rewrap(value) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(
                    "{} was unable to create a {} instance: {}.",
                    COMPONENT_NAME,
                    descriptor.name(),
                    error
                );
                None
            }
        }
    }

    /// Generate between one and the configured maximum number of elements.
    ///
    /// Any element that cannot be generated abandons the whole collection.
    fn random_sequence(
        &mut self,
        target: &TypeDescriptor,
        sequence: SequenceShape,
        label: &str,
        depth: usize,
    ) -> Option<AnyValue> {
        let max = self.config.max_collection_size.max(1);
        let count = self.rng.gen_range(1..=max);
        let element = (sequence.element)();

        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let item_label = format!("{}[{}]", label, index);
            let Some(item) = self.random_value(&element, &item_label, depth) else {
                debug!(
                    type_name = target.name(),
                    element = element.name(),
                    "element could not be generated, abandoning collection"
                );
                return None;
            };
            items.push(item);
        }

        try_instantiate(target.name(), || (sequence.collect)(items))
    }

    /// Construct and populate a composite at `depth`, subject to the depth and
    /// cycle gates.
    fn random_composite(
        &mut self,
        target: &TypeDescriptor,
        composite: CompositeShape,
        depth: usize,
    ) -> Option<AnyValue> {
        if self.config.exceeds_max_depth(depth) {
            trace!(type_name = target.name(), depth = depth, "max depth exceeded");
            return None;
        }

        // A type already created higher up is only created again by a sibling
        // at the same depth; deeper occurrences would recurse.
        let should_create = match self.first_seen.entry(target.type_id()) {
            Entry::Occupied(entry) => *entry.get() == depth,
            Entry::Vacant(entry) => {
                entry.insert(depth);
                true
            }
        };
        if !should_create {
            trace!(type_name = target.name(), depth = depth, "type already created at another depth");
            return None;
        }

        let mut instance = try_instantiate(target.name(), composite.construct)?;
        self.populate_fields(&mut *instance, target, depth);
        Some(instance)
    }
}
