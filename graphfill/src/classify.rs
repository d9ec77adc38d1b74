//! Type classification: which generation strategy applies to a type.

use std::any::Any;

use crate::descriptor::{
    AnyValue, CompositeShape, EnumShape, SequenceKind, SequenceShape, Shape, TypeDescriptor,
    WrapperShape,
};
use crate::error::InstantiationError;
use crate::registry::{self, ScalarGenerator};

/// The generation strategy for a type, in precedence order
#[derive(Debug, Clone, Copy)]
pub enum Classification {
    /// A registered primitive, plain or nullable
    Primitive(ScalarGenerator),
    Array(SequenceShape),
    List(SequenceShape),
    Enumerable(SequenceShape),
    Composite(CompositeShape),
    Enum(EnumShape),
    /// No strategy applies; the field is skipped
    Unsupported,
}

/// Classify a descriptor.
///
/// Registered primitives win over every structural shape, so `Vec<u8>` is a
/// byte sequence and `Option<i32>` a nullable integer.
pub fn classify(descriptor: &TypeDescriptor) -> Classification {
    if let Some(generator) = registry::lookup(descriptor.type_id()) {
        return Classification::Primitive(generator);
    }

    match descriptor.shape() {
        Shape::Sequence(sequence) => match sequence.kind {
            SequenceKind::Array => Classification::Array(sequence),
            SequenceKind::List => Classification::List(sequence),
            SequenceKind::Enumerable => Classification::Enumerable(sequence),
        },
        Shape::Composite(composite) => Classification::Composite(composite),
        Shape::Enumeration(enumeration) => Classification::Enum(enumeration),
        Shape::Scalar | Shape::Wrapper(_) | Shape::Opaque => Classification::Unsupported,
    }
}

/// A descriptor with its transparent wrappers peeled off
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The innermost type that generation applies to
    pub target: TypeDescriptor,
    /// Strategy for `target`
    pub classification: Classification,
    /// Wrappers from outermost to innermost
    wrappers: Vec<WrapperShape>,
}

impl Resolved {
    /// Whether any wrapper was peeled
    pub fn is_wrapped(&self) -> bool {
        !self.wrappers.is_empty()
    }

    /// Re-apply the peeled wrappers to a value generated for `target`
    pub fn rewrap(&self, value: AnyValue) -> Result<AnyValue, InstantiationError> {
        self.wrappers
            .iter()
            .rev()
            .try_fold(value, |value, wrapper| (wrapper.wrap)(value))
    }

    /// Borrow the `target` value inside an existing wrapped value.
    ///
    /// Returns `None` when a wrapper along the way is empty.
    pub fn target_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.wrappers
            .iter()
            .try_fold(value, |value, wrapper| (wrapper.inner_mut)(value))
    }
}

/// Peel transparent wrappers and classify the wrapped type.
///
/// Peeling stops at the first registered primitive, so nullable primitives
/// keep their own table entry.
pub fn resolve(descriptor: TypeDescriptor) -> Resolved {
    let mut target = descriptor;
    let mut wrappers = Vec::new();

    while registry::lookup(target.type_id()).is_none() {
        let Shape::Wrapper(wrapper) = target.shape() else {
            break;
        };
        wrappers.push(wrapper);
        target = (wrapper.inner)();
    }

    Resolved {
        classification: classify(&target),
        target,
        wrappers,
    }
}
