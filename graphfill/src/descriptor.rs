//! Type and field descriptors.
//!
//! Rust has no runtime reflection, so every type that takes part in random
//! population describes its own shape through [`Randomizable::descriptor`].
//! Descriptors for composite types and enumerations are normally produced by
//! `#[derive(Randomizable)]`; primitives, wrappers and collections are covered
//! by the implementations in this crate.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::InstantiationError;

/// A type-erased generated value
pub type AnyValue = Box<dyn Any>;

/// Constructs a default instance of a composite type
pub type ConstructFn = fn() -> Result<AnyValue, InstantiationError>;

/// Materializes generated elements into a concrete collection
pub type CollectFn = fn(Vec<AnyValue>) -> Result<AnyValue, InstantiationError>;

/// Wraps a value of the inner type into its wrapper (`Some`, `Box`, ...)
pub type WrapFn = fn(AnyValue) -> Result<AnyValue, InstantiationError>;

/// Borrows the wrapped value mutably; `None` for an empty wrapper
pub type InnerMutFn = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Trait for types whose shape is known to the populator
pub trait Randomizable: Any {
    /// Describe the shape of this type
    fn descriptor() -> TypeDescriptor;
}

/// Read-only description of a type's shape
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    shape: Shape,
}

/// The structural shape of a described type
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A registered primitive or well-known value type
    Scalar,
    /// A transparent wrapper such as `Option<T>` or `Box<T>`
    Wrapper(WrapperShape),
    /// An array, list or other enumerable collection
    Sequence(SequenceShape),
    /// A struct-like type with settable fields
    Composite(CompositeShape),
    /// A fieldless enum with named values
    Enumeration(EnumShape),
    /// A type no generation strategy applies to
    Opaque,
}

/// Shape of a transparent wrapper
#[derive(Debug, Clone, Copy)]
pub struct WrapperShape {
    /// Descriptor of the wrapped type
    pub inner: fn() -> TypeDescriptor,
    /// Lift a value of the wrapped type into the wrapper
    pub wrap: WrapFn,
    /// Reach into an existing wrapper
    pub inner_mut: InnerMutFn,
}

/// Which kind of collection a sequence is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Fixed once built, e.g. `Box<[T]>`
    Array,
    /// Supports positional insertion, e.g. `Vec<T>`
    List,
    /// Only needs to be iterable, e.g. `BTreeSet<T>`
    Enumerable,
}

/// Shape of a collection type
#[derive(Debug, Clone, Copy)]
pub struct SequenceShape {
    pub kind: SequenceKind,
    /// Descriptor of the element type
    pub element: fn() -> TypeDescriptor,
    /// Build the collection from generated elements
    pub collect: CollectFn,
}

/// Shape of a composite type
#[derive(Debug, Clone, Copy)]
pub struct CompositeShape {
    /// Best-effort parameterless construction
    pub construct: ConstructFn,
    /// The eligible fields, in declaration order
    pub fields: fn() -> Vec<FieldDescriptor>,
}

/// Shape of an enumeration
#[derive(Debug, Clone, Copy)]
pub struct EnumShape {
    /// Declared value names, in declaration order
    pub variants: &'static [&'static str],
    /// Produce the value at the given declaration index
    pub variant: fn(usize) -> Option<AnyValue>,
}

impl TypeDescriptor {
    fn new<T: Any>(shape: Shape) -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            shape,
        }
    }

    /// Descriptor of `T`
    pub fn of<T: Randomizable>() -> Self {
        T::descriptor()
    }

    /// Describe a registered primitive
    pub fn scalar<T: Any>() -> Self {
        Self::new::<T>(Shape::Scalar)
    }

    /// Describe a type with no generation strategy
    pub fn opaque<T: Any>() -> Self {
        Self::new::<T>(Shape::Opaque)
    }

    /// Describe a transparent wrapper around `inner`
    pub fn wrapper<T: Any>(
        inner: fn() -> TypeDescriptor,
        wrap: WrapFn,
        inner_mut: InnerMutFn,
    ) -> Self {
        Self::new::<T>(Shape::Wrapper(WrapperShape {
            inner,
            wrap,
            inner_mut,
        }))
    }

    /// Describe a collection of `element`
    pub fn sequence<T: Any>(
        kind: SequenceKind,
        element: fn() -> TypeDescriptor,
        collect: CollectFn,
    ) -> Self {
        Self::new::<T>(Shape::Sequence(SequenceShape {
            kind,
            element,
            collect,
        }))
    }

    /// Describe a composite type
    pub fn composite<T: Any>(construct: ConstructFn, fields: fn() -> Vec<FieldDescriptor>) -> Self {
        Self::new::<T>(Shape::Composite(CompositeShape { construct, fields }))
    }

    /// Describe an enumeration
    pub fn enumeration<T: Any>(
        variants: &'static [&'static str],
        variant: fn(usize) -> Option<AnyValue>,
    ) -> Self {
        Self::new::<T>(Shape::Enumeration(EnumShape { variants, variant }))
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The eligible fields of a composite; empty for every other shape
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        match self.shape {
            Shape::Composite(composite) => (composite.fields)(),
            _ => Vec::new(),
        }
    }
}

/// A public, readable and writable member of a composite type
pub struct FieldDescriptor {
    name: &'static str,
    ty: fn() -> TypeDescriptor,
    access: Box<dyn FieldAccess>,
}

impl FieldDescriptor {
    /// Describe field `name` of owner `O` with declared type `F`
    pub fn new<O: Any, F: Randomizable>(
        name: &'static str,
        get: fn(&O) -> &F,
        set: fn(&mut O, F),
    ) -> Self {
        Self {
            name,
            ty: F::descriptor,
            access: Box::new(TypedField { get, set }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptor of the declared field type
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }

    /// Read the field from `owner`; `None` if `owner` is not the declaring type
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        self.access.get(owner)
    }

    /// Assign `value` to the field, handing the value back on a type mismatch
    pub fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), AnyValue> {
        self.access.set(owner, value)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type", &self.descriptor().name())
            .finish()
    }
}

/// Internal trait for type-erased field access
trait FieldAccess {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;
    fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), AnyValue>;
}

struct TypedField<O, F> {
    get: fn(&O) -> &F,
    set: fn(&mut O, F),
}

impl<O: Any, F: Any> FieldAccess for TypedField<O, F> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        let owner = owner.downcast_ref::<O>()?;
        Some((self.get)(owner) as &dyn Any)
    }

    fn set(&self, owner: &mut dyn Any, value: AnyValue) -> Result<(), AnyValue> {
        let Some(owner) = owner.downcast_mut::<O>() else {
            return Err(value);
        };
        let value = value.downcast::<F>()?;
        (self.set)(owner, *value);
        Ok(())
    }
}

/// Construct `T` through its `Default` implementation
pub fn construct_default<T: Default + Any>() -> Result<AnyValue, InstantiationError> {
    Ok(Box::new(T::default()))
}

/// Construction path for types without a parameterless constructor
pub fn no_constructor() -> Result<AnyValue, InstantiationError> {
    Err(InstantiationError::NoConstructor)
}

/// Downcast a generated value back to `T`
pub fn downcast_value<T: Any>(value: AnyValue) -> Result<T, InstantiationError> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| InstantiationError::type_mismatch::<T>())
}

/// Collect generated elements of type `E` into the collection `C`
pub fn collect_into<C, E>(items: Vec<AnyValue>) -> Result<AnyValue, InstantiationError>
where
    C: FromIterator<E> + Any,
    E: Any,
{
    let collection = items
        .into_iter()
        .map(downcast_value::<E>)
        .collect::<Result<C, _>>()?;
    Ok(Box::new(collection))
}
