//! Descriptors for wrappers and standard collections.

use std::any::Any;
use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use crate::descriptor::{
    AnyValue, Randomizable, SequenceKind, TypeDescriptor, collect_into, downcast_value,
};
use crate::error::InstantiationError;

fn wrap_some<T: Randomizable>(value: AnyValue) -> Result<AnyValue, InstantiationError> {
    Ok(Box::new(Some(downcast_value::<T>(value)?)))
}

fn wrap_box<T: Randomizable>(value: AnyValue) -> Result<AnyValue, InstantiationError> {
    Ok(Box::new(Box::new(downcast_value::<T>(value)?)))
}

fn some_mut<T: Randomizable>(value: &mut dyn Any) -> Option<&mut dyn Any> {
    value
        .downcast_mut::<Option<T>>()?
        .as_mut()
        .map(|inner| inner as &mut dyn Any)
}

fn box_mut<T: Randomizable>(value: &mut dyn Any) -> Option<&mut dyn Any> {
    value
        .downcast_mut::<Box<T>>()
        .map(|inner| &mut **inner as &mut dyn Any)
}

impl<T: Randomizable> Randomizable for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self>(T::descriptor, wrap_some::<T>, some_mut::<T>)
    }
}

impl<T: Randomizable> Randomizable for Box<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self>(T::descriptor, wrap_box::<T>, box_mut::<T>)
    }
}

impl<T: Randomizable> Randomizable for Box<[T]> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(SequenceKind::Array, T::descriptor, collect_into::<Self, T>)
    }
}

impl<T: Randomizable> Randomizable for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(SequenceKind::List, T::descriptor, collect_into::<Self, T>)
    }
}

impl<T: Randomizable> Randomizable for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(SequenceKind::List, T::descriptor, collect_into::<Self, T>)
    }
}

impl<T: Randomizable> Randomizable for LinkedList<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(SequenceKind::List, T::descriptor, collect_into::<Self, T>)
    }
}

impl<T: Randomizable + Eq + Hash> Randomizable for HashSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(
            SequenceKind::Enumerable,
            T::descriptor,
            collect_into::<Self, T>,
        )
    }
}

impl<T: Randomizable + Ord> Randomizable for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence::<Self>(
            SequenceKind::Enumerable,
            T::descriptor,
            collect_into::<Self, T>,
        )
    }
}
