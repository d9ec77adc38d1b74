//! Best-effort instantiation guard.
//!
//! Constructing an arbitrary type may fail: there may be no parameterless
//! constructor, or the constructor may panic. Inside an object graph such a
//! failure must only cost the affected field, never the rest of the graph.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::descriptor::AnyValue;
use crate::error::InstantiationError;

/// Name used in diagnostics emitted by the populator
pub const COMPONENT_NAME: &str = "RandomValues";

/// Run a construction closure, turning panics into [`InstantiationError::Panicked`]
pub fn instantiate<F>(construct: F) -> Result<AnyValue, InstantiationError>
where
    F: FnOnce() -> Result<AnyValue, InstantiationError>,
{
    match panic::catch_unwind(AssertUnwindSafe(construct)) {
        Ok(result) => result,
        Err(payload) => Err(InstantiationError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Run a construction closure, absorbing any failure into `None`.
///
/// Failures are reported through `tracing` as
/// `RandomValues was unable to create a <type> instance: <reason>.`
pub fn try_instantiate<F>(type_name: &str, construct: F) -> Option<AnyValue>
where
    F: FnOnce() -> Result<AnyValue, InstantiationError>,
{
    match instantiate(construct) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(
                type_name = %type_name,
                "{} was unable to create a {} instance: {}.", COMPONENT_NAME, type_name, error
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
