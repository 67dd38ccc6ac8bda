//! Pointer types used for resolved instances and the marker traits constraining what can be
//! registered. The concrete types depend on the `threadsafe` feature.

use std::any::Any;
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type InstancePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type InstancePtr<T> = Arc<T>;

/// Type-erased instance. Always holds an [InstancePtr] of the registered type, which can be
/// recovered with [downcast].
#[cfg(not(feature = "threadsafe"))]
pub type InstanceAnyPtr = InstancePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type InstanceAnyPtr = InstancePtr<dyn Any + Send + Sync + 'static>;

/// `Send + Sync` when using the "threadsafe" feature, no requirements otherwise.
#[cfg(feature = "threadsafe")]
pub trait ThreadSafe: Send + Sync {}
#[cfg(feature = "threadsafe")]
impl<T: Send + Sync + ?Sized> ThreadSafe for T {}

/// `Send + Sync` when using the "threadsafe" feature, no requirements otherwise.
#[cfg(not(feature = "threadsafe"))]
pub trait ThreadSafe {}
#[cfg(not(feature = "threadsafe"))]
impl<T: ?Sized> ThreadSafe for T {}

/// Marker trait for types which can be registered and resolved - both concrete types and
/// `dyn Trait` capabilities. Note: with the "threadsafe" feature, trait objects need explicit
/// `Send + Sync` bounds, e.g. `dyn Trait + Send + Sync`.
pub trait Injectable: ThreadSafe + 'static {}

impl<T: ThreadSafe + ?Sized + 'static> Injectable for T {}

/// Erases the type of given instance.
#[inline]
pub fn erase<T: Injectable + ?Sized>(instance: InstancePtr<T>) -> InstanceAnyPtr {
    InstancePtr::new(instance) as InstanceAnyPtr
}

/// Recovers a typed instance from an erased one. Returns `None` if the erased instance does not
/// hold an `InstancePtr<T>`.
#[inline]
pub fn downcast<T: Injectable + ?Sized>(instance: &InstanceAnyPtr) -> Option<InstancePtr<T>> {
    (**instance).downcast_ref::<InstancePtr<T>>().cloned()
}
