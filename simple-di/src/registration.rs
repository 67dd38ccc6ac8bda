//! A [Registration] decides how an instance of a registered type is produced. There are two
//! built-in variants:
//!
//! * [FixedRegistration] - wraps an already existing instance and always returns it
//! * [LazyRegistration] - calls a factory on demand; singleton registrations call it at most once
//! and return the cached instance afterwards, while transient ones call it on every request
//!
//! Note: a singleton factory which resolves its own type, directly or through other factories,
//! is a dependency cycle and will either deadlock or panic, depending on the `threadsafe` feature.

use crate::container::Container;
use crate::instance::{erase, Injectable, InstanceAnyPtr, InstancePtr, ThreadSafe};
use derivative::Derivative;
#[cfg(test)]
use mockall::automock;
#[cfg(not(feature = "threadsafe"))]
use once_cell::unsync::OnceCell;
#[cfg(feature = "threadsafe")]
use once_cell::sync::OnceCell;
use tracing::trace;

#[cfg(not(feature = "threadsafe"))]
pub type RegistrationPtr = InstancePtr<dyn Registration>;
#[cfg(feature = "threadsafe")]
pub type RegistrationPtr = InstancePtr<dyn Registration + Send + Sync>;

#[cfg(not(feature = "threadsafe"))]
type FactoryFn = Box<dyn Fn(&Container) -> InstanceAnyPtr>;
#[cfg(feature = "threadsafe")]
type FactoryFn = Box<dyn Fn(&Container) -> InstanceAnyPtr + Send + Sync>;

/// Producer of instances for a registered type. The returned instance must hold an
/// [InstancePtr] of the type the registration was registered for, otherwise resolution will
/// yield nothing.
#[cfg_attr(test, automock)]
pub trait Registration {
    /// Produces an instance, possibly using other instances from the given container.
    fn instance(&self, container: &Container) -> InstanceAnyPtr;
}

/// Registration of a pre-existing instance.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct FixedRegistration {
    #[derivative(Debug = "ignore")]
    instance: InstanceAnyPtr,
}

impl FixedRegistration {
    pub fn new<T: Injectable + ?Sized>(instance: InstancePtr<T>) -> Self {
        Self {
            instance: erase(instance),
        }
    }
}

impl Registration for FixedRegistration {
    #[inline]
    fn instance(&self, _container: &Container) -> InstanceAnyPtr {
        self.instance.clone()
    }
}

/// Registration of a factory, called when an instance is requested.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct LazyRegistration {
    #[derivative(Debug = "ignore")]
    factory: FactoryFn,
    singleton: bool,
    #[derivative(Debug = "ignore")]
    cached_instance: OnceCell<InstanceAnyPtr>,
}

impl LazyRegistration {
    /// Creates a new registration. With `singleton` set, the first created instance is cached and
    /// returned for all subsequent requests.
    pub fn new<T, F>(factory: F, singleton: bool) -> Self
    where
        T: Injectable + ?Sized,
        F: Fn(&Container) -> InstancePtr<T> + ThreadSafe + 'static,
    {
        Self {
            factory: Box::new(move |container: &Container| erase(factory(container))),
            singleton,
            cached_instance: OnceCell::new(),
        }
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// Checks if a singleton instance has already been created.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.cached_instance.get().is_some()
    }
}

impl Registration for LazyRegistration {
    fn instance(&self, container: &Container) -> InstanceAnyPtr {
        if !self.singleton {
            return (self.factory)(container);
        }

        self.cached_instance
            .get_or_init(|| {
                trace!("Creating singleton instance.");
                (self.factory)(container)
            })
            .clone()
    }
}
