//! The [Container] is a registry of [Registration]s, indexed by the type they were registered for.
//!
//! ## Registering types
//!
//! There are two ways of providing instances:
//!
//! * fixed instances - [Container::register_instance] and [Container::register_shared] store an
//! already existing value
//! * factories - [Container::register], [Container::register_transient] and
//! [Container::register_lazy] store a function called on demand, either once (singletons, the
//! default) or on every request (transient)
//!
//! Registering a type which is already registered replaces the previous registration, along with
//! its cached singleton instance. Instances handed out before stay valid.
//!
//! ## Registering capabilities
//!
//! Types can be registered as `dyn Trait` objects, which hides the concrete type - only the
//! registered trait object type can be resolved afterwards:
//!
//! ```
//! use simple_di::container::Container;
//! use simple_di::instance::InstancePtr;
//!
//! trait Storage {}
//!
//! struct MemoryStorage;
//!
//! impl Storage for MemoryStorage {}
//!
//! let container = Container::new();
//! container.register(|| {
//!     InstancePtr::new(MemoryStorage) as InstancePtr<dyn Storage + Send + Sync>
//! });
//!
//! assert!(container.resolve::<dyn Storage + Send + Sync>().is_some());
//! assert!(container.resolve::<MemoryStorage>().is_none());
//! ```
//!
//! ## Dependency graphs
//!
//! Factories can resolve their dependencies from the same container, as long as the dependencies
//! are registered by the time the factory is called:
//!
//! ```
//! use simple_di::container::Container;
//! use simple_di::instance::InstancePtr;
//!
//! struct Engine;
//!
//! struct Car {
//!     engine: InstancePtr<Engine>,
//! }
//!
//! let container = Container::new();
//! container.register_with_container(
//!     |container| {
//!         InstancePtr::new(Car {
//!             engine: container.resolve().expect("missing engine"),
//!         })
//!     },
//!     true,
//! );
//! container.register(|| InstancePtr::new(Engine));
//!
//! assert!(container.resolve::<Car>().is_some());
//! ```
//!
//! There is no cycle detection - a dependency cycle between singletons is a programming error.

use crate::config::ContainerConfig;
use crate::error::ContainerError;
use crate::instance::{downcast, Injectable, InstancePtr, ThreadSafe};
use crate::registration::{FixedRegistration, LazyRegistration, RegistrationPtr};
use crate::type_key::TypeKey;
use fxhash::FxHashMap;
use itertools::Itertools;
#[cfg(not(feature = "threadsafe"))]
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
#[cfg(feature = "threadsafe")]
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[cfg(not(feature = "threadsafe"))]
type RegistryLock = RefCell<Registry>;
#[cfg(feature = "threadsafe")]
type RegistryLock = RwLock<Registry>;

struct RegistryEntry {
    // registration sequence number, used only for listing
    order: u64,
    registration: RegistrationPtr,
}

#[derive(Default)]
struct Registry {
    entries: FxHashMap<TypeKey, RegistryEntry>,
    next_order: u64,
}

impl Registry {
    fn insert(&mut self, key: TypeKey, registration: RegistrationPtr) -> Option<RegistryEntry> {
        let order = self.next_order;
        self.next_order += 1;

        self.entries.insert(
            key,
            RegistryEntry {
                order,
                registration,
            },
        )
    }

    fn registration(&self, key: &TypeKey) -> Option<RegistrationPtr> {
        self.entries
            .get(key)
            .map(|entry| entry.registration.clone())
    }

    fn keys_in_order(&self) -> Vec<TypeKey> {
        self.entries
            .iter()
            .sorted_by_key(|(_, entry)| entry.order)
            .map(|(key, _)| *key)
            .collect_vec()
    }
}

#[derive(Default)]
struct ContainerInner {
    registry: RegistryLock,
    config: ContainerConfig,
}

impl ContainerInner {
    // the lock is held only for the duration of `f` - never while a factory runs, so factories can
    // use the container themselves
    #[cfg(feature = "threadsafe")]
    fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.registry.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[cfg(feature = "threadsafe")]
    fn write<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.registry.write().unwrap_or_else(PoisonError::into_inner))
    }

    #[cfg(not(feature = "threadsafe"))]
    fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.registry.borrow())
    }

    #[cfg(not(feature = "threadsafe"))]
    fn write<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.registry.borrow_mut())
    }
}

/// Type-keyed registry and resolver of instances. Cloning the container is cheap and the clones
/// share the same registrations. Please see the module-level documentation for more information.
#[derive(Clone, Default)]
pub struct Container {
    inner: InstancePtr<ContainerInner>,
}

impl Container {
    /// Creates an empty container with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with the given configuration.
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            inner: InstancePtr::new(ContainerInner {
                registry: Default::default(),
                config,
            }),
        }
    }

    #[inline]
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// Registers given value as the instance of `T`. Resolving `T` will always return the same
    /// instance.
    pub fn register_instance<T: Injectable>(&self, value: T) {
        self.register_shared(InstancePtr::new(value));
    }

    /// Registers an already shared instance of `T`, which can also be a `dyn Trait`. Resolving `T`
    /// will always return a pointer to the same instance.
    pub fn register_shared<T: Injectable + ?Sized>(&self, instance: InstancePtr<T>) {
        self.register_registration::<T>(
            InstancePtr::new(FixedRegistration::new(instance)) as RegistrationPtr
        );
    }

    /// Registers a singleton factory for `T`. The factory is called on first resolution and its
    /// result is returned for all subsequent ones.
    pub fn register<T, F>(&self, factory: F)
    where
        T: Injectable + ?Sized,
        F: Fn() -> InstancePtr<T> + ThreadSafe + 'static,
    {
        self.register_lazy(factory, true);
    }

    /// Registers a factory for `T`, which is called on every resolution.
    pub fn register_transient<T, F>(&self, factory: F)
    where
        T: Injectable + ?Sized,
        F: Fn() -> InstancePtr<T> + ThreadSafe + 'static,
    {
        self.register_lazy(factory, false);
    }

    /// Registers a factory for `T`, which is called lazily either once (`singleton`) or on every
    /// resolution.
    pub fn register_lazy<T, F>(&self, factory: F, singleton: bool)
    where
        T: Injectable + ?Sized,
        F: Fn() -> InstancePtr<T> + ThreadSafe + 'static,
    {
        self.register_with_container(move |_| factory(), singleton);
    }

    /// Like [Container::register_lazy], but the factory gets the container it's resolved from,
    /// which makes it possible to resolve dependencies without capturing a container clone.
    ///
    /// Note: a factory capturing a clone of its own container forms a reference cycle, which keeps
    /// the container alive forever.
    pub fn register_with_container<T, F>(&self, factory: F, singleton: bool)
    where
        T: Injectable + ?Sized,
        F: Fn(&Container) -> InstancePtr<T> + ThreadSafe + 'static,
    {
        self.register_registration::<T>(
            InstancePtr::new(LazyRegistration::new(factory, singleton)) as RegistrationPtr,
        );
    }

    /// Registers a custom [Registration](crate::registration::Registration) for `T`, replacing any
    /// existing one. The registration should produce instances of `InstancePtr<T>` - other
    /// instances are treated as missing during resolution.
    pub fn register_registration<T: Injectable + ?Sized>(&self, registration: RegistrationPtr) {
        let key = TypeKey::of::<T>();

        // the replaced registration is dropped after releasing the lock, since dropping cached
        // instances can run arbitrary code
        let replaced = self.inner.write(|registry| registry.insert(key, registration));

        if self.inner.config.trace_registrations {
            debug!(
                type_name = key.type_name(),
                replaced = replaced.is_some(),
                "Registered type."
            );
        }
    }

    /// Returns an instance of `T`, or `None` if `T` is not registered or its registration produced
    /// an incompatible instance.
    pub fn resolve<T: Injectable + ?Sized>(&self) -> Option<InstancePtr<T>> {
        let key = TypeKey::of::<T>();
        let registration = self.inner.read(|registry| registry.registration(&key));

        let Some(registration) = registration else {
            if self.inner.config.trace_registrations {
                debug!(type_name = key.type_name(), "Type not registered.");
            }

            return None;
        };

        let instance = downcast::<T>(&registration.instance(self));
        if self.inner.config.trace_registrations {
            debug!(
                type_name = key.type_name(),
                compatible = instance.is_some(),
                "Resolved type."
            );
        }

        instance
    }

    /// Like [Container::resolve], but returns an error for missing instances.
    pub fn require<T: Injectable + ?Sized>(&self) -> Result<InstancePtr<T>, ContainerError> {
        self.resolve().ok_or_else(|| ContainerError::Unresolved {
            type_name: TypeKey::of::<T>().type_name(),
        })
    }

    /// Checks if `T` is registered, without producing an instance.
    pub fn is_registered<T: Injectable + ?Sized>(&self) -> bool {
        let key = TypeKey::of::<T>();
        self.inner
            .read(|registry| registry.entries.contains_key(&key))
    }

    /// Returns all registered types in registration order. Replacing a registration moves its type
    /// to the end.
    pub fn registered_types(&self) -> Vec<TypeKey> {
        self.inner.read(Registry::keys_in_order)
    }

    /// Returns a diagnostic listing of registered types - one line per type.
    pub fn debug_description(&self) -> String {
        self.registered_types()
            .iter()
            .map(ToString::to_string)
            .join("\n")
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.debug_description())
    }
}
