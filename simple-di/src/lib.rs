//! A minimal, type-keyed dependency injection container.
//!
//! A [Container](container::Container) maps types to registrations, which know how to produce
//! instances of those types. Instances are requested with
//! [resolve](container::Container::resolve) and are always returned as shared
//! [InstancePtr](instance::InstancePtr)s:
//!
//! ```
//! use simple_di::container::Container;
//! use simple_di::instance::InstancePtr;
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "Hello".to_string()
//!     }
//! }
//!
//! let container = Container::new();
//! container.register_instance(42);
//! container.register(|| InstancePtr::new(English) as InstancePtr<dyn Greeter + Send + Sync>);
//!
//! assert_eq!(*container.resolve::<i32>().unwrap(), 42);
//! assert_eq!(
//!     container.resolve::<dyn Greeter + Send + Sync>().unwrap().greet(),
//!     "Hello"
//! );
//!
//! // only the registered capability is discoverable, not the concrete type
//! assert!(container.resolve::<English>().is_none());
//! ```
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers, locks and `Send + Sync` trait bounds (default)

pub mod config;
pub mod container;
mod error;
pub mod instance;
pub mod registration;
pub mod type_key;

pub use error::ContainerError;
