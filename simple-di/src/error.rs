use thiserror::Error;

/// Errors related to resolving instances from a [Container](crate::container::Container).
///
/// Note: a missing registration and a registration producing an incompatible value are reported
/// the same way, since both mean the requested type cannot be provided.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ContainerError {
    #[error("Cannot resolve an instance of type: {type_name}")]
    Unresolved { type_name: &'static str },
}
