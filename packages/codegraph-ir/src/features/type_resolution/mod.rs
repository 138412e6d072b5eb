//! Type resolution (gradual typing, builtin types, Hindley-Milner inference
//! for the SOTA constraint solver, plus the simple resolver used directly by
//! the IR pipeline).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::ResolveTypesUseCase;
pub use domain::{Type, TypeEntity, TypeFlavor, TypeKind, TypeResolutionLevel};

// infrastructure::type_resolver's concrete TypeResolver struct takes
// precedence over ports::TypeResolver's trait of the same name for this
// glob; reach the trait via `type_resolution::ports::TypeResolver`.
#[doc(hidden)]
pub use infrastructure::*;
