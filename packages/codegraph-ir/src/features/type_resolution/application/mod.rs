pub mod resolve_types;

pub use resolve_types::ResolveTypesUseCase;
