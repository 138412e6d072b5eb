pub mod storage_usecase;

pub use storage_usecase::{StorageUseCase, StorageUseCaseImpl};
