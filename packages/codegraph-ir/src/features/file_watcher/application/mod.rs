pub mod watcher_usecase;

pub use watcher_usecase::{FileWatcherUseCase, FileWatcherUseCaseImpl};
