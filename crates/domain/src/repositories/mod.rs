pub mod project_repository;
pub mod user_directory;

pub use project_repository::ProjectRepository;
pub use user_directory::UserDirectory;
