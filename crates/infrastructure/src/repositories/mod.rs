pub mod sqlite_project_repository;
pub mod sqlite_user_directory;

pub use sqlite_project_repository::SqliteProjectRepository;
pub use sqlite_user_directory::SqliteUserDirectory;
