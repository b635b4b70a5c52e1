pub mod ids;
pub mod project;
pub mod project_view;
pub mod user;

pub use ids::*;
pub use project::*;
pub use project_view::*;
pub use user::*;
