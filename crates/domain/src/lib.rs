pub mod context;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;

pub use context::*;
pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
