pub mod auth_handlers;
pub mod resume_handlers;
pub mod scoring_handlers;
pub mod system_handlers;

pub use auth_handlers::*;
pub use resume_handlers::*;
pub use scoring_handlers::*;
pub use system_handlers::*;
