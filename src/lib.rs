pub mod auth;
pub mod cli;
pub mod core;
pub mod resume;
pub mod types;
pub mod web;

pub use resume::{generate_resume, DocumentAssembler, Normalizer, RenderedDocument, ResumeRecord};
pub use web::{build_rocket, start_web_server, AppContext};
