// src/resume/mod.rs
//! Resume payload → DOCX rendering pipeline

pub mod assembler;
pub mod document;
pub mod docx_writer;
pub mod normalizer;
pub mod record;
pub mod renderer;

pub use assembler::{generate_resume, DocumentAssembler, SECTION_ORDER};
pub use document::{Block, BlockKind, RenderedDocument};
pub use docx_writer::{DocxWriter, DOCX_MIME_TYPE};
pub use normalizer::Normalizer;
pub use record::{Entry, ResumeRecord};
