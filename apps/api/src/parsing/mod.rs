// Résumé intake: upload validation, PDF/DOCX text extraction, plain-text sectioning.

pub mod extract;
pub mod handlers;
pub mod sections;
pub mod validation;

pub use extract::{DocumentTextExtractor, ExtractionError, ResumeFile, TextExtractor};
pub use sections::{parse_resume_text, ParsedResume};
pub use validation::validate_resume_file;
