//! Text extraction: turns uploaded PDF/DOCX bytes into plain résumé text.
//!
//! Extraction is CPU-bound, so both backends run inside
//! `tokio::task::spawn_blocking` and hand owned bytes across.

use std::fmt::Display;
use std::io::{Cursor, Read};

use async_trait::async_trait;
use bytes::Bytes;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::parsing::validation::file_extension;

/// An uploaded résumé held in memory for the lifetime of a dialog session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    #[serde(skip)]
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Pdf,
    Docx,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub source: TextSource,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Only .pdf or .docx files are supported.")]
    UnsupportedFormat,

    #[error("Could not read the PDF: {0}")]
    Pdf(String),

    #[error("Could not read the DOCX archive: {0}")]
    Docx(String),

    #[error("Upload failed. Please try again.")]
    Aborted,
}

/// The text-extraction collaborator consumed by the scan orchestrator.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: &ResumeFile) -> Result<ExtractedText, ExtractionError>;
}

/// Default extractor: `pdf-extract` for PDFs, `word/document.xml` runs for DOCX.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(&self, file: &ResumeFile) -> Result<ExtractedText, ExtractionError> {
        let source = match file_extension(&file.name).as_deref() {
            Some("pdf") => TextSource::Pdf,
            Some("docx") => TextSource::Docx,
            _ => return Err(ExtractionError::UnsupportedFormat),
        };

        let bytes = file.bytes.clone();
        let result = tokio::task::spawn_blocking(move || match source {
            TextSource::Pdf => extract_pdf_text(&bytes),
            TextSource::Docx => extract_docx_text(&bytes),
        })
        .await
        .map_err(|e| {
            warn!("Extraction task for {} did not complete: {e}", file.name);
            ExtractionError::Aborted
        })?;

        let text = result?.trim().to_string();
        debug!(
            "Extracted {} chars from {} ({:?})",
            text.len(),
            file.name,
            source
        );
        Ok(ExtractedText { text, source })
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn docx_error(e: impl Display) -> ExtractionError {
    ExtractionError::Docx(e.to_string())
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(docx_error)?;
    let mut document = archive.by_name("word/document.xml").map_err(docx_error)?;

    let mut xml = String::new();
    document.read_to_string(&mut xml).map_err(docx_error)?;

    docx_xml_to_text(&xml)
}

/// Flattens WordprocessingML into lines: one line per paragraph.
///
/// Only `w:t` content is kept. Breaks and tabs count only inside a run, so
/// tab stops declared in paragraph properties stay silent.
fn docx_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(docx_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => text.push('\n'),
                b"br" | b"cr" if in_run => text.push('\n'),
                b"tab" if in_run => text.push('\t'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => text.push('\n'),
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => text.push_str(&e.decode().map_err(docx_error)?),
            Event::GeneralRef(e) if in_text => {
                if let Some(ch) = e.resolve_char_ref().map_err(docx_error)? {
                    text.push(ch);
                } else {
                    let name = e.decode().map_err(docx_error)?;
                    match resolve_predefined_entity(&name) {
                        Some(value) => text.push_str(value),
                        None => {
                            text.push('&');
                            text.push_str(&name);
                            text.push(';');
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}
