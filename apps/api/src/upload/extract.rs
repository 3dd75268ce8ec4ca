//! Text extraction from uploaded resume documents (PDF, DOCX, TXT).
//!
//! Uploads are spooled to a named temp file that is removed when it drops,
//! so cleanup happens on every exit path.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("text file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Upper bound on the decompressed `word/document.xml`. Compressed size is
/// already capped by the request body limit; this caps the expansion.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Accepts a dotted, lowercase extension as returned by [`file_extension`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".pdf" => Some(Self::Pdf),
            ".docx" => Some(Self::Docx),
            ".txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Txt => ".txt",
        }
    }
}

/// Lowercased extension with its leading dot, or an empty string.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Writes `data` to a temp file and extracts its text. Blocking.
pub fn extract_upload(data: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let mut temp = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(format.extension())
        .tempfile()?;
    temp.write_all(data)?;
    temp.flush()?;
    debug!("Upload spooled to {}", temp.path().display());

    let text = extract_text(temp.path(), format);
    debug!("Removing temp file {}", temp.path().display());
    text
}

pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractionError> {
    match format {
        DocumentFormat::Pdf => {
            pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
        }
        DocumentFormat::Docx => extract_docx(path),
        DocumentFormat::Txt => Ok(String::from_utf8(std::fs::read(path)?)?),
    }
}

fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let xml = read_document_xml(File::open(path)?, MAX_DOCUMENT_XML_BYTES)?;
    Ok(document_xml_to_text(&xml))
}

fn read_document_xml<R: Read + Seek>(reader: R, limit: u64) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| ExtractionError::Docx(format!("not a valid DOCX container: {e}")))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("missing word/document.xml: {e}")))?;

    let too_large =
        || ExtractionError::Docx(format!("document too large: exceeds {limit} bytes"));
    if entry.size() > limit {
        return Err(too_large());
    }

    // The declared size can lie; never read past the limit regardless.
    let mut xml = String::new();
    entry.take(limit + 1).read_to_string(&mut xml)?;
    if xml.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(xml)
}

static DOCX_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:p/>|<w:tab/>|<w:br/>")
        .expect("valid regex")
});

/// Collects `<w:t>` runs from WordprocessingML, one line per paragraph.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for caps in DOCX_TOKEN.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&decode_xml_entities(run.as_str())),
            None => match &caps[0] {
                "<w:tab/>" => text.push('\t'),
                _ => text.push('\n'),
            },
        }
    }
    text
}

fn decode_xml_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
