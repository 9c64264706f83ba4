use lopdf::Document;
use log::debug;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while accepting a floor-plan upload.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("file is not a readable PDF: {0}")]
    Unreadable(#[from] lopdf::Error),

    #[error("failed to read PDF {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Raw bytes of an accepted floor-plan PDF plus its page count.
///
/// The bytes are kept verbatim; the export compositor parses them again so
/// the stored upload is never modified.
#[derive(Clone)]
pub struct PdfSource {
    bytes: Vec<u8>,
    page_count: usize,
}

impl fmt::Debug for PdfSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfSource")
            .field("len", &self.bytes.len())
            .field("page_count", &self.page_count)
            .finish()
    }
}

impl PdfSource {
    /// Validates `bytes` as a PDF document.
    ///
    /// A zero-page document is accepted here; export is what rejects it.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PdfError> {
        let document = Document::load_mem(&bytes)?;
        let page_count = document.get_pages().len();
        debug!("Accepted PDF ({} bytes, {page_count} page(s))", bytes.len());
        Ok(Self { bytes, page_count })
    }

    pub fn from_path(path: &Path) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path).map_err(|source| PdfError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}
