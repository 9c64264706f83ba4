//! PDF export: composites the plan's symbols onto the floor-plan PDF.
//!
//! The source document is parsed, the first page's size determines the
//! coordinate mapping, and one extra content stream with the marker glyphs
//! (and wall segments) is appended to that page. The original page content is
//! wrapped in `q`/`Q` so its graphics state cannot leak into the overlay.
//! Nothing is written unless the whole document was produced.

mod content;
mod mapping;

pub use mapping::PageMapping;

use crate::draw::color::BLACK;
use crate::draw::glyph::{YAxis, marker_glyph};
use crate::draw::{Color, Symbol};
use content::OverlayContent;
use log::{debug, info, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Default glyph edge length in PDF points.
pub const DEFAULT_GLYPH_SIZE: f64 = 15.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the PDF could not be read: {0}")]
    Unreadable(#[source] lopdf::Error),

    #[error("The PDF does not have any pages.")]
    NoPages,

    #[error("invalid overlay size {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error("invalid first page: {0}")]
    InvalidPage(String),

    #[error("failed to encode the exported PDF: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Export tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Edge length of every marker glyph, in PDF points
    pub glyph_size: f64,
    /// Also stroke wall segments onto the page
    pub include_walls: bool,
    pub wall_color: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            glyph_size: DEFAULT_GLYPH_SIZE,
            include_walls: true,
            wall_color: BLACK,
        }
    }
}

/// Output file name for a project: `<name>-evacuation-plan.pdf`.
///
/// Path separators and control characters in the name become `_`, so the
/// result is always a single path component.
pub fn export_file_name(project_name: &str) -> String {
    let stem: String = project_name
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{stem}-evacuation-plan.pdf")
}

/// Produces the exported PDF bytes.
///
/// `container_width`/`container_height` are the on-screen overlay size the
/// symbol coordinates were recorded in.
pub fn export_plan(
    pdf: &[u8],
    symbols: &[Symbol],
    container_width: f64,
    container_height: f64,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let mut document = Document::load_mem(pdf).map_err(ExportError::Unreadable)?;
    let page_id = document
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or(ExportError::NoPages)?;

    let (page_width, page_height) = page_size(&document, page_id)?;
    let mapping = PageMapping::new(page_width, page_height, container_width, container_height)?;
    debug!(
        "Exporting onto {page_width}x{page_height} page (scale {:.3}, {:.3})",
        mapping.x_scale, mapping.y_scale
    );

    let overlay = build_overlay(symbols, &mapping, options);
    if !overlay.is_empty() {
        attach_overlay(&mut document, page_id, overlay)?;
    }

    let mut out = Vec::new();
    document
        .save_to(&mut out)
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    info!("Exported {} symbol(s) into {} bytes", symbols.len(), out.len());
    Ok(out)
}

/// Writes exported bytes to `path` via a temporary file and rename.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".part");
    let tmp_path = path.with_file_name(tmp_name);
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|err| io_error(&tmp_path, err))?;
        file.write_all(bytes).map_err(|err| io_error(&tmp_path, err))?;
        file.sync_all().map_err(|err| io_error(&tmp_path, err))?;
    }
    fs::rename(&tmp_path, path).map_err(|err| io_error(path, err))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn build_overlay(
    symbols: &[Symbol],
    mapping: &PageMapping,
    options: &ExportOptions,
) -> OverlayContent {
    let mut overlay = OverlayContent::default();
    if options.include_walls {
        for wall in symbols.iter().filter_map(Symbol::as_wall) {
            overlay.wall(
                mapping.to_pdf(wall.start()),
                mapping.to_pdf(wall.end()),
                wall.thickness() * mapping.length_scale(),
                options.wall_color,
            );
        }
    }
    for symbol in symbols {
        let Symbol::Marker(marker) = symbol else {
            continue;
        };
        let center = mapping.to_pdf(marker.center());
        let glyph = marker_glyph(&marker.kind, center, options.glyph_size, YAxis::Up);
        if glyph.is_empty() {
            debug!("No export glyph for marker type '{}'; skipped", marker.kind);
        }
        for primitive in &glyph {
            overlay.primitive(primitive);
        }
    }
    overlay
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// Looks up an attribute on the page or, failing that, on its ancestors.
fn inherited<'a>(document: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = document.get_dictionary(id).ok()?;
        if let Ok(value) = dict.get(key) {
            return document.dereference(value).ok().map(|(_, object)| object);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn page_size(document: &Document, page_id: ObjectId) -> Result<(f64, f64), ExportError> {
    let media_box = inherited(document, page_id, b"MediaBox")
        .and_then(|object| object.as_array().ok())
        .ok_or_else(|| ExportError::InvalidPage("missing MediaBox".to_string()))?;
    let values: Vec<f64> = media_box.iter().filter_map(number).collect();
    match values.as_slice() {
        [x1, y1, x2, y2] => Ok(((x2 - x1).abs(), (y2 - y1).abs())),
        _ => Err(ExportError::InvalidPage(format!(
            "malformed MediaBox {media_box:?}"
        ))),
    }
}

fn page_resources(document: &Document, page_id: ObjectId) -> Dictionary {
    inherited(document, page_id, b"Resources")
        .and_then(|object| object.as_dict().ok())
        .cloned()
        .unwrap_or_else(Dictionary::new)
}

fn encode(operations: Vec<Operation>) -> Result<Vec<u8>, ExportError> {
    Content { operations }
        .encode()
        .map_err(|err| ExportError::Encode(err.to_string()))
}

fn attach_overlay(
    document: &mut Document,
    page_id: ObjectId,
    overlay: OverlayContent,
) -> Result<(), ExportError> {
    let mut resources = page_resources(document, page_id);
    let mut states = match resources.get(b"ExtGState") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => document
            .get_dictionary(*id)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    };
    for (name, state) in overlay.graphics_states() {
        if states.has(name.as_bytes()) {
            warn!("Replacing existing graphics state {name} on export page");
        }
        states.set(name, state);
    }
    resources.set("ExtGState", states);

    let existing: Vec<Object> = match document
        .get_dictionary(page_id)
        .ok()
        .and_then(|page| page.get(b"Contents").ok())
    {
        Some(Object::Array(items)) => items.clone(),
        Some(reference @ Object::Reference(_)) => vec![reference.clone()],
        _ => Vec::new(),
    };

    let save_id = document.add_object(Stream::new(
        Dictionary::new(),
        encode(vec![Operation::new("q", vec![])])?,
    ));
    let mut operations = vec![Operation::new("Q", vec![])];
    operations.extend(overlay.into_operations());
    let overlay_id = document.add_object(Stream::new(Dictionary::new(), encode(operations)?));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(save_id));
    contents.extend(existing);
    contents.push(Object::Reference(overlay_id));

    let page = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|err| ExportError::InvalidPage(err.to_string()))?;
    page.set("Resources", resources);
    page.set("Contents", contents);
    Ok(())
}
