//! Evacuation-plan project documents.
//!
//! A [`Project`] couples the drawn plan (shapes, walls, markers) with the name
//! used for exported files and a reference to the floor-plan PDF it overlays.
//! [`ProjectSnapshot`] is the full-state value the editor hands to whatever
//! persists it; [`storage`] is the file-backed implementation used by the CLI.

mod pdf;
pub mod storage;

pub use pdf::{PdfError, PdfSource};
pub use storage::{CompressionMode, StoreOptions, load_project, save_project};

use crate::draw::{Frame, Shape, Symbol, WallSymbol};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Full snapshot emitted after every add, move or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectSnapshot {
    /// Captures the current collections of `frame`, stamped with the current time.
    pub fn capture(frame: &Frame) -> Self {
        Self {
            symbols: frame.symbols.clone(),
            shapes: frame.shapes.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// A saved evacuation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name; also the stem of exported file names
    pub name: String,
    /// Floor-plan PDF the overlay is drawn on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<PathBuf>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Walls stored apart from the symbol list by older files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<WallSymbol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pdf: None,
            symbols: Vec::new(),
            shapes: Vec::new(),
            walls: Vec::new(),
            updated_at: None,
        }
    }

    /// Builds the editable plan.
    ///
    /// Separately stored walls are appended to the symbol list unless a
    /// symbol with the same id is already present.
    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame {
            shapes: self.shapes.clone(),
            symbols: self.symbols.clone(),
        };
        for wall in &self.walls {
            if frame.symbol(wall.id()).is_some() {
                warn!("Skipping duplicate wall {} in project '{}'", wall.id(), self.name);
                continue;
            }
            frame.add_symbol(Symbol::Wall(wall.clone()));
        }
        frame
    }

    /// Replaces the stored plan wholesale with `frame`.
    pub fn set_frame(&mut self, frame: &Frame) {
        self.shapes = frame.shapes.clone();
        self.symbols = frame.symbols.clone();
        self.walls.clear();
        self.updated_at = Some(Utc::now());
    }

    /// Applies a snapshot emitted by the editor.
    pub fn apply_snapshot(&mut self, snapshot: ProjectSnapshot) {
        self.symbols = snapshot.symbols;
        self.shapes = snapshot.shapes;
        self.walls.clear();
        self.updated_at = Some(snapshot.updated_at);
    }

    /// Number of wall symbols, counting separately stored walls.
    pub fn wall_count(&self) -> usize {
        self.to_frame().walls().count()
    }

    /// File name used for the exported PDF.
    pub fn export_file_name(&self) -> String {
        crate::export::export_file_name(&self.name)
    }
}
