//! Import/export codec for the canonical action-area document.
//!
//! The document is the sole interface between the editor core and the
//! surrounding persistence layer. Import validates the whole document
//! before touching the store (no partial mutation); export validates
//! every action and drops internal-only fields such as display colors.

use serde::{Deserialize, Serialize};

use crate::geometry::{LayoutError, MenuSize, Rect};
use crate::hotspot::{Action, ActionError};
use crate::session::{EditorSession, MenuMeta};

/// Maximum length of the chat bar label, in characters.
pub const MAX_CHAT_BAR_TEXT_LEN: usize = 14;

/// Declared coordinate space of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSize {
    pub width: u32,
    pub height: u32,
}

/// Integer hotspot bounds in logical image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One exported tap region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuArea {
    pub bounds: AreaBounds,
    pub action: Action,
}

/// Canonical menu document, as persisted by the surrounding console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    pub size: DocumentSize,
    /// Whether the menu is displayed by default.
    pub selected: bool,
    pub name: String,
    pub chat_bar_text: String,
    pub areas: Vec<MenuArea>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document has no `size` object")]
    MissingSize,
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("document has no `areas` array")]
    MissingAreas,
    #[error("area {index} is missing `bounds`")]
    MissingBounds { index: usize },
    #[error("area {index} is missing `action`")]
    MissingAction { index: usize },
    #[error("chat bar text exceeds {MAX_CHAT_BAR_TEXT_LEN} characters")]
    ChatBarTextTooLong,
    #[error("area {index}: {source}")]
    InvalidAction {
        index: usize,
        source: ActionError,
    },
}

/// Parses and structurally validates a document.
///
/// The declared size is checked against the admissible menu sizes
/// before any coordinate is interpreted; every area must carry both
/// `bounds` and `action`. Violations name the offending entry index.
pub fn parse_document(json: &str) -> Result<MenuDocument, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let size = value.get("size").ok_or(DocumentError::MissingSize)?;
    let size: DocumentSize = serde_json::from_value(size.clone())?;
    MenuSize::from_dimensions(size.width, size.height)?;

    let areas = value
        .get("areas")
        .and_then(serde_json::Value::as_array)
        .ok_or(DocumentError::MissingAreas)?;
    for (index, area) in areas.iter().enumerate() {
        if area.get("bounds").is_none() {
            return Err(DocumentError::MissingBounds { index });
        }
        if area.get("action").is_none() {
            return Err(DocumentError::MissingAction { index });
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Replaces the session contents with an imported document.
///
/// All validation happens up front; on any error the session is left
/// exactly as it was. Imported areas get synthetic ids, hue-rotated
/// display colors, and labels derived from their action types.
pub fn import_document(session: &mut EditorSession, json: &str) -> Result<(), DocumentError> {
    let doc = parse_document(json)?;
    let menu_size = MenuSize::from_dimensions(doc.size.width, doc.size.height)?;

    let entries: Vec<(Rect, Action)> = doc
        .areas
        .iter()
        .map(|area| {
            (
                Rect::new(
                    f64::from(area.bounds.x),
                    f64::from(area.bounds.y),
                    f64::from(area.bounds.width),
                    f64::from(area.bounds.height),
                ),
                area.action.clone(),
            )
        })
        .collect();

    session.set_menu_size(menu_size)?;
    session.store_mut().replace_all(entries);
    *session.meta_mut() = MenuMeta {
        name: doc.name,
        chat_bar_text: doc.chat_bar_text,
        selected: doc.selected,
    };
    session.clear_selection();
    session.cancel_gesture();
    tracing::info!(areas = session.store().len(), "document imported");
    Ok(())
}

/// Serializes the session into the canonical document.
///
/// Bare URIs are prefixed with `https://`; any other validation
/// failure blocks the export and names the offending area.
pub fn export_document(session: &EditorSession) -> Result<MenuDocument, DocumentError> {
    let meta = session.meta();
    if meta.chat_bar_text.chars().count() > MAX_CHAT_BAR_TEXT_LEN {
        return Err(DocumentError::ChatBarTextTooLong);
    }

    let mut areas = Vec::with_capacity(session.store().len());
    for (index, hotspot) in session.store().hotspots().iter().enumerate() {
        let action = hotspot
            .action
            .normalized()
            .map_err(|source| DocumentError::InvalidAction { index, source })?;
        areas.push(MenuArea {
            bounds: AreaBounds {
                x: hotspot.bounds.x.round().max(0.0) as u32,
                y: hotspot.bounds.y.round().max(0.0) as u32,
                width: hotspot.bounds.width.round() as u32,
                height: hotspot.bounds.height.round() as u32,
            },
            action,
        });
    }

    let menu_size = session.menu_size();
    Ok(MenuDocument {
        size: DocumentSize {
            width: menu_size.width(),
            height: menu_size.height(),
        },
        selected: meta.selected,
        name: meta.name.clone(),
        chat_bar_text: meta.chat_bar_text.clone(),
        areas,
    })
}

/// Exported document as pretty-printed JSON.
pub fn export_json(session: &EditorSession) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&export_document(session)?)?)
}
