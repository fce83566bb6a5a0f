//! Hotspots: labeled tap regions with attached actions.
//!
//! The [`HotspotStore`] is the single source of truth for the editor's
//! regions; rendering and the document codec both read through it.

use serde::{Deserialize, Serialize};

use crate::geometry::{Corner, Point, Rect};

/// Unique identifier for a hotspot within one editor session.
pub type HotspotId = u32;

/// Maximum length of a rich menu alias id.
const ALIAS_ID_MAX_LEN: usize = 40;

/// Action attached to a tap region, in the canonical wire layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Postback {
        data: String,
    },
    Message {
        text: String,
    },
    Uri {
        uri: String,
    },
    RichMenuSwitch {
        #[serde(rename = "richMenuAliasId")]
        alias_id: String,
        #[serde(default)]
        data: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("uri {0:?} has no derivable scheme")]
    UriScheme(String),
    #[error("alias id {0:?} must match [A-Za-z0-9-], 1-40 characters")]
    InvalidAliasId(String),
}

impl Action {
    /// Placeholder action for freshly drawn hotspots.
    pub fn default_postback() -> Self {
        Self::Postback {
            data: "action=hotspot".to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postback { .. } => "postback",
            Self::Message { .. } => "message",
            Self::Uri { .. } => "uri",
            Self::RichMenuSwitch { .. } => "richmenuswitch",
        }
    }

    /// Default operator-facing label, derived from the action type.
    pub fn default_label(&self) -> String {
        self.kind().to_string()
    }

    /// Checks the invariants that must hold before export.
    pub fn validate(&self) -> Result<(), ActionError> {
        match self {
            Self::Uri { uri } => {
                normalize_uri(uri)?;
                Ok(())
            }
            Self::RichMenuSwitch { alias_id, .. } => {
                if is_valid_alias_id(alias_id) {
                    Ok(())
                } else {
                    Err(ActionError::InvalidAliasId(alias_id.clone()))
                }
            }
            Self::Postback { .. } | Self::Message { .. } => Ok(()),
        }
    }

    /// Returns the action with the documented normalizations applied:
    /// bare URIs gain an explicit `https://` scheme. Everything else is
    /// passed through untouched.
    pub fn normalized(&self) -> Result<Self, ActionError> {
        match self {
            Self::Uri { uri } => Ok(Self::Uri {
                uri: normalize_uri(uri)?,
            }),
            other => {
                other.validate()?;
                Ok(other.clone())
            }
        }
    }
}

fn is_valid_alias_id(alias_id: &str) -> bool {
    !alias_id.is_empty()
        && alias_id.len() <= ALIAS_ID_MAX_LEN
        && alias_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Resolves the scheme of a URI: `http://`/`https://` pass through, a
/// bare host gets `https://` prefixed, anything with a foreign scheme
/// is rejected.
fn normalize_uri(uri: &str) -> Result<String, ActionError> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        Ok(uri.to_string())
    } else if uri.is_empty() || uri.contains("://") {
        Err(ActionError::UriScheme(uri.to_string()))
    } else {
        Ok(format!("https://{uri}"))
    }
}

/// RGBA display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a display color from a hue in degrees, at fixed
    /// saturation and lightness.
    pub fn from_hue(hue: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        let (s, l) = (0.65, 0.55);
        let c = (1.0 - (2.0 * l - 1.0f64).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0f64).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 / 60 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b), 255)
    }
}

/// Hue for the `index`-th hotspot: golden-angle spacing keeps any
/// number of regions visually separated.
pub fn golden_angle_hue(index: usize) -> f64 {
    (index as f64 * 137.5) % 360.0
}

/// A labeled rectangular tap region in logical image space.
///
/// Committed hotspots always have strictly positive width and height;
/// degenerate shapes are discarded before they reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub id: HotspotId,
    pub bounds: Rect,
    pub action: Action,
    pub label: String,
    pub color: Color,
}

/// Ordered collection of hotspots with id and color assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotStore {
    hotspots: Vec<Hotspot>,
    next_id: HotspotId,
    hue_cursor: usize,
}

impl HotspotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a new hotspot, assigning an id, a hue-rotated display
    /// color, and a label derived from the action type.
    pub fn commit(&mut self, bounds: Rect, action: Action) -> HotspotId {
        let id = self.next_id;
        self.next_id += 1;
        let label = action.default_label();
        let color = Color::from_hue(golden_angle_hue(self.hue_cursor));
        self.hue_cursor += 1;
        self.hotspots.push(Hotspot {
            id,
            bounds,
            action,
            label,
            color,
        });
        id
    }

    /// Replaces the whole collection, re-assigning ids and colors by
    /// entry index. Used by the document codec after full validation.
    pub fn replace_all(&mut self, entries: Vec<(Rect, Action)>) {
        self.hotspots.clear();
        self.next_id = 0;
        self.hue_cursor = 0;
        for (bounds, action) in entries {
            self.commit(bounds, action);
        }
    }

    pub fn get(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: HotspotId) -> Option<&mut Hotspot> {
        self.hotspots.iter_mut().find(|h| h.id == id)
    }

    pub fn remove(&mut self, id: HotspotId) -> Option<Hotspot> {
        let index = self.hotspots.iter().position(|h| h.id == id)?;
        Some(self.hotspots.remove(index))
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Topmost hotspot whose body contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<HotspotId> {
        self.hotspots
            .iter()
            .rev()
            .find(|h| h.bounds.contains(p))
            .map(|h| h.id)
    }

    /// Topmost corner handle within `radius` logical units of `p`.
    pub fn hit_test_handle(&self, p: Point, radius: f64) -> Option<(HotspotId, Corner)> {
        for hotspot in self.hotspots.iter().rev() {
            for corner in Corner::ALL {
                let c = hotspot.bounds.corner(corner);
                if (p.x - c.x).abs() <= radius && (p.y - c.y).abs() <= radius {
                    return Some((hotspot.id, corner));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_assigns_monotonic_ids() {
        let mut store = HotspotStore::new();
        let a = store.commit(Rect::new(0.0, 0.0, 100.0, 100.0), Action::default_postback());
        let b = store.commit(
            Rect::new(200.0, 0.0, 100.0, 100.0),
            Action::Message {
                text: "hi".to_string(),
            },
        );
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).unwrap().label, "message");
    }

    #[test]
    fn test_hue_rotation_follows_golden_angle() {
        let mut store = HotspotStore::new();
        for i in 0..5 {
            store.commit(
                Rect::new(i as f64 * 10.0, 0.0, 50.0, 50.0),
                Action::default_postback(),
            );
        }
        for (i, hotspot) in store.hotspots().iter().enumerate() {
            assert_eq!(hotspot.color, Color::from_hue(golden_angle_hue(i)));
        }
        assert_eq!(golden_angle_hue(3), 412.5 % 360.0);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut store = HotspotStore::new();
        let below = store.commit(Rect::new(0.0, 0.0, 200.0, 200.0), Action::default_postback());
        let above = store.commit(Rect::new(50.0, 50.0, 200.0, 200.0), Action::default_postback());

        assert_eq!(store.hit_test(Point::new(100.0, 100.0)), Some(above));
        assert_eq!(store.hit_test(Point::new(10.0, 10.0)), Some(below));
        assert_eq!(store.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_hit_test_handle_matches_corners() {
        let mut store = HotspotStore::new();
        let id = store.commit(Rect::new(100.0, 100.0, 200.0, 100.0), Action::default_postback());

        assert_eq!(
            store.hit_test_handle(Point::new(102.0, 98.0), 8.0),
            Some((id, Corner::NorthWest))
        );
        assert_eq!(
            store.hit_test_handle(Point::new(300.0, 200.0), 8.0),
            Some((id, Corner::SouthEast))
        );
        assert_eq!(store.hit_test_handle(Point::new(200.0, 150.0), 8.0), None);
    }

    #[test]
    fn test_alias_id_pattern() {
        let bad = Action::RichMenuSwitch {
            alias_id: "a b".to_string(),
            data: String::new(),
        };
        assert_eq!(
            bad.validate(),
            Err(ActionError::InvalidAliasId("a b".to_string()))
        );

        let good = Action::RichMenuSwitch {
            alias_id: "menu-1".to_string(),
            data: String::new(),
        };
        assert_eq!(good.validate(), Ok(()));

        let too_long = Action::RichMenuSwitch {
            alias_id: "a".repeat(41),
            data: String::new(),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_uri_scheme_normalization() {
        let bare = Action::Uri {
            uri: "example.com/menu".to_string(),
        };
        assert_eq!(
            bare.normalized(),
            Ok(Action::Uri {
                uri: "https://example.com/menu".to_string()
            })
        );

        let http = Action::Uri {
            uri: "http://example.com".to_string(),
        };
        assert_eq!(http.normalized(), Ok(http.clone()));

        let foreign = Action::Uri {
            uri: "ftp://example.com".to_string(),
        };
        assert!(foreign.normalized().is_err());
    }

    #[test]
    fn test_action_wire_format() {
        let action = Action::RichMenuSwitch {
            alias_id: "menu-1".to_string(),
            data: "switch=1".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "richmenuswitch");
        assert_eq!(json["richMenuAliasId"], "menu-1");

        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }
}
