use std::collections::HashMap;
use serde::{Deserialize, Serialize};

const EMBEDDED: &str = include_str!("../../assets/manifest.json");

/// Asset manifest mapping body ids to image URIs.
/// The URIs are opaque: geometry never depends on them, and a body with no
/// entry (or an image that fails to load) renders with its flat color.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Prefix joined onto every relative path (e.g., "/assets").
    #[serde(default)]
    pub base_path: String,
    /// Per-body images keyed by catalog id.
    #[serde(default)]
    pub bodies: HashMap<String, BodyAssets>,
    /// Optional full-scene backdrop image.
    #[serde(default)]
    pub backdrop: Option<String>,
}

/// Images for one body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyAssets {
    /// Surface map clipped onto the body disk.
    #[serde(default)]
    pub texture: Option<String>,
    /// Rendered photo shown in the info panel.
    #[serde(default)]
    pub photo: Option<String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The manifest compiled into the crate.
    /// Falls back to an empty manifest if the embedded file is malformed.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED).unwrap_or_else(|e| {
            log::warn!("embedded asset manifest is invalid: {e}");
            Self::default()
        })
    }

    pub fn get(&self, id: &str) -> Option<&BodyAssets> {
        self.bodies.get(id)
    }

    /// Full texture URI for a body.
    pub fn texture_uri(&self, id: &str) -> Option<String> {
        let path = self.get(id)?.texture.as_deref()?;
        Some(self.resolve(path))
    }

    /// Full photo URI for a body.
    pub fn photo_uri(&self, id: &str) -> Option<String> {
        let path = self.get(id)?.photo.as_deref()?;
        Some(self.resolve(path))
    }

    /// Full URI of the scene backdrop, if any.
    pub fn backdrop_uri(&self) -> Option<String> {
        self.backdrop.as_deref().map(|path| self.resolve(path))
    }

    /// Join `path` onto `base_path` unless it is already absolute.
    pub fn resolve(&self, path: &str) -> String {
        if self.base_path.is_empty() || path.starts_with('/') || path.contains("://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_path.trim_end_matches('/'), path)
    }
}
