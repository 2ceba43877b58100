//! Configuration of the static assets a map document links to
//!
//! Every [`Map`](crate::Map) injects the scripts and stylesheets listed in its
//! [`AssetConfig`] into the document header. The default points at public
//! CDNs; a JSON file or [`AssetConfig::self_hosted`] can redirect them, e.g.
//! for offline documents.

use crate::{core::constants, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named script or stylesheet link.
///
/// The name keys the header entry so the same asset is linked once per
/// document, however many maps it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub url: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// File component of the URL (`leaflet.js` for `.../dist/leaflet.js`)
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    pub fn script_tag(&self) -> String {
        format!(r#"<script src="{}"></script>"#, self.url)
    }

    pub fn stylesheet_tag(&self) -> String {
        format!(r#"<link rel="stylesheet" href="{}"/>"#, self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub scripts: Vec<Asset>,
    pub stylesheets: Vec<Asset>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            scripts: vec![
                Asset::new("leaflet", constants::LEAFLET_JS),
                Asset::new("jquery", constants::JQUERY_JS),
                Asset::new("bootstrap", constants::BOOTSTRAP_JS),
                Asset::new("awesome_markers", constants::AWESOME_MARKERS_JS),
            ],
            stylesheets: vec![
                Asset::new("leaflet_css", constants::LEAFLET_CSS),
                Asset::new("bootstrap_css", constants::BOOTSTRAP_CSS),
                Asset::new("bootstrap_theme_css", constants::BOOTSTRAP_THEME_CSS),
                Asset::new("font_awesome_css", constants::FONT_AWESOME_CSS),
                Asset::new("awesome_markers_css", constants::AWESOME_MARKERS_CSS),
                Asset::new("awesome_rotate_css", constants::AWESOME_ROTATE_CSS),
            ],
        }
    }
}

impl AssetConfig {
    /// Parse a configuration from JSON; missing lists fall back to the defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;

        #[cfg(feature = "debug")]
        log::debug!("Loaded asset configuration from {}", path.display());

        Self::from_json_str(&json)
    }

    /// Serve every default asset from `base_url`, keeping the file names
    pub fn self_hosted(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let rebase = |asset: &Asset| Asset::new(asset.name.clone(), format!("{base}/{}", asset.file_name()));

        let defaults = Self::default();
        Self {
            scripts: defaults.scripts.iter().map(rebase).collect(),
            stylesheets: defaults.stylesheets.iter().map(rebase).collect(),
        }
    }

    /// Append or replace (by name) a script
    pub fn with_script(mut self, asset: Asset) -> Self {
        upsert(&mut self.scripts, asset);
        self
    }

    /// Append or replace (by name) a stylesheet
    pub fn with_stylesheet(mut self, asset: Asset) -> Self {
        upsert(&mut self.stylesheets, asset);
        self
    }
}

fn upsert(assets: &mut Vec<Asset>, asset: Asset) {
    match assets.iter_mut().find(|existing| existing.name == asset.name) {
        Some(existing) => *existing = asset,
        None => assets.push(asset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assets() {
        let config = AssetConfig::default();
        assert_eq!(config.scripts[0], Asset::new("leaflet", constants::LEAFLET_JS));
        assert!(config.stylesheets.iter().any(|a| a.name == "awesome_markers_css"));
    }

    #[test]
    fn test_self_hosted() {
        let config = AssetConfig::self_hosted("/static/");
        assert_eq!(config.scripts[0].url, "/static/leaflet.js");
        assert_eq!(config.stylesheets[0].url, "/static/leaflet.css");
        assert_eq!(config.scripts.len(), AssetConfig::default().scripts.len());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AssetConfig::from_json_str(
            r#"{"scripts": [{"name": "leaflet", "url": "/js/leaflet.js"}]}"#,
        )
        .unwrap();
        assert_eq!(config.scripts, vec![Asset::new("leaflet", "/js/leaflet.js")]);
        assert_eq!(config.stylesheets, AssetConfig::default().stylesheets);
    }

    #[test]
    fn test_with_script_replaces_by_name() {
        let config = AssetConfig::default()
            .with_script(Asset::new("leaflet", "/leaflet.js"))
            .with_script(Asset::new("extra", "/extra.js"));
        assert_eq!(config.scripts[0].url, "/leaflet.js");
        assert_eq!(config.scripts.last().unwrap().name, "extra");
    }

    #[test]
    fn test_tags() {
        let asset = Asset::new("leaflet", "/leaflet.js");
        assert_eq!(asset.script_tag(), r#"<script src="/leaflet.js"></script>"#);
        assert_eq!(asset.stylesheet_tag(), r#"<link rel="stylesheet" href="/leaflet.js"/>"#);
    }
}
