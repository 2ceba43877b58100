use crate::{
    core::{
        constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM},
        json::{js_string, to_string_spaced},
    },
    layers::base::Layer,
    prelude::HashMap,
    rendering::context::RenderContext,
    traits::Element,
    MapError, Result,
};
use askama::Template;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A built-in tile server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProvider {
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u32,
}

const OSM_ATTRIBUTION: &str = r#"Data by &copy; <a href="http://openstreetmap.org">OpenStreetMap</a>, under <a href="http://www.openstreetmap.org/copyright">ODbL</a>."#;

const CARTO_ATTRIBUTION: &str = r#"&copy; <a href="http://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="http://cartodb.com/attributions">CartoDB</a>, CartoDB <a href ="http://cartodb.com/attributions">attributions</a>"#;

const TOPO_ATTRIBUTION: &str = r#"Map data: &copy; <a href="http://www.openstreetmap.org/copyright">OpenStreetMap</a>, <a href="http://viewfinderpanoramas.org">SRTM</a> | Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> (CC-BY-SA)"#;

/// Built-in providers keyed by normalized name (see [`TileLayer::provider_key`])
static PROVIDERS: Lazy<HashMap<&'static str, TileProvider>> = Lazy::new(|| {
    let mut providers = HashMap::default();
    providers.insert(
        "openstreetmap",
        TileProvider {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            attribution: OSM_ATTRIBUTION,
            max_zoom: DEFAULT_MAX_ZOOM,
        },
    );
    providers.insert(
        "cartodbpositron",
        TileProvider {
            url: "https://cartodb-basemaps-{s}.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png",
            attribution: CARTO_ATTRIBUTION,
            max_zoom: DEFAULT_MAX_ZOOM,
        },
    );
    providers.insert(
        "cartodbdark_matter",
        TileProvider {
            url: "https://cartodb-basemaps-{s}.global.ssl.fastly.net/dark_all/{z}/{x}/{y}.png",
            attribution: CARTO_ATTRIBUTION,
            max_zoom: DEFAULT_MAX_ZOOM,
        },
    );
    providers.insert(
        "opentopomap",
        TileProvider {
            url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            attribution: TOPO_ATTRIBUTION,
            max_zoom: 17,
        },
    );
    providers
});

/// Options of `L.tileLayer`, fields declared in sorted key order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub attribution: String,
    pub detect_retina: bool,
    pub max_native_zoom: u32,
    pub max_zoom: u32,
    pub min_zoom: u32,
    pub no_wrap: bool,
    pub opacity: f64,
    pub subdomains: String,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            attribution: String::new(),
            detect_retina: false,
            max_native_zoom: DEFAULT_MAX_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            no_wrap: false,
            opacity: 1.0,
            subdomains: "abc".to_string(),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.tileLayer(
        {{ url }},
        {{ options }}
        ).addTo({{ parent }});"#,
    ext = "txt",
    escape = "none"
)]
struct TileLayerTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    url: &'a str,
    options: &'a str,
}

/// A raster tile layer, listed as a base layer by layer controls
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    properties: Layer,
    url: String,
    options: TileLayerOptions,
}

impl TileLayer {
    /// A built-in provider, looked up ignoring case and whitespace
    /// (`"CartoDB positron"` and `"cartodbpositron"` are the same provider)
    pub fn new(provider: &str) -> Result<Self> {
        let key = Self::provider_key(provider);
        let tiles = PROVIDERS
            .get(key.as_str())
            .ok_or_else(|| MapError::UnknownTileProvider(provider.to_string()))?;

        #[cfg(feature = "debug")]
        log::debug!("Using tile provider {}", key);

        let options = TileLayerOptions {
            attribution: tiles.attribution.to_string(),
            max_native_zoom: tiles.max_zoom,
            max_zoom: tiles.max_zoom,
            ..TileLayerOptions::default()
        };

        Ok(Self {
            properties: Layer::new(Some(key), false, true),
            url: tiles.url.to_string(),
            options,
        })
    }

    /// Tiles from any `{z}/{x}/{y}` URL template
    pub fn custom(url: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            properties: Layer::default(),
            url: url.into(),
            options: TileLayerOptions {
                attribution: attribution.into(),
                ..TileLayerOptions::default()
            },
        }
    }

    pub fn openstreetmap() -> Self {
        Self {
            properties: Layer::new(Some("openstreetmap".to_string()), false, true),
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            options: TileLayerOptions {
                attribution: OSM_ATTRIBUTION.to_string(),
                ..TileLayerOptions::default()
            },
        }
    }

    /// Normalized provider name: lowercase, whitespace removed
    pub fn provider_key(provider: &str) -> String {
        provider.to_lowercase().split_whitespace().collect()
    }

    /// Names of the built-in providers, sorted
    pub fn providers() -> Vec<&'static str> {
        let mut names: Vec<_> = PROVIDERS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    crate::impl_layer_builder!(properties);

    pub fn min_zoom(mut self, zoom: u32) -> Self {
        self.options.min_zoom = zoom;
        self
    }

    pub fn max_zoom(mut self, zoom: u32) -> Self {
        self.options.max_zoom = zoom;
        self
    }

    pub fn max_native_zoom(mut self, zoom: u32) -> Self {
        self.options.max_native_zoom = zoom;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.options.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn subdomains(mut self, subdomains: impl Into<String>) -> Self {
        self.options.subdomains = subdomains.into();
        self
    }

    pub fn no_wrap(mut self, no_wrap: bool) -> Self {
        self.options.no_wrap = no_wrap;
        self
    }

    pub fn detect_retina(mut self, detect_retina: bool) -> Self {
        self.options.detect_retina = detect_retina;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }
}

impl Element for TileLayer {
    crate::impl_element_any!();
    crate::impl_element_layer!(properties);

    fn kind(&self) -> &'static str {
        "tile_layer"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();
        let url = js_string(&self.url)?;
        let options = to_string_spaced(&self.options)?;
        let script = TileLayerTemplate {
            name,
            parent: ctx.parent_name()?,
            url: &url,
            options: &options,
        }
        .render()?;
        ctx.script()?.add(name, script);

        ctx.render_children()
    }
}
