use crate::{
    core::{
        config::AssetConfig,
        constants::DEFAULT_ZOOM_START,
        element::css_size,
        geo::{IntoLatLng, LatLng, LatLngBounds},
        json::to_string_spaced,
    },
    layers::tile::TileLayer,
    rendering::context::RenderContext,
    traits::Element,
    Node, Result,
};
use askama::Template;
use serde::{Deserialize, Serialize};

/// Map interaction options, serialized into the `L.map` options object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub touch_zoom: bool,
    pub keyboard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bounds: Option<[[f64; 2]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    pub attribution_control: bool,
    pub zoom_control: bool,
    pub zoom_snap: f64,
    pub zoom_delta: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            touch_zoom: true,
            keyboard: true,
            max_bounds: None,
            min_zoom: None,
            max_zoom: None,
            attribution_control: true,
            zoom_control: true,
            zoom_snap: 1.0,
            zoom_delta: 1.0,
        }
    }
}

impl MapOptions {
    /// Restrict panning to `bounds`
    pub fn with_max_bounds(mut self, bounds: &LatLngBounds) -> Self {
        self.max_bounds = Some(bounds.to_array());
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom.min(max_zoom));
        self.max_zoom = Some(max_zoom.max(min_zoom));
        self
    }
}

const VIEWPORT_META: &str = r#"<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />"#;

const PAGE_STYLE: &str = "<style>html, body {width: 100%;height: 100%;margin: 0;padding: 0;}</style>";

const MAP_STYLE: &str =
    "<style>#map {position:absolute;top:0;bottom:0;right:0;left:0;}</style>";

#[derive(Template)]
#[template(
    source = r#"<style>
    #{{ name }} {
        position: relative;
        width: {{ width }};
        height: {{ height }};
        left: 0.0%;
        top: 0.0%;
    }
</style>"#,
    ext = "txt",
    escape = "none"
)]
struct MapStyleTemplate<'a> {
    name: &'a str,
    width: &'a str,
    height: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.map(
        "{{ name }}",
        {{ options }}
    );"#,
    ext = "txt",
    escape = "none"
)]
struct MapScriptTemplate<'a> {
    name: &'a str,
    options: &'a str,
}

/// A Leaflet map and the container `<div>` it is drawn in.
///
/// The map links the Leaflet, awesome-markers, jQuery and Bootstrap assets
/// into the document header, adds its `<div>` to the body and creates the
/// `L.map` object every layer, marker and control below it attaches to.
/// A fresh map carries an OpenStreetMap tile layer.
#[derive(Debug, Clone)]
pub struct Map {
    location: Option<LatLng>,
    zoom_start: f64,
    width: String,
    height: String,
    tiles: Option<TileLayer>,
    options: MapOptions,
    assets: AssetConfig,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    pub fn new() -> Self {
        Self {
            location: None,
            zoom_start: DEFAULT_ZOOM_START,
            width: css_size(100.0, "%"),
            height: css_size(100.0, "%"),
            tiles: Some(TileLayer::openstreetmap()),
            options: MapOptions::default(),
            assets: AssetConfig::default(),
        }
    }

    /// Initial centre; fails on anything but two finite numbers
    pub fn location(mut self, location: impl IntoLatLng) -> Result<Self> {
        self.location = Some(location.into_lat_lng()?);
        Ok(self)
    }

    pub fn zoom_start(mut self, zoom: f64) -> Self {
        self.zoom_start = zoom;
        self
    }

    pub fn width(mut self, value: f64, unit: &str) -> Self {
        self.width = css_size(value, unit);
        self
    }

    pub fn height(mut self, value: f64, unit: &str) -> Self {
        self.height = css_size(value, unit);
        self
    }

    /// Replace the default tile layer
    pub fn tiles(mut self, tiles: TileLayer) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Start without any tile layer
    pub fn without_tiles(mut self) -> Self {
        self.tiles = None;
        self
    }

    pub fn options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn assets(mut self, assets: AssetConfig) -> Self {
        self.assets = assets;
        self
    }

    pub fn get_location(&self) -> Option<LatLng> {
        self.location
    }

    pub fn map_options(&self) -> &MapOptions {
        &self.options
    }

    /// The `L.map` options object: centre, zoom and the interaction options.
    ///
    /// Without a location the map starts on the whole world at zoom 1.
    fn options_json(&self) -> Result<String> {
        let (center, zoom) = match self.location {
            Some(location) => (location, self.zoom_start),
            None => (LatLng::default(), 1.0),
        };

        let mut options = match serde_json::to_value(&self.options)? {
            serde_json::Value::Object(options) => options,
            _ => serde_json::Map::new(),
        };
        options.insert("center".to_string(), serde_json::to_value(center.to_array())?);
        options.insert("zoom".to_string(), serde_json::to_value(zoom)?);

        to_string_spaced(&options)
    }
}

impl Element for Map {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "map"
    }

    fn take_children(&mut self) -> Vec<Node> {
        self.tiles.take().map(Node::from).into_iter().collect()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();

        let style = MapStyleTemplate {
            name,
            width: &self.width,
            height: &self.height,
        }
        .render()?;
        let options = self.options_json()?;
        let script = MapScriptTemplate {
            name,
            options: &options,
        }
        .render()?;

        let buffers = ctx.buffers()?;
        buffers.header.add("meta_http", VIEWPORT_META);
        for asset in &self.assets.scripts {
            buffers.header.add(asset.name.clone(), asset.script_tag());
        }
        for asset in &self.assets.stylesheets {
            buffers.header.add(asset.name.clone(), asset.stylesheet_tag());
        }
        buffers.header.add("css_style", PAGE_STYLE);
        buffers.header.add("map_style", MAP_STYLE);
        buffers.header.add(format!("{name}_style"), style);

        buffers.html.add(
            name,
            format!(r#"<div class="leafmap-map" id="{name}" ></div>"#),
        );
        buffers.script.add(name, script);

        #[cfg(feature = "debug")]
        log::debug!("Rendering map {} with {} children", name, ctx.tree().children(ctx.node()).count());

        ctx.render_children()?;
        Ok(String::new())
    }
}
