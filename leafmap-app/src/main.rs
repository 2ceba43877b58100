//! leafmap-app - writes a standalone HTML map document
//!
//! Without arguments it renders a small demo around Portland, OR. A JSON file
//! of places (`[{"name": "...", "lat": 45.5, "lng": -122.3}, ...]`) replaces
//! the demo markers.

use anyhow::{bail, Context, Result};
use clap::Parser;
use leafmap::{
    AssetConfig, ElementTree, FeatureGroup, Figure, FitBounds, Icon, LatLng, LatLngBounds,
    LayerControl, Map, Marker, Popup, Position, TileLayer,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leafmap-app")]
#[command(about = "Render an interactive Leaflet map to a standalone HTML file", long_about = None)]
struct Args {
    /// Output HTML file
    #[arg(long, short, default_value = "map.html")]
    output: PathBuf,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// JSON file listing the places to mark
    #[arg(long)]
    places: Option<PathBuf>,

    /// JSON asset configuration (script and stylesheet URLs)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Base URL serving the default assets locally, e.g. /static
    #[arg(long, conflicts_with = "assets")]
    self_hosted: Option<String>,

    /// Base tile provider
    #[arg(long, default_value = "OpenStreetMap")]
    tiles: String,

    /// Initial zoom level
    #[arg(long, default_value = "10")]
    zoom: f64,

    /// Corner of the layer control (topleft, topright, bottomleft, bottomright)
    #[arg(long, default_value = "topright")]
    control_position: Position,
}

#[derive(Debug, Clone, Deserialize)]
struct Place {
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    tooltip: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

fn demo_places() -> Vec<Place> {
    let place = |name: &str, lat, lng, color: &str| Place {
        name: name.to_string(),
        lat,
        lng,
        tooltip: None,
        color: Some(color.to_string()),
    };

    vec![
        place("Portland, OR", 45.5, -122.3, "blue"),
        place("Timberline Lodge", 45.3311, -121.7113, "green"),
        place("Multnomah Falls", 45.5762, -122.1158, "cadetblue"),
    ]
}

fn load_places(args: &Args) -> Result<Vec<Place>> {
    let Some(path) = &args.places else {
        return Ok(demo_places());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read places from {}", path.display()))?;
    let places: Vec<Place> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid places file {}", path.display()))?;
    if places.is_empty() {
        bail!("{} does not list any place", path.display());
    }
    Ok(places)
}

fn load_assets(args: &Args) -> Result<AssetConfig> {
    match (&args.assets, &args.self_hosted) {
        (Some(path), _) => AssetConfig::load(path)
            .with_context(|| format!("Failed to load asset configuration {}", path.display())),
        (None, Some(base_url)) => Ok(AssetConfig::self_hosted(base_url)),
        (None, None) => Ok(AssetConfig::default()),
    }
}

fn build_document(args: &Args, places: &[Place], assets: AssetConfig) -> Result<ElementTree> {
    let center = LatLngBounds::from_points(places.iter().map(|p| LatLng::new(p.lat, p.lng)))
        .map(|bounds| bounds.center())
        .unwrap_or_default();

    let tiles = TileLayer::new(&args.tiles)
        .with_context(|| format!("Cannot use tiles {:?}", args.tiles))?;
    let map = Map::new()
        .location(center)?
        .zoom_start(args.zoom)
        .tiles(tiles)
        .assets(assets);

    let figure = match &args.title {
        Some(title) => Figure::new().title(title),
        None => Figure::new(),
    };
    let mut tree = ElementTree::new(figure);
    let root = tree.root();
    let map = tree.add_child(root, map);

    if TileLayer::provider_key(&args.tiles) != "cartodbpositron" {
        tree.add_child(map, TileLayer::new("CartoDB positron")?);
    }

    let group = tree.add_child(map, FeatureGroup::new().name("Places"));
    for place in places {
        let icon = Icon::new().color(place.color.as_deref().unwrap_or("blue"));
        let marker = Marker::new((place.lat, place.lng))
            .with_context(|| format!("Invalid location for {}", place.name))?
            .popup(Popup::new(place.name.as_str()).max_width(250))
            .tooltip(place.tooltip.as_deref().unwrap_or(&place.name))
            .icon(icon);
        tree.add_child(group, marker);
    }

    tree.add_child(map, FitBounds::auto().padding([30, 30]));
    tree.add_child(map, LayerControl::new().position(args.control_position));

    Ok(tree)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let places = load_places(&args)?;
    let assets = load_assets(&args)?;

    let tree = build_document(&args, &places, assets)?;
    tree.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("{} places written to {}", places.len(), args.output.display());
    println!("Map saved to {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_document() {
        let args = Args::parse_from(["leafmap-app", "--title", "Demo"]);
        let tree = build_document(&args, &demo_places(), AssetConfig::default()).unwrap();
        let page = tree.render().unwrap();

        assert!(page.contains("<title>Demo</title>"));
        assert_eq!(page.matches("L.marker(").count(), 3);
        assert!(page.contains("L.control.layers("));
        assert!(page.contains("_autobounds = L.featureGroup([feature_group_"));
    }

    #[test]
    fn test_places_json() {
        let places: Vec<Place> = serde_json::from_str(
            r#"[{"name": "Home", "lat": 1.5, "lng": 2.5, "color": "red"}]"#,
        )
        .unwrap();
        assert_eq!(places[0].name, "Home");
        assert_eq!(places[0].color.as_deref(), Some("red"));
        assert!(places[0].tooltip.is_none());
    }
}
