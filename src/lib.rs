//! # leafmap
//!
//! Compose interactive web maps in Rust and render them to a standalone HTML
//! document driving [Leaflet](https://leafletjs.com).
//!
//! Maps are built as a tree of elements (map, tile layers, feature groups,
//! markers, icons, popups, bounds fitters, layer controls) held by an
//! [`ElementTree`]. Rendering walks the tree depth-first and every element
//! appends its script fragment to the document held by the [`Figure`] root.

pub mod core;
pub mod layers;
pub mod rendering;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::{Asset, AssetConfig},
    element::{Container, Html, JavaScript},
    figure::Figure,
    geo::{IntoLatLng, LatLng, LatLngBounds},
    map::{Map, MapOptions},
    tree::{ElementTree, Node, NodeId},
    viewport::FitBounds,
};

pub use crate::layers::{
    base::Layer, feature_group::FeatureGroup, marker::Marker, tile::TileLayer,
};

pub use crate::rendering::context::{FigureBuffers, OutputBuffer, RenderContext};

pub use crate::traits::Element;

pub use crate::ui::{
    controls::{LayerControl, LayerSelection, Position},
    icon::Icon,
    popup::{Popup, PopupContent},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Element {0} cannot be rendered outside of a Figure")]
    NotInDocument(String),

    #[error("Element {0} has no parent")]
    MissingParent(String),

    #[error("Unknown tile provider: {0}")]
    UnknownTileProvider(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
