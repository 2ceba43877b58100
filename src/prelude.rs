//! Prelude module for common leafmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use leafmap::prelude::*;`

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
    controls::{LayerControl, Position},
    icon::Icon,
    popup::Popup,
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
