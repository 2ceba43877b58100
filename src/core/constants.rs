//! Core constants derived from Leaflet defaults and the asset versions the
//! generated documents are tested against.
//! Keeping them in a single place makes it easier to bump library versions.

/// Leaflet JavaScript bundle.
pub const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.2.0/dist/leaflet.js";

/// Leaflet stylesheet.
pub const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.2.0/dist/leaflet.css";

/// jQuery, used by popups to turn their HTML content into DOM nodes.
pub const JQUERY_JS: &str = "https://ajax.googleapis.com/ajax/libs/jquery/1.11.1/jquery.min.js";

pub const BOOTSTRAP_JS: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/3.2.0/js/bootstrap.min.js";
pub const BOOTSTRAP_CSS: &str =
    "https://maxcdn.bootstrapcdn.com/bootstrap/3.2.0/css/bootstrap.min.css";
pub const BOOTSTRAP_THEME_CSS: &str =
    "https://maxcdn.bootstrapcdn.com/bootstrap/3.2.0/css/bootstrap-theme.min.css";

pub const FONT_AWESOME_CSS: &str =
    "https://maxcdn.bootstrapcdn.com/font-awesome/4.6.3/css/font-awesome.min.css";

/// Leaflet.awesome-markers plugin backing [`Icon`](crate::Icon).
pub const AWESOME_MARKERS_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js";
pub const AWESOME_MARKERS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css";

/// `fa-rotate-N` classes used for icon rotation.
pub const AWESOME_ROTATE_CSS: &str =
    "https://cdn.jsdelivr.net/gh/python-visualization/folium/folium/templates/leaflet.awesome.rotate.min.css";

/// Marker colours understood by Leaflet.awesome-markers.
pub const MARKER_COLORS: [&str; 19] = [
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "darkred",
    "lightred",
    "beige",
    "darkblue",
    "darkgreen",
    "cadetblue",
    "darkpurple",
    "white",
    "pink",
    "lightblue",
    "lightgreen",
    "gray",
    "black",
    "lightgray",
];

/// Default popup width in pixels.
pub const DEFAULT_POPUP_MAX_WIDTH: u32 = 300;

/// Default initial zoom of a [`Map`](crate::Map).
pub const DEFAULT_ZOOM_START: f64 = 10.0;

/// Default tile provider of a [`Map`](crate::Map).
pub const DEFAULT_TILES: &str = "OpenStreetMap";

/// Default zoom limits of a tile layer.
pub const DEFAULT_MIN_ZOOM: u32 = 0;
pub const DEFAULT_MAX_ZOOM: u32 = 18;
