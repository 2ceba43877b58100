pub mod controls;
pub mod icon;
pub mod popup;

pub use controls::{LayerControl, LayerSelection, Position};
pub use icon::Icon;
pub use popup::{Popup, PopupContent};
