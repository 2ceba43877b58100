//! Viewport fitting
//!
//! [`FitBounds`] zooms and pans its parent map so a bounding box is fully
//! visible. The box is either given up front or computed in the browser from
//! the sibling features that carry bounds.

use crate::{
    core::{geo::LatLngBounds, json::to_string_spaced},
    rendering::context::RenderContext,
    traits::Element,
    MapError, Result,
};
use askama::Template;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Template)]
#[template(
    source = r#"
    {%- match features %}{% when Some with (features) %}
    var {{ name }}_autobounds = L.featureGroup({{ features }}).getBounds();
    {%- when None %}{% endmatch %}
    {{ parent }}.fitBounds(
        {{ bounds }},
        {{ options }}
        );"#,
    ext = "txt",
    escape = "none"
)]
struct FitBoundsTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    features: Option<String>,
    bounds: &'a str,
    options: &'a str,
}

/// Fit the parent map to a bounding box at the highest zoom that shows it all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitBounds {
    bounds: Option<Value>,
    padding_top_left: Option<[u32; 2]>,
    padding_bottom_right: Option<[u32; 2]>,
    padding: Option<[u32; 2]>,
    max_zoom: Option<u32>,
}

impl FitBounds {
    /// Fit to `bounds`, given as `[[south, west], [north, east]]`.
    ///
    /// Any serializable pair of numeric pairs is accepted. The value is kept in
    /// its JSON form so integers stay integers in the generated script.
    pub fn new<B: Serialize>(bounds: B) -> Result<Self> {
        let bounds = serde_json::to_value(bounds)?;
        validate_bounds(&bounds)?;

        Ok(Self {
            bounds: Some(bounds),
            ..Self::default()
        })
    }

    /// Fit to whatever the sibling features cover, computed client-side
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn from_bounds(bounds: &LatLngBounds) -> Self {
        Self {
            bounds: serde_json::to_value(bounds.to_array()).ok(),
            ..Self::default()
        }
    }

    /// Padding in pixels kept free in the top left corner, e.g. under controls
    pub fn padding_top_left(mut self, padding: [u32; 2]) -> Self {
        self.padding_top_left = Some(padding);
        self
    }

    pub fn padding_bottom_right(mut self, padding: [u32; 2]) -> Self {
        self.padding_bottom_right = Some(padding);
        self
    }

    /// Same padding on both corners
    pub fn padding(mut self, padding: [u32; 2]) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Upper zoom limit; 0 means no limit
    pub fn max_zoom(mut self, max_zoom: u32) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn bounds(&self) -> Option<&Value> {
        self.bounds.as_ref()
    }

    pub fn is_auto(&self) -> bool {
        self.bounds.is_none()
    }

    /// `fitBounds` options with sorted keys; unset and zero values are left out
    pub fn options_json(&self) -> Result<String> {
        let mut options = BTreeMap::new();
        if let Some(max_zoom) = self.max_zoom.filter(|zoom| *zoom != 0) {
            options.insert("maxZoom", serde_json::to_value(max_zoom)?);
        }
        if let Some(padding) = self.padding_top_left {
            options.insert("paddingTopLeft", serde_json::to_value(padding)?);
        }
        if let Some(padding) = self.padding_bottom_right {
            options.insert("paddingBottomRight", serde_json::to_value(padding)?);
        }
        if let Some(padding) = self.padding {
            options.insert("padding", serde_json::to_value(padding)?);
        }
        to_string_spaced(&options)
    }
}

fn validate_bounds(bounds: &Value) -> Result<()> {
    let is_point = |point: &Value| {
        point
            .as_array()
            .map_or(false, |pair| pair.len() == 2 && pair.iter().all(Value::is_number))
    };
    let valid = bounds
        .as_array()
        .map_or(false, |corners| corners.len() == 2 && corners.iter().all(is_point));

    if valid {
        Ok(())
    } else {
        Err(MapError::InvalidCoordinate(format!(
            "expected [[south, west], [north, east]], got {bounds}"
        )))
    }
}

impl Element for FitBounds {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "fit_bounds"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let tree = ctx.tree();
        let name = ctx.name();
        let parent = ctx.parent()?;

        let (features, bounds) = match &self.bounds {
            Some(bounds) => (None, to_string_spaced(bounds)?),
            None => {
                let features: Vec<&str> = tree
                    .children(parent)
                    .filter(|(_, child)| *child != ctx.node())
                    .filter(|(_, child)| tree.get_bounds(*child).is_some())
                    .map(|(_, child)| tree.name(child))
                    .collect();

                if features.is_empty() {
                    #[cfg(feature = "debug")]
                    log::warn!("{}: no sibling feature has bounds, not fitting", name);

                    return ctx.render_children();
                }

                #[cfg(feature = "debug")]
                log::debug!("{} computes its bounds from {} features", name, features.len());

                (
                    Some(format!("[{}]", features.join(", "))),
                    format!("{name}_autobounds"),
                )
            }
        };

        let options = self.options_json()?;
        let script = FitBoundsTemplate {
            name,
            parent: tree.name(parent),
            features,
            bounds: &bounds,
            options: &options,
        }
        .render()?;
        ctx.script()?.add(name, script);

        ctx.render_children()
    }
}
