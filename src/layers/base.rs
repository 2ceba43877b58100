use crate::{rendering::context::RenderContext, Result};
use askama::Template;
use serde::{Deserialize, Serialize};

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.layerGroup(
        ).addTo({{ parent }});"#,
    ext = "txt",
    escape = "none"
)]
struct LayerGroupTemplate<'a> {
    name: &'a str,
    parent: &'a str,
}

/// Layer-control properties of an element.
///
/// Marks a node as something a [`LayerControl`](crate::LayerControl) can
/// toggle. On its own a `Layer` renders as an `L.layerGroup` that its
/// children attach to, a named switchable grouping without feature-group
/// events or bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    name: Option<String>,
    overlay: bool,
    control: bool,
}

impl Layer {
    /// A layer named `name` (or, when `None`, by its generated identifier)
    pub fn new(name: Option<String>, overlay: bool, control: bool) -> Self {
        Self {
            name,
            overlay,
            control,
        }
    }

    /// Explicit display name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name shown in layer controls, falling back to the node's identifier
    pub fn display_name<'a>(&'a self, node_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(node_name)
    }

    /// Overlays are toggled independently; base layers are mutually exclusive
    pub fn overlay(&self) -> bool {
        self.overlay
    }

    /// Whether layer controls list this layer
    pub fn control(&self) -> bool {
        self.control
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_overlay(&mut self, overlay: bool) {
        self.overlay = overlay;
    }

    pub fn set_control(&mut self, control: bool) {
        self.control = control;
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new(None, false, true)
    }
}

impl crate::traits::Element for Layer {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "layer"
    }

    fn layer(&self) -> Option<&Layer> {
        Some(self)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();
        let script = LayerGroupTemplate {
            name,
            parent: ctx.parent_name()?,
        }
        .render()?;
        ctx.script()?.add(name, script);

        ctx.render_children()
    }
}
