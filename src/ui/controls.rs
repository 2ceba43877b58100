use crate::{
    core::{
        json::js_string,
        tree::{ElementTree, NodeId},
    },
    rendering::context::RenderContext,
    traits::Element,
    MapError, Result,
};
use askama::Template;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Map corner a control is anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopLeft => "topleft",
            Position::TopRight => "topright",
            Position::BottomLeft => "bottomleft",
            Position::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "topleft" => Ok(Position::TopLeft),
            "topright" => Ok(Position::TopRight),
            "bottomleft" => Ok(Position::BottomLeft),
            "bottomright" => Ok(Position::BottomRight),
            other => Err(MapError::ParseError(format!("unknown control position: {other}"))),
        }
    }
}

/// Layers a control lists, as (display name, script identifier) pairs in
/// child order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSelection {
    pub base_layers: Vec<(String, String)>,
    pub overlays: Vec<(String, String)>,
}

impl LayerSelection {
    pub fn is_empty(&self) -> bool {
        self.base_layers.is_empty() && self.overlays.is_empty()
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.base_layers
            .iter()
            .chain(&self.overlays)
            .any(|(name, _)| name == display_name)
    }
}

/// Insert keeping the first position of a display name, the last identifier wins
fn insert(entries: &mut Vec<(String, String)>, display_name: &str, id: &str) {
    match entries.iter_mut().find(|(name, _)| name == display_name) {
        Some(entry) => entry.1 = id.to_string(),
        None => entries.push((display_name.to_string(), id.to_string())),
    }
}

struct ControlEntry<'a> {
    label: String,
    id: &'a str,
}

fn control_entries(layers: &[(String, String)]) -> Result<Vec<ControlEntry<'_>>> {
    layers
        .iter()
        .map(|(display_name, id)| {
            Ok(ControlEntry {
                label: js_string(display_name)?,
                id,
            })
        })
        .collect()
}

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = {
        base_layers : { {% for layer in base_layers %}{{ layer.label }} : {{ layer.id }},{% endfor %} },
        overlays : { {% for layer in overlays %}{{ layer.label }} : {{ layer.id }},{% endfor %} }
        };
    L.control.layers(
        {{ name }}.base_layers,
        {{ name }}.overlays,
        {position: '{{ position }}',
         collapsed: {{ collapsed }},
         autoZIndex: {{ auto_z_index }}
        }).addTo({{ parent }});"#,
    ext = "txt",
    escape = "none"
)]
struct LayerControlTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    base_layers: Vec<ControlEntry<'a>>,
    overlays: Vec<ControlEntry<'a>>,
    position: Position,
    collapsed: bool,
    auto_z_index: bool,
}

/// Layer switcher listing the layers that share its parent.
///
/// The lists are not stored: every render scans the parent's direct children
/// again, so layers added after the control still show up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerControl {
    position: Position,
    collapsed: bool,
    auto_z_index: bool,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            collapsed: true,
            auto_z_index: true,
        }
    }
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Collapse into an icon until hovered
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Keep layer stacking order when toggling layers
    pub fn auto_z_index(mut self, auto_z_index: bool) -> Self {
        self.auto_z_index = auto_z_index;
        self
    }

    /// Classify the controllable layers among the direct children of `parent`
    pub fn scan(tree: &ElementTree, parent: NodeId) -> LayerSelection {
        let mut selection = LayerSelection::default();
        for (_, child) in tree.children(parent) {
            let Some(layer) = tree.element(child).layer() else {
                continue;
            };
            if !layer.control() {
                continue;
            }

            let id = tree.name(child);
            let display_name = layer.display_name(id);
            if layer.overlay() {
                insert(&mut selection.overlays, display_name, id);
            } else {
                insert(&mut selection.base_layers, display_name, id);
            }
        }
        selection
    }
}

impl Element for LayerControl {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "layer_control"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let tree = ctx.tree();
        let name = ctx.name();
        let parent = ctx.parent()?;

        let selection = Self::scan(tree, parent);

        #[cfg(feature = "debug")]
        log::debug!(
            "{}: {} base layers, {} overlays",
            name,
            selection.base_layers.len(),
            selection.overlays.len()
        );

        let script = LayerControlTemplate {
            name,
            parent: tree.name(parent),
            base_layers: control_entries(&selection.base_layers)?,
            overlays: control_entries(&selection.overlays)?,
            position: self.position,
            collapsed: self.collapsed,
            auto_z_index: self.auto_z_index,
        }
        .render()?;
        ctx.script()?.add(name, script);

        Ok(String::new())
    }
}
