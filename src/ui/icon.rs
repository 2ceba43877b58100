use crate::{
    core::{constants::MARKER_COLORS, json::js_string},
    rendering::context::RenderContext,
    traits::Element,
    Result,
};
use askama::Template;
use serde::{Deserialize, Serialize};

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.AwesomeMarkers.icon({
        icon: {{ glyph }},
        iconColor: {{ icon_color }},
        markerColor: {{ color }},
        prefix: {{ prefix }},
        extraClasses: 'fa-rotate-{{ angle }}'
        });
    {{ parent }}.setIcon({{ name }});"#,
    ext = "txt",
    escape = "none"
)]
struct IconTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    glyph: String,
    icon_color: String,
    color: String,
    prefix: String,
    angle: i32,
}

/// Marker styling through Leaflet.awesome-markers.
///
/// Must be a child of the marker it restyles: the icon is created after the
/// marker and then swapped in with `setIcon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// Marker body colour, one of [`MARKER_COLORS`]
    pub color: String,
    /// Colour of the glyph, any CSS colour
    pub icon_color: String,
    /// Glyph name, e.g. `info-sign` (glyphicon) or `cloud` (font-awesome)
    pub glyph: String,
    /// Rotation of the glyph in degrees
    pub angle: i32,
    /// `glyphicon` for Bootstrap 3 glyphs, `fa` for font-awesome
    pub prefix: String,
}

impl Default for Icon {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            icon_color: "white".to_string(),
            glyph: "info-sign".to_string(),
            angle: 0,
            prefix: "glyphicon".to_string(),
        }
    }
}

impl Icon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = color.into();
        self
    }

    pub fn glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    pub fn angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn has_known_color(&self) -> bool {
        MARKER_COLORS.contains(&self.color.as_str())
    }
}

impl Element for Icon {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "icon"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();

        #[cfg(feature = "debug")]
        if !self.has_known_color() {
            log::warn!(
                "{}: marker color {:?} is not an awesome-markers color",
                name,
                self.color
            );
        }

        let script = IconTemplate {
            name,
            parent: ctx.parent_name()?,
            glyph: js_string(&self.glyph)?,
            icon_color: js_string(&self.icon_color)?,
            color: js_string(&self.color)?,
            prefix: js_string(&self.prefix)?,
            angle: self.angle,
        }
        .render()?;
        ctx.script()?.add(name, script);

        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::tree::ElementTree, Marker, MapError};

    #[test]
    fn test_icon_defaults() {
        let icon = Icon::new();
        assert_eq!(icon.color, "blue");
        assert_eq!(icon.icon_color, "white");
        assert_eq!(icon.glyph, "info-sign");
        assert_eq!(icon.angle, 0);
        assert_eq!(icon.prefix, "glyphicon");
        assert!(icon.has_known_color());
        assert!(!Icon::new().color("#123456").has_known_color());
    }

    #[test]
    fn test_icon_script_follows_marker() {
        let icon = Icon::new().color("green").glyph("cloud").prefix("fa").angle(45);
        let mut tree = ElementTree::figure();
        let root = tree.root();
        tree.add_child(root, Marker::new((1.0, 2.0)).unwrap().icon(icon));

        let buffers = tree.render_buffers().unwrap();
        let order: Vec<_> = buffers.script.names().collect();
        assert_eq!(order, ["marker_2", "icon_3"]);

        let script = buffers.script.get("icon_3").unwrap();
        assert!(script.contains("var icon_3 = L.AwesomeMarkers.icon({"));
        assert!(script.contains(r#"icon: "cloud","#));
        assert!(script.contains(r#"iconColor: "white","#));
        assert!(script.contains(r#"markerColor: "green","#));
        assert!(script.contains(r#"prefix: "fa","#));
        assert!(script.contains("extraClasses: 'fa-rotate-45'"));
        assert!(script.contains("marker_2.setIcon(icon_3);"));
    }

    #[test]
    fn test_icon_values_are_quoted() {
        let icon = Icon::new().glyph("it's").icon_color("#fff'); alert(1); ('");
        let mut tree = ElementTree::figure();
        let root = tree.root();
        tree.add_child(root, Marker::new((1.0, 2.0)).unwrap().icon(icon));

        let buffers = tree.render_buffers().unwrap();
        let script = buffers.script.get("icon_3").unwrap();
        assert!(script.contains(r#"icon: "it's","#));
        assert!(script.contains(r##"iconColor: "#fff'); alert(1); ('","##));
    }

    #[test]
    fn test_icon_needs_parent() {
        let tree = ElementTree::new(Icon::new());
        assert!(matches!(tree.render(), Err(MapError::MissingParent(name)) if name == "icon_1"));
    }
}
