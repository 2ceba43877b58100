use crate::{
    layers::base::Layer, rendering::context::RenderContext, traits::Element, Result,
};
use askama::Template;

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.featureGroup(
        ).addTo({{ parent }});"#,
    ext = "txt",
    escape = "none"
)]
struct FeatureGroupTemplate<'a> {
    name: &'a str,
    parent: &'a str,
}

/// A named client-side group of features, toggled as a single layer.
///
/// Markers and other features added below a feature group attach to the
/// group instead of the map. Feature groups are overlays by default.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    properties: Layer,
}

impl FeatureGroup {
    pub fn new() -> Self {
        Self {
            properties: Layer::new(None, true, true),
        }
    }

    crate::impl_layer_builder!(properties);
}

impl Default for FeatureGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for FeatureGroup {
    crate::impl_element_any!();
    crate::impl_element_layer!(properties);

    fn kind(&self) -> &'static str {
        "feature_group"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();
        let script = FeatureGroupTemplate {
            name,
            parent: ctx.parent_name()?,
        }
        .render()?;
        ctx.script()?.add(name, script);

        ctx.render_children()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{element::Container, tree::ElementTree};
    use crate::MapError;

    #[test]
    fn test_feature_group_defaults() {
        let group = FeatureGroup::new();
        assert!(group.properties().overlay());
        assert!(group.properties().control());
        assert_eq!(group.properties().name(), None);

        let named = FeatureGroup::new().name("Places").overlay(false).control(false);
        assert_eq!(named.properties().name(), Some("Places"));
        assert!(!named.properties().overlay());
        assert!(!named.properties().control());
    }

    #[test]
    fn test_feature_group_script() {
        let mut tree = ElementTree::figure();
        let root = tree.root();
        tree.add_child(root, FeatureGroup::new());

        let buffers = tree.render_buffers().unwrap();
        let script = buffers.script.get("feature_group_2").unwrap();
        assert!(script.contains("var feature_group_2 = L.featureGroup("));
        assert!(script.contains(").addTo(figure_1);"));
    }

    #[test]
    fn test_feature_group_outside_document() {
        let mut tree = ElementTree::new(Container::new());
        let root = tree.root();
        let group = tree.add_child(root, FeatureGroup::new());

        assert!(matches!(tree.render(), Err(MapError::NotInDocument(name)) if name == "feature_group_2"));
        assert!(matches!(
            ElementTree::new(FeatureGroup::new()).render(),
            Err(MapError::MissingParent(_))
        ));
        assert!(tree.get::<FeatureGroup>(group).is_some());
    }
}
