use leafmap::{
    Container, ElementTree, FeatureGroup, FitBounds, Html, JavaScript, Layer, LayerControl, Map,
    MapError, Marker, Node, Popup, TileLayer,
};

/// Integration tests rendering whole documents the way users build them
#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Map (no tiles) holding one feature group; returns the tree and the group
    fn map_with_group() -> (ElementTree, leafmap::NodeId, leafmap::NodeId) {
        let (mut tree, map) = ElementTree::with_map(Map::new().without_tiles());
        let group = tree.add_child(map, FeatureGroup::new());
        (tree, map, group)
    }

    #[test]
    fn test_portland_end_to_end() {
        let (mut tree, _, group) = map_with_group();
        let marker = tree.add_child(
            group,
            Marker::new((45.5, -122.3)).unwrap().popup("Portland, OR"),
        );
        assert_eq!(tree.name(marker), "marker_4");

        let page = tree.render().unwrap();
        assert!(page.contains("var marker_4 = L.marker(\n        [45.5, -122.3],"));
        assert!(page.contains(".addTo(feature_group_3);"));
        assert!(page.contains("marker_4.bindPopup(popup_5);"));
        assert!(page.contains("Portland, OR"));
        assert!(!page.contains("bindTooltip"));

        // definition before use
        let map_created = page.find("var map_2 = L.map(").unwrap();
        let group_created = page.find("var feature_group_3 = L.featureGroup(").unwrap();
        let marker_created = page.find("var marker_4 = L.marker(").unwrap();
        let popup_bound = page.find("marker_4.bindPopup(").unwrap();
        assert!(map_created < group_created);
        assert!(group_created < marker_created);
        assert!(marker_created < popup_bound);
    }

    #[test]
    fn test_overlay_group_in_layer_control() {
        let (mut tree, map, _) = map_with_group();
        let control = tree.add_child(map, LayerControl::new());

        let buffers = tree.render_buffers().unwrap();
        let script = buffers.script.get(tree.name(control)).unwrap();
        assert!(script.contains(r#"overlays : { "feature_group_3" : feature_group_3, }"#));
        assert!(script.contains("base_layers : {  },"));
    }

    #[test]
    fn test_default_layer_is_a_base_layer() {
        let (mut tree, map) = ElementTree::with_map(Map::new().without_tiles());
        tree.add_child(map, Layer::new(Some("Background".to_string()), false, true));
        tree.add_child(map, Layer::new(Some("Hidden".to_string()), false, false));
        let selection = LayerControl::scan(&tree, map);

        assert!(selection.base_layers.iter().any(|(name, _)| name == "Background"));
        assert!(selection.overlays.is_empty());
        assert!(!selection.contains("Hidden"));
    }

    #[test]
    fn test_layers_flipped_after_insertion() {
        let (mut tree, map, group) = map_with_group();
        tree.get_mut::<FeatureGroup>(group)
            .unwrap()
            .properties_mut()
            .set_overlay(false);

        let selection = LayerControl::scan(&tree, map);
        assert_eq!(
            selection.base_layers,
            vec![("feature_group_3".to_string(), "feature_group_3".to_string())]
        );
    }

    #[test]
    fn test_fit_bounds_output_is_deterministic() {
        let build = || {
            let (mut tree, map) = ElementTree::with_map(Map::new().without_tiles());
            tree.add_child(
                map,
                FitBounds::new([[10, 10], [20, 20]])
                    .unwrap()
                    .padding_bottom_right([5, 5])
                    .max_zoom(5),
            );
            tree.render().unwrap()
        };

        let first = build();
        assert_eq!(first, build());
        assert!(first.contains("[[10, 10], [20, 20]],"));
        assert!(first.contains(r#"{"maxZoom": 5, "paddingBottomRight": [5, 5]}"#));
    }

    #[test]
    fn test_fit_bounds_autobounds_skips_featureless_siblings() {
        let (mut tree, map) = ElementTree::with_map(Map::new());
        let group = tree.add_child(map, FeatureGroup::new());
        tree.add_child(group, Marker::new((1.0, 1.0)).unwrap());
        tree.add_child(map, FeatureGroup::new());
        tree.add_child(map, FitBounds::auto());

        let page = tree.render().unwrap();
        assert!(page.contains("L.featureGroup([feature_group_4]).getBounds();"));
        assert!(page.contains("map_2.fitBounds(\n        fit_bounds_7_autobounds,\n        {}"));

        let bounds = tree.get_bounds(map).unwrap();
        assert_eq!(bounds.to_array(), [[1.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_popup_order_with_nested_scripts() {
        let (mut tree, _, group) = map_with_group();
        let popup = Popup::new(Node::from(Html::raw("<i>rich</i>")))
            .with_script(JavaScript::new("first();"))
            .with_script(JavaScript::new("second();"));
        tree.add_child(group, Marker::new((0.5, 0.5)).unwrap().popup(popup));

        let page = tree.render().unwrap();
        let positions: Vec<_> = [
            "L.popup(",
            ".setContent(",
            ".bindPopup(",
            "first();",
            "second();",
        ]
        .iter()
        .map(|needle| page.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(page.contains("<i>rich</i>"));
    }

    #[test]
    fn test_render_requires_document_root() {
        let mut tree = ElementTree::new(Container::new());
        let root = tree.root();
        tree.add_child(root, Marker::new((0.0, 0.0)).unwrap().popup("orphan"));

        assert!(matches!(tree.render(), Err(MapError::NotInDocument(_))));
        assert!(matches!(
            tree.save(std::env::temp_dir().join("leafmap-never-written.html")),
            Err(MapError::NotInDocument(_))
        ));
    }

    #[test]
    fn test_invalid_marker_locations() {
        assert!(matches!(
            Marker::new(vec![1.0, 2.0, 3.0]),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Marker::new((f64::NEG_INFINITY, 0.0)),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Marker::new(serde_json::json!("45.5, -122.3")),
            Err(MapError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_save_writes_document() {
        let (mut tree, map) = ElementTree::with_map(Map::new());
        tree.add_child(map, TileLayer::new("OpenTopoMap").unwrap());
        tree.add_child(map, LayerControl::new());

        let path = std::env::temp_dir().join(format!("leafmap-test-{}.html", std::process::id()));
        tree.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains(r#"<div class="leafmap-map" id="map_2" ></div>"#));
        assert!(written.contains(r#""openstreetmap" : tile_layer_3,"opentopomap" : tile_layer_4,"#));
        assert!(written.contains("leaflet.awesome-markers.js"));
    }
}
