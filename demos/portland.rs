//! Minimal map: a marker with a popup inside a feature group, a second base
//! layer and a layer control.

use leafmap::{
    ElementTree, FeatureGroup, FitBounds, Icon, LayerControl, Map, Marker, Popup, TileLayer,
};

fn main() -> leafmap::Result<()> {
    let map = Map::new().location((45.5, -122.3))?.zoom_start(12.0);
    let (mut tree, map) = ElementTree::with_map(map);

    tree.add_child(map, TileLayer::new("CartoDB dark_matter")?);

    let group = tree.add_child(map, FeatureGroup::new().name("Portland"));
    tree.add_child(
        group,
        Marker::new((45.5, -122.3))?
            .popup(Popup::new("<b>Portland, OR</b>").parse_html(true))
            .tooltip("Click me")
            .icon(Icon::new().color("red").glyph("cloud").prefix("fa")),
    );
    tree.add_child(group, Marker::new([45.52, -122.68])?.popup("Pioneer Square"));

    tree.add_child(map, FitBounds::auto().max_zoom(14));
    tree.add_child(map, LayerControl::new().collapsed(false));

    tree.save("portland.html")?;
    println!("Saved portland.html");
    Ok(())
}
