use crate::{
    core::{
        geo::{IntoLatLng, LatLng, LatLngBounds},
        json::{js_string, to_string_spaced},
        tree::Node,
    },
    rendering::context::RenderContext,
    traits::Element,
    ui::{icon::Icon, popup::Popup},
    Result,
};
use askama::Template;

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.marker(
        {{ location }},
        {
            icon: new L.Icon.Default()
            }
        )
        {%- match tooltip %}{% when Some with (tooltip) %}.bindTooltip({{ tooltip }}){% when None %}{% endmatch %}
        .addTo({{ parent }});"#,
    ext = "txt",
    escape = "none"
)]
struct MarkerTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    location: &'a str,
    tooltip: Option<String>,
}

/// A stock Leaflet marker at a fixed location.
///
/// An [`Icon`] restyles the marker and a [`Popup`] is bound to it; both
/// become children of the marker and render right after it, icon first.
#[derive(Debug)]
pub struct Marker {
    location: LatLng,
    tooltip: Option<String>,
    icon: Option<Icon>,
    popup: Option<Node>,
}

impl Marker {
    /// Marker at `location`; fails unless it is exactly two finite numbers
    pub fn new(location: impl IntoLatLng) -> Result<Self> {
        Ok(Self {
            location: location.into_lat_lng()?,
            tooltip: None,
            icon: None,
            popup: None,
        })
    }

    /// Popup from text or a configured [`Popup`]
    pub fn popup(mut self, popup: impl Into<Popup>) -> Self {
        self.popup = Some(Node::from(popup.into()));
        self
    }

    /// Attach an arbitrary element as the marker's popup child
    pub fn popup_element(mut self, popup: impl Into<Node>) -> Self {
        self.popup = Some(popup.into());
        self
    }

    /// Text shown on hover
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn get_tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }
}

impl Element for Marker {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "marker"
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::from_point(self.location))
    }

    fn take_children(&mut self) -> Vec<Node> {
        self.icon
            .take()
            .map(Node::from)
            .into_iter()
            .chain(self.popup.take())
            .collect()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let name = ctx.name();
        let parent = ctx.parent_name()?;

        let location = to_string_spaced(&self.location.to_array())?;
        let tooltip = self.tooltip.as_deref().map(js_string).transpose()?;
        let script = MarkerTemplate {
            name,
            parent,
            location: &location,
            tooltip,
        }
        .render()?;
        ctx.script()?.add(name, script);

        ctx.render_children()
    }
}
