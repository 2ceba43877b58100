//! Shared trait abstractions for map elements
//!
//! Every object that can live in an [`ElementTree`](crate::ElementTree)
//! implements [`Element`]. Optional capabilities (being listed by a layer
//! control, contributing bounds, acting as the document root) are exposed as
//! trait methods with neutral defaults rather than through a type hierarchy.

use crate::{
    core::{geo::LatLngBounds, tree::Node},
    layers::base::Layer,
    rendering::context::RenderContext,
    Result,
};

/// A renderable node of a map document
pub trait Element: std::fmt::Debug + Send + Sync + 'static {
    /// Snake-case kind used to build the generated identifier (`marker` -> `marker_3`)
    fn kind(&self) -> &'static str;

    /// Render the element.
    ///
    /// Script-emitting elements push their fragment into the document buffers
    /// held by `ctx` and return an empty string; markup elements return their
    /// markup. The default renders the children in insertion order and
    /// concatenates whatever they return.
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        ctx.render_children()
    }

    /// Layer-control properties, if this element can be toggled by a `LayerControl`
    fn layer(&self) -> Option<&Layer> {
        None
    }

    /// Bounds of the element itself, children excluded
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Whether the element is a document root exposing the output buffers
    fn is_document(&self) -> bool {
        false
    }

    /// Hand over the child nodes built alongside this element.
    ///
    /// Called once when the element is turned into a [`Node`].
    fn take_children(&mut self) -> Vec<Node> {
        Vec::new()
    }

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
