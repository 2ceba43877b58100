//! The document root

use crate::{
    core::json::escape_html, rendering::context::RenderContext, traits::Element, Result,
};
use askama::Template;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<head>
    <meta http-equiv="content-type" content="text/html; charset=UTF-8" />
{%- match title %}{% when Some with (title) %}
    <title>{{ title }}</title>
{%- when None %}{% endmatch %}
{{ header }}
</head>
<body>
{{ html }}
</body>
<script>
{{ script }}
</script>
"#,
    ext = "txt",
    escape = "none"
)]
struct FigureTemplate {
    title: Option<String>,
    header: String,
    html: String,
    script: String,
}

/// Root of a map document.
///
/// Elements below a figure push their header entries, body markup and script
/// fragments into the figure's buffers while rendering; the figure then lays
/// them out as a standalone HTML page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    title: Option<String>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page title, escaped on render
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Element for Figure {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "figure"
    }

    fn is_document(&self) -> bool {
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let tree = ctx.tree();
        #[cfg(feature = "debug")]
        let name = ctx.name();
        for (_, child) in tree.children(ctx.node()) {
            let markup = ctx.render_node(child)?;
            if !markup.is_empty() {
                ctx.html()?.add(tree.name(child), markup);
            }
        }

        let buffers = ctx.buffers()?;
        let page = FigureTemplate {
            title: self.title.as_deref().map(escape_html),
            header: buffers.header.render(),
            html: buffers.html.render(),
            script: buffers.script.render(),
        }
        .render()?;

        #[cfg(feature = "debug")]
        log::debug!(
            "Rendered {}: {} header entries, {} script fragments",
            name,
            buffers.header.len(),
            buffers.script.len()
        );

        Ok(page)
    }
}
