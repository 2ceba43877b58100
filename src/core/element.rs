//! Generic building blocks: plain containers, HTML fragments and raw scripts

use crate::{core::json::escape_html, rendering::context::RenderContext, traits::Element, Result};
use askama::Template;

/// A plain node that renders its children and nothing else
#[derive(Debug, Clone, Default)]
pub struct Container;

impl Container {
    pub fn new() -> Self {
        Self
    }
}

impl Element for Container {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "element"
    }
}

#[derive(Template)]
#[template(
    source = r#"<div id="{{ name }}" style="width: {{ width }}; height: {{ height }};">{{ data }}</div>"#,
    ext = "txt",
    escape = "none"
)]
struct HtmlTemplate<'a> {
    name: &'a str,
    width: &'a str,
    height: &'a str,
    data: &'a str,
}

/// An HTML fragment wrapped in a sized `<div>`.
///
/// The text is HTML-escaped unless the element is created with
/// [`Html::raw`], in which case it is inserted verbatim as markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Html {
    data: String,
    escape: bool,
    width: String,
    height: String,
}

impl Html {
    /// Text content, escaped on render
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            escape: true,
            width: css_size(100.0, "%"),
            height: css_size(100.0, "%"),
        }
    }

    /// Pre-rendered markup, inserted as is
    pub fn raw(data: impl Into<String>) -> Self {
        Self {
            escape: false,
            ..Self::new(data)
        }
    }

    pub fn width(mut self, value: f64, unit: &str) -> Self {
        self.width = css_size(value, unit);
        self
    }

    pub fn height(mut self, value: f64, unit: &str) -> Self {
        self.height = css_size(value, unit);
        self
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_escaped(&self) -> bool {
        self.escape
    }
}

/// CSS size with the value always written as a float (`100.0%`, `400.0px`)
pub(crate) fn css_size(value: f64, unit: &str) -> String {
    format!("{value:?}{unit}")
}

impl Element for Html {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "html"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let data = if self.escape {
            escape_html(&self.data)
        } else {
            self.data.clone()
        };

        let markup = HtmlTemplate {
            name: ctx.name(),
            width: &self.width,
            height: &self.height,
            data: &data,
        }
        .render()?;

        Ok(markup)
    }
}

/// A raw script fragment, returned verbatim when rendered
#[derive(Debug, Clone, PartialEq)]
pub struct JavaScript {
    source: String,
}

impl JavaScript {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Element for JavaScript {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "javascript"
    }

    fn render(&self, _ctx: &mut RenderContext<'_>) -> Result<String> {
        Ok(self.source.clone())
    }
}
