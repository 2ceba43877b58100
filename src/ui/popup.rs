use crate::{
    core::{
        constants::DEFAULT_POPUP_MAX_WIDTH,
        element::{Container, Html},
        tree::Node,
    },
    rendering::context::RenderContext,
    traits::Element,
    Result,
};
use askama::Template;

/// Keys of the three slot containers a popup partitions its content into
const HEADER_SLOT: &str = "header";
const HTML_SLOT: &str = "html";
const SCRIPT_SLOT: &str = "script";

struct ContentLine {
    name: String,
    markup: String,
}

#[derive(Template)]
#[template(
    source = r#"
    var {{ name }} = L.popup({maxWidth: '{{ max_width }}'});
{% for line in contents %}
    var {{ line.name }} = $('{{ line.markup }}')[0];
    {{ name }}.setContent({{ line.name }});
{% endfor %}
    {{ parent }}.bindPopup({{ name }});
{% for script in scripts %}
    {{ script }}
{%- endfor %}"#,
    ext = "txt",
    escape = "none"
)]
struct PopupTemplate<'a> {
    name: &'a str,
    parent: &'a str,
    max_width: u32,
    contents: Vec<ContentLine>,
    scripts: Vec<String>,
}

/// What a popup shows
#[derive(Debug)]
pub enum PopupContent {
    /// Text wrapped in an [`Html`] fragment
    Text(String),
    /// Any element, attached as is
    Element(Node),
}

impl From<&str> for PopupContent {
    fn from(text: &str) -> Self {
        PopupContent::Text(text.to_string())
    }
}

impl From<String> for PopupContent {
    fn from(text: String) -> Self {
        PopupContent::Text(text)
    }
}

impl From<Node> for PopupContent {
    fn from(node: Node) -> Self {
        PopupContent::Element(node)
    }
}

/// A content bubble bound to its parent feature.
///
/// The content lives in three child containers: `html` (set as the popup
/// content), `script` (run once the popup is bound) and `header` (added to
/// the document header). Rendering requires a document root.
#[derive(Debug)]
pub struct Popup {
    content: Option<PopupContent>,
    parse_html: bool,
    max_width: u32,
    header: Vec<Node>,
    scripts: Vec<Node>,
}

impl Default for Popup {
    fn default() -> Self {
        Self {
            content: None,
            parse_html: false,
            max_width: DEFAULT_POPUP_MAX_WIDTH,
            header: Vec::new(),
            scripts: Vec::new(),
        }
    }
}

impl Popup {
    pub fn new(content: impl Into<PopupContent>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Treat text content as markup instead of escaping it
    pub fn parse_html(mut self, parse_html: bool) -> Self {
        self.parse_html = parse_html;
        self
    }

    /// Maximum popup width in pixels
    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Script rendered after the popup is bound to its parent
    pub fn with_script(mut self, script: impl Into<Node>) -> Self {
        self.scripts.push(script.into());
        self
    }

    /// Element rendered into the document header
    pub fn with_header(mut self, header: impl Into<Node>) -> Self {
        self.header.push(header.into());
        self
    }

    pub fn get_max_width(&self) -> u32 {
        self.max_width
    }
}

impl From<&str> for Popup {
    fn from(text: &str) -> Self {
        Popup::new(text)
    }
}

impl From<String> for Popup {
    fn from(text: String) -> Self {
        Popup::new(text)
    }
}

fn slot(children: Vec<Node>) -> Node {
    children
        .into_iter()
        .fold(Node::from(Container::new()), |slot, child| slot.with_child(child))
}

impl Element for Popup {
    crate::impl_element_any!();

    fn kind(&self) -> &'static str {
        "popup"
    }

    fn take_children(&mut self) -> Vec<Node> {
        let html = match self.content.take() {
            Some(PopupContent::Text(text)) if self.parse_html => vec![Node::from(Html::raw(text))],
            Some(PopupContent::Text(text)) => vec![Node::from(Html::new(text))],
            Some(PopupContent::Element(node)) => vec![node],
            None => Vec::new(),
        };

        vec![
            slot(std::mem::take(&mut self.header)).keyed(HEADER_SLOT),
            slot(html).keyed(HTML_SLOT),
            slot(std::mem::take(&mut self.scripts)).keyed(SCRIPT_SLOT),
        ]
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let tree = ctx.tree();
        let node = ctx.node();
        let name = ctx.name();

        for (key, child) in tree.children(node) {
            if ![HEADER_SLOT, HTML_SLOT, SCRIPT_SLOT].contains(&key) {
                ctx.render_node(child)?;
            }
        }

        ctx.buffers()?;
        let parent = ctx.parent_name()?;

        let mut contents = Vec::new();
        if let Some(html) = tree.child(node, HTML_SLOT) {
            for (_, child) in tree.children(html) {
                let markup = ctx.render_node(child)?;
                contents.push(ContentLine {
                    name: tree.name(child).to_string(),
                    markup: single_quoted(&markup),
                });
            }
        }

        let mut scripts = Vec::new();
        if let Some(script) = tree.child(node, SCRIPT_SLOT) {
            for (_, child) in tree.children(script) {
                scripts.push(ctx.render_node(child)?);
            }
        }

        if let Some(header) = tree.child(node, HEADER_SLOT) {
            for (_, child) in tree.children(header) {
                let markup = ctx.render_node(child)?;
                ctx.header()?.add(tree.name(child), markup);
            }
        }

        let script = PopupTemplate {
            name,
            parent,
            max_width: self.max_width,
            contents,
            scripts,
        }
        .render()?;
        ctx.script()?.add(name, script);

        Ok(String::new())
    }
}

/// Fit markup into a single-quoted, single-line script string
fn single_quoted(markup: &str) -> String {
    markup
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', " ")
}
