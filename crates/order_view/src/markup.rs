use std::borrow::Cow;

/// Decides how interpolated text reaches the serialized markup.
pub trait EscapePolicy {
    fn text<'a>(&self, raw: &'a str) -> Cow<'a, str>;
    fn attribute<'a>(&self, raw: &'a str) -> Cow<'a, str>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl EscapePolicy for Verbatim {
    fn text<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(raw)
    }

    fn attribute<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(raw)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscape;

impl EscapePolicy for HtmlEscape {
    fn text<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        escape(raw, &['&', '<', '>'])
    }

    fn attribute<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        escape(raw, &['&', '<', '>', '"', '\''])
    }
}

fn escape<'a>(raw: &'a str, special: &[char]) -> Cow<'a, str> {
    if !raw.contains(special) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' if special.contains(&ch) => escaped.push_str("&amp;"),
            '<' if special.contains(&ch) => escaped.push_str("&lt;"),
            '>' if special.contains(&ch) => escaped.push_str("&gt;"),
            '"' if special.contains(&ch) => escaped.push_str("&quot;"),
            '\'' if special.contains(&ch) => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn class(self, value: &'static str) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    pub fn render(&self) -> String {
        self.render_with(&Verbatim)
    }

    pub fn render_with(&self, policy: &dyn EscapePolicy) -> String {
        let mut out = String::new();
        self.write_to(&mut out, policy);
        out
    }

    fn write_to(&self, out: &mut String, policy: &dyn EscapePolicy) {
        match self {
            Self::Text(text) => out.push_str(&policy.text(text)),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&policy.attribute(value));
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_to(out, policy);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Element::new("td")
            .attr("title", "a\"b")
            .text("<b>bold</b> & co")
            .into()
    }

    #[test]
    fn verbatim_inserts_values_unchanged() {
        assert_eq!(
            sample().render(),
            "<td title=\"a\"b\"><b>bold</b> & co</td>"
        );
    }

    #[test]
    fn html_escape_is_swappable() {
        assert_eq!(
            sample().render_with(&HtmlEscape),
            "<td title=\"a&quot;b\">&lt;b&gt;bold&lt;/b&gt; &amp; co</td>"
        );
    }

    #[test]
    fn nested_children_keep_order() {
        let row: Node = Element::new("tr")
            .children(["x", "y"].map(|cell| Element::new("td").text(cell)))
            .into();
        assert_eq!(row.render(), "<tr><td>x</td><td>y</td></tr>");
    }
}
