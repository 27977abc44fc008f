use crate::error::ScrapeError;
use scraper::{ElementRef, Html};
use std::fmt;

/// Tag name of the line-break marker
pub const LINE_BREAK_TAG: &str = "br";

/// A materialized element of a rendered page
///
/// Pages are converted into a tree of these once, after which every lookup
/// runs against plain data and no browser handle is needed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageElement {
    /// Lower-case tag name
    pub tag: String,

    /// Rendered text of the element and all its descendants, whitespace-normalized
    pub text: String,

    /// Text of the direct text-node children only
    pub own_text: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order
    pub children: Vec<PageElement>,
}

/// Lookup criteria for elements in a page tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Element with the given `id` attribute
    Id(String),
    /// Element with the given tag name
    Tag(String),
    /// Element carrying the given class
    Class(String),
    /// Element whose own text contains the given string
    OwnTextContains(String),
}

impl Query {
    pub fn id(id: &str) -> Self {
        Query::Id(id.to_string())
    }

    pub fn tag(tag: &str) -> Self {
        Query::Tag(tag.to_string())
    }

    pub fn class(class: &str) -> Self {
        Query::Class(class.to_string())
    }

    pub fn own_text_contains(needle: &str) -> Self {
        Query::OwnTextContains(needle.to_string())
    }

    /// Returns true if the element satisfies this query
    pub fn matches(&self, element: &PageElement) -> bool {
        match self {
            Query::Id(id) => element.attr("id") == Some(id.as_str()),
            Query::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Query::Class(class) => element
                .attr("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
            Query::OwnTextContains(needle) => element.own_text.contains(needle.as_str()),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Id(id) => write!(f, "//*[@id='{id}']"),
            Query::Tag(tag) => write!(f, "//{tag}"),
            Query::Class(class) => write!(f, "//*[contains(@class, '{class}')]"),
            Query::OwnTextContains(needle) => write!(f, "//*[contains(text(), '{needle}')]"),
        }
    }
}

impl PageElement {
    /// Creates an element with the given tag and text and no children
    pub fn new(tag: &str, text: &str) -> Self {
        let text = normalize_whitespace(text);
        Self {
            tag: tag.to_ascii_lowercase(),
            own_text: text.clone(),
            text,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a line-break marker
    pub fn line_break() -> Self {
        Self::new(LINE_BREAK_TAG, "")
    }

    /// Adds an attribute
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends children and extends the rendered text with theirs, laid out
    /// the same way as text read from HTML
    pub fn with_children(mut self, children: impl IntoIterator<Item = PageElement>) -> Self {
        let mut text = TextBuilder::default();
        text.push_rendered(&self.text);
        for child in children {
            text.push_child(&child);
            self.children.push(child);
        }
        self.text = text.finish();
        self
    }

    /// Parses a full HTML document and returns its root (`html`) element
    pub fn parse_document(html: &str) -> Self {
        let doc = Html::parse_document(html);
        Self::from_element(doc.root_element())
    }

    /// Converts a `scraper` element and its subtree
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let own_text = element
            .children()
            .filter_map(|node| node.value().as_text().map(|t| &**t))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            tag: element.value().name().to_ascii_lowercase(),
            text: rendered_text(element),
            own_text: normalize_whitespace(&own_text),
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            children: element
                .children()
                .filter_map(ElementRef::wrap)
                .map(Self::from_element)
                .collect(),
        }
    }

    /// Returns the value of the named attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_line_break(&self) -> bool {
        self.tag == LINE_BREAK_TAG
    }

    /// Finds the first descendant matching the query, in document order
    pub fn find(&self, query: &Query) -> Result<&PageElement, ScrapeError> {
        self.find_first(query)
            .ok_or_else(|| ScrapeError::not_found(query))
    }

    fn find_first(&self, query: &Query) -> Option<&PageElement> {
        self.children.iter().find_map(|child| {
            if query.matches(child) {
                Some(child)
            } else {
                child.find_first(query)
            }
        })
    }

    /// Finds every descendant matching the query, in document order
    pub fn find_all(&self, query: &Query) -> Vec<&PageElement> {
        let mut found = Vec::new();
        self.collect_matching(query, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, query: &Query, found: &mut Vec<&'a PageElement>) {
        for child in &self.children {
            if query.matches(child) {
                found.push(child);
            }
            child.collect_matching(query, found);
        }
    }

    /// Returns the siblings that follow the first descendant matching the query
    pub fn following_siblings(&self, query: &Query) -> Option<&[PageElement]> {
        for (i, child) in self.children.iter().enumerate() {
            if query.matches(child) {
                return Some(&self.children[i + 1..]);
            }
            if let Some(siblings) = child.following_siblings(query) {
                return Some(siblings);
            }
        }
        None
    }

    /// Walks a positional path of `(tag, index)` steps, where `index` counts
    /// only children with that tag (0-based)
    pub fn at_path(&self, steps: &[(&str, usize)]) -> Option<&PageElement> {
        steps.iter().try_fold(self, |element, (tag, index)| {
            element
                .children
                .iter()
                .filter(|child| child.tag.eq_ignore_ascii_case(tag))
                .nth(*index)
        })
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How an element's content takes part in the rendered text of its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextLayout {
    /// Not rendered at all
    Hidden,
    /// Forces a new line
    LineBreak,
    /// Starts and ends on its own line
    Block,
    /// Separated from its neighbours by a space
    Cell,
    Inline,
}

const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "fieldset",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tbody", "tfoot", "thead", "tr", "ul",
];

fn text_layout(tag: &str) -> TextLayout {
    if tag == LINE_BREAK_TAG {
        TextLayout::LineBreak
    } else if HIDDEN_TAGS.contains(&tag) {
        TextLayout::Hidden
    } else if BLOCK_TAGS.contains(&tag) {
        TextLayout::Block
    } else if tag == "td" || tag == "th" {
        TextLayout::Cell
    } else {
        TextLayout::Inline
    }
}

/// Text of an element's content as a browser renders it: one line per
/// `<br>` or block, horizontal whitespace collapsed within each line
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut text = TextBuilder::default();
    if text_layout(element.value().name()) != TextLayout::Hidden {
        render_children(element, &mut text);
    }
    text.finish()
}

fn render_children(element: ElementRef<'_>, text: &mut TextBuilder) {
    for node in element.children() {
        if let Some(raw) = node.value().as_text() {
            text.push_raw(raw);
        } else if let Some(child) = ElementRef::wrap(node) {
            match text_layout(child.value().name()) {
                TextLayout::Hidden => {}
                TextLayout::LineBreak => text.line_break(),
                TextLayout::Block => {
                    text.block_boundary();
                    render_children(child, text);
                    text.block_boundary();
                }
                TextLayout::Cell => {
                    text.cell_boundary();
                    render_children(child, text);
                    text.cell_boundary();
                }
                TextLayout::Inline => render_children(child, text),
            }
        }
    }
}

/// Accumulates rendered text, `\n` separating lines
#[derive(Debug, Default)]
struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    /// Source text: newlines and tabs in HTML are plain whitespace
    fn push_raw(&mut self, raw: &str) {
        self.buf
            .extend(raw.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
    }

    /// Text that is already laid out into lines
    fn push_rendered(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn push_child(&mut self, child: &PageElement) {
        match text_layout(&child.tag) {
            TextLayout::Hidden => {}
            TextLayout::LineBreak => self.line_break(),
            TextLayout::Block => {
                self.block_boundary();
                self.push_rendered(&child.text);
                self.block_boundary();
            }
            TextLayout::Cell => {
                self.cell_boundary();
                self.push_rendered(&child.text);
                self.cell_boundary();
            }
            TextLayout::Inline => self.push_rendered(&child.text),
        }
    }

    fn line_break(&mut self) {
        self.trim_trailing_spaces();
        self.buf.push('\n');
    }

    /// Ends the current line unless it is already empty
    fn block_boundary(&mut self) {
        self.trim_trailing_spaces();
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    fn cell_boundary(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with([' ', '\n']) {
            self.buf.push(' ');
        }
    }

    fn trim_trailing_spaces(&mut self) {
        let len = self.buf.trim_end_matches(' ').len();
        self.buf.truncate(len);
    }

    fn finish(self) -> String {
        self.buf
            .lines()
            .map(normalize_whitespace)
            .collect::<Vec<_>>()
            .join("\n")
            .trim_matches('\n')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"
        <html><body>
            <div id="top">
                <span class="name discriminator">#42</span>
                <div>Hello <b>there</b></div>
            </div>
            <div><h2>Medals</h2><span>Easy</span><br><span>Scores</span></div>
        </body></html>"#;

    #[test]
    fn test_parse_document() {
        let root = PageElement::parse_document(PROFILE_HTML);
        assert_eq!(root.tag, "html");

        let bio = root.at_path(&[("body", 0), ("div", 0), ("div", 0)]).unwrap();
        assert_eq!(bio.text, "Hello there");
        assert_eq!(bio.own_text, "Hello");
    }

    #[test]
    fn test_find_queries() {
        let root = PageElement::parse_document(PROFILE_HTML);

        assert_eq!(root.find(&Query::id("top")).unwrap().tag, "div");
        assert_eq!(root.find(&Query::class("discriminator")).unwrap().text, "#42");
        assert_eq!(root.find_all(&Query::tag("span")).len(), 3);

        let err = root.find(&Query::class("missing")).unwrap_err();
        assert!(matches!(err, ScrapeError::ElementNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "no element matching //*[contains(@class, 'missing')]"
        );
    }

    #[test]
    fn test_following_siblings() {
        let root = PageElement::parse_document(PROFILE_HTML);

        let siblings = root
            .following_siblings(&Query::own_text_contains("Medals"))
            .unwrap();
        let tags: Vec<_> = siblings.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["span", "br", "span"]);

        assert!(root
            .following_siblings(&Query::own_text_contains("Trophies"))
            .is_none());
    }

    #[test]
    fn test_at_path_out_of_range() {
        let root = PageElement::parse_document(PROFILE_HTML);
        assert!(root.at_path(&[("body", 0), ("div", 5)]).is_none());
        assert!(root.at_path(&[("head", 0)]).is_some());
    }

    #[test]
    fn test_rendered_text_lines() {
        let root = PageElement::parse_document(
            "<html><body><div>First   line<br>Second line<p>Para</p></div></body></html>",
        );
        let div = root.find(&Query::tag("div")).unwrap();
        assert_eq!(div.text, "First line\nSecond line\nPara");
        assert_eq!(div.own_text, "First line Second line");
    }

    #[test]
    fn test_rendered_text_blocks_and_hidden() {
        let root = PageElement::parse_document(
            r#"<html><head><title>Profile</title></head><body><div>
                <div>a</div>
                <div>b <script>var x = 1;</script><style>p {}</style>c</div>
            </div></body></html>"#,
        );
        let outer = root.find(&Query::tag("div")).unwrap();
        assert_eq!(outer.text, "a\nb c");
        assert_eq!(root.text, "a\nb c");
        assert_eq!(root.find(&Query::tag("script")).unwrap().text, "");
    }

    #[test]
    fn test_rendered_table_row() {
        let root = PageElement::parse_document(
            "<html><body><table><tr><td>1.</td><td>Ada</td></tr><tr><td>2.</td></tr></table></body></html>",
        );
        let table = root.find(&Query::tag("table")).unwrap();
        assert_eq!(table.text, "1. Ada\n2.");
    }

    #[test]
    fn test_builder_matches_parsed_text() {
        let parsed = PageElement::parse_document(
            "<html><body><div>First line<br>Second<b>line</b><p>Para</p></div></body></html>",
        );
        let built = PageElement::new("div", "First line").with_children([
            PageElement::line_break(),
            PageElement::new("span", "Second"),
            PageElement::new("b", "line"),
            PageElement::new("p", "Para"),
        ]);
        assert_eq!(built.text, "First line\nSecondline\nPara");
        assert_eq!(parsed.find(&Query::tag("div")).unwrap().text, built.text);
    }

    #[test]
    fn test_builder() {
        let row = PageElement::new("tr", "")
            .with_children([PageElement::new("td", " 1st "), PageElement::new("td", "")]);
        assert_eq!(row.text, "1st");
        assert_eq!(row.children[0].text, "1st");

        let link = PageElement::new("a", "Ada").with_attr("HREF", "/p1");
        assert_eq!(link.attr("href"), Some("/p1"));
        assert!(PageElement::line_break().is_line_break());
    }
}
