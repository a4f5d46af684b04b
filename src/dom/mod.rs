//! HTML parsing into an arena DOM.
//!
//! # Example
//!
//! ```
//! use linkscan::dom::parse_html;
//!
//! let dom = parse_html("<p>Hello, <a href='/world'>World</a></p>");
//! let a = dom.find_by_tag("a").unwrap();
//! assert_eq!(dom.get_attr(a, "href"), Some("/world"));
//! ```

mod arena;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Descendants, Document, Node, NodeData, NodeId};
pub use tree_sink::{ArenaSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document.
///
/// Parsing never fails: malformed markup is recovered the way browsers
/// recover it, and missing `html`/`head`/`body` elements are implied.
pub fn parse_html(html: &str) -> Document {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse HTML bytes in an unknown encoding.
///
/// Valid UTF-8 is used as is. Otherwise the encoding declared by
/// `<meta charset>` or an XML declaration is tried, then Windows-1252.
pub fn parse_html_bytes(html: &[u8]) -> Document {
    let hint_encoding = crate::util::extract_encoding_hint(html);
    let html_str = crate::util::decode_text(html, hint_encoding);
    parse_html(&html_str)
}
