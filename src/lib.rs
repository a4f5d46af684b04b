//! # linkscan
//!
//! Find the resources an HTML document links to, resolved to absolute URLs.
//!
//! A "link" is any attribute HTML5 defines as holding a URL on the element
//! it appears on: `href` on `a`, `src` on `img`, `cite` on `blockquote`,
//! `poster` on `video`, and so on (see [`catalog`]). Values are stripped of
//! surrounding whitespace and resolved against the document's base URL,
//! which an in-document `<base href>` overrides.
//!
//! Nothing is fetched. This is the building block for webmention senders,
//! link checkers and similar tools that need a document's outbound links
//! without re-implementing the HTML5 rules.
//!
//! ## Quick Start
//!
//! ```
//! use linkscan::{LinkExtractor, parse_html};
//!
//! let dom = parse_html(r#"
//!     <html><head><base href="/a/"></head>
//!     <body><a href="b.html">x</a><img src="c.png"><p href="ignored"></p></body></html>
//! "#);
//!
//! let links = LinkExtractor::for_document(&dom, "https://example.com/x/y")?;
//! assert_eq!(
//!     links.extract(),
//!     [
//!         "https://example.com/a/",
//!         "https://example.com/a/b.html",
//!         "https://example.com/a/c.png"
//!     ]
//! );
//! assert!(links.links_to("https://example.com/a/b.html"));
//! # Ok::<(), linkscan::Error>(())
//! ```
//!
//! ## Subtrees
//!
//! Any node can be the scan root. The base URL still comes from the whole
//! document:
//!
//! ```
//! use linkscan::{LinkExtractor, parse_html};
//!
//! let dom = parse_html(r#"<base href="https://cdn.example/"><nav><a href="skip"></a></nav>
//!     <article><img src="pic.png"></article>"#);
//! let article = dom.find_by_tag("article").unwrap();
//!
//! let links = LinkExtractor::new(&dom, article, "https://example.com/")?;
//! assert_eq!(links.extract(), ["https://cdn.example/pic.png"]);
//! # Ok::<(), linkscan::Error>(())
//! ```

pub mod catalog;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod resolve;
pub mod tree;
pub(crate) mod util;

pub use catalog::{EmptyPolicy, url_attribute};
pub use dom::{Document, NodeId, parse_html, parse_html_bytes};
pub use error::{Error, Result, UriError};
pub use extractor::{Link, LinkExtractor, extract_links};
pub use resolve::resolve;
pub use tree::{AttributeOccurrence, LinkTree};
pub use util::strip_html_whitespace;
