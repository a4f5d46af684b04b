//! Link extraction and membership queries.
//!
//! A [`LinkExtractor`] fixes the effective base URL when it is built and
//! scans its subtree the first time links are requested. The scan result is
//! cached for the extractor's lifetime; the tree is borrowed immutably for
//! that whole time, so the cache can never go stale.

use std::sync::OnceLock;

use crate::catalog::{URL_ATTRIBUTE_NAMES, url_attribute};
use crate::dom::{Document, parse_html};
use crate::error::{Error, Result};
use crate::resolve::resolve;
use crate::tree::LinkTree;
use crate::util::strip_html_whitespace;

/// A URL-valued attribute found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The absolute URL, or `raw` if it could not be resolved.
    pub url: String,
    /// The attribute value with surrounding whitespace stripped.
    pub raw: String,
    /// Attribute the value came from, e.g. `src`.
    pub attribute: String,
    /// Element carrying the attribute, e.g. `img`.
    pub element: String,
    /// Whether `url` is the result of resolving `raw`.
    pub resolved: bool,
}

/// Extracts the resolved outbound links of a document or subtree.
///
/// # Example
///
/// ```
/// use linkscan::{LinkExtractor, parse_html};
///
/// let dom = parse_html(r#"<base href="/a/"><a href="b.html">x</a><img src="c.png">"#);
/// let links = LinkExtractor::for_document(&dom, "https://example.com/x/y").unwrap();
///
/// assert_eq!(links.base_url(), "https://example.com/a/");
/// // `<base href>` is itself a URL-valued attribute, so it is listed too
/// assert_eq!(
///     links.extract(),
///     [
///         "https://example.com/a/",
///         "https://example.com/a/b.html",
///         "https://example.com/a/c.png"
///     ]
/// );
/// assert!(links.links_to("https://example.com/a/b.html"));
/// assert!(!links.links_to("https://example.com/x/b.html"));
/// ```
pub struct LinkExtractor<'a, T: LinkTree = Document> {
    tree: &'a T,
    root: T::NodeId,
    base_url: String,
    links: OnceLock<Vec<Link>>,
}

impl<'a, T: LinkTree> LinkExtractor<'a, T> {
    /// Create an extractor for the subtree at `root`.
    ///
    /// The effective base URL is `document_url`, unless the owning document
    /// contains a `<base href>`. The first such element anywhere in the
    /// document wins, even when `root` is a subtree that does not contain
    /// it; its stripped href is resolved against `document_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBaseUrl`] if the `<base href>` cannot be
    /// resolved against `document_url`. Without a `<base>` element,
    /// `document_url` is taken as is and never rejected.
    pub fn new(tree: &'a T, root: T::NodeId, document_url: &str) -> Result<Self> {
        let document = if tree.is_document(root) {
            root
        } else {
            tree.owner_document(root)
        };
        let base_url = effective_base_url(tree, document, document_url)?;

        Ok(Self {
            tree,
            root,
            base_url,
            links: OnceLock::new(),
        })
    }

    /// The base URL every link is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The node the scan starts at.
    pub fn root(&self) -> T::NodeId {
        self.root
    }

    /// All links under the root, in document order, with their provenance.
    ///
    /// The subtree is scanned on the first call only.
    pub fn links(&self) -> &[Link] {
        self.links.get_or_init(|| self.scan())
    }

    /// The resolved URLs of all links under the root, in document order.
    ///
    /// Duplicates are kept, one entry per occurrence. Values that cannot be
    /// resolved appear as written, minus surrounding whitespace.
    pub fn extract(&self) -> Vec<&str> {
        self.links().iter().map(|link| link.url.as_str()).collect()
    }

    /// Check whether the root links to `url`.
    ///
    /// `url` is resolved against the same base as the extracted links (and
    /// used verbatim if that fails) before comparing strings.
    pub fn links_to(&self, url: &str) -> bool {
        let target = resolve(url, &self.base_url).unwrap_or_else(|_| url.to_string());
        self.links().iter().any(|link| link.url == target)
    }

    fn scan(&self) -> Vec<Link> {
        let occurrences = self
            .tree
            .attribute_occurrences(self.root, URL_ATTRIBUTE_NAMES);
        let mut links = Vec::with_capacity(occurrences.len());

        for occurrence in occurrences {
            let Some(policy) = url_attribute(occurrence.name, occurrence.element) else {
                log::trace!(
                    "ignoring {} on <{}>: not a URL attribute there",
                    occurrence.name,
                    occurrence.element
                );
                continue;
            };

            let raw = strip_html_whitespace(occurrence.value);
            if !policy.admits(raw) {
                log::trace!(
                    "ignoring empty {} on <{}>",
                    occurrence.name,
                    occurrence.element
                );
                continue;
            }

            let (url, resolved) = match resolve(raw, &self.base_url) {
                Ok(url) => (url, true),
                Err(err) => {
                    log::debug!("{err}; keeping the raw value");
                    (raw.to_string(), false)
                }
            };

            links.push(Link {
                url,
                raw: raw.to_string(),
                attribute: occurrence.name.to_string(),
                element: occurrence.element.to_string(),
                resolved,
            });
        }

        log::debug!("extracted {} links against {:?}", links.len(), self.base_url);
        links
    }
}

impl<'a> LinkExtractor<'a, Document> {
    /// Create an extractor for a whole parsed document.
    pub fn for_document(dom: &'a Document, document_url: &str) -> Result<Self> {
        Self::new(dom, dom.document(), document_url)
    }
}

/// Determine the base URL for `document`, honouring the first `<base href>`.
fn effective_base_url<T: LinkTree>(
    tree: &T,
    document: T::NodeId,
    document_url: &str,
) -> Result<String> {
    let Some(href) = tree.first_attribute(document, "base", "href") else {
        return Ok(document_url.to_string());
    };

    let href = strip_html_whitespace(href);
    match resolve(href, document_url) {
        Ok(base) => {
            log::debug!("<base href={href:?}> overrides document URL {document_url:?} with {base:?}");
            Ok(base)
        }
        Err(Error::UnresolvableLink { source, .. }) | Err(Error::MalformedBaseUrl { source, .. }) => {
            Err(Error::MalformedBaseUrl {
                href: href.to_string(),
                source,
            })
        }
    }
}

/// Parse `html` and return the resolved URLs of all its links.
///
/// Shorthand for [`parse_html`] followed by [`LinkExtractor::extract`].
///
/// ```
/// let links = linkscan::extract_links(
///     r#"<a href="/about">About</a> <p href="/nope">"#,
///     "https://example.com/blog/",
/// )
/// .unwrap();
/// assert_eq!(links, ["https://example.com/about"]);
/// ```
pub fn extract_links(html: &str, document_url: &str) -> Result<Vec<String>> {
    let dom = parse_html(html);
    let extractor = LinkExtractor::for_document(&dom, document_url)?;
    Ok(extractor.extract().into_iter().map(String::from).collect())
}
