//! Reference resolution against a base URL, as defined by RFC 3986 section 5.
//!
//! [`resolve`] never falls back on its own. Callers decide what a failure
//! means: the extractor treats a bad base URL as fatal and a bad link as
//! something to keep verbatim.
//!
//! Resolution does not normalise. Scheme and host case, default ports and
//! percent-encoding case are kept exactly as written; only dot segments are
//! removed.

use std::borrow::Cow;

use fluent_uri::{Uri, UriRef};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::{Error, Result, UriError};

/// ASCII that attribute values may carry but a URI reference may not.
/// Non-ASCII is always percent-encoded as UTF-8 (the RFC 3987 IRI mapping).
const NOT_IN_URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Scheme lent to an absolute-path base so it can be used as an RFC 3986
/// base URI. Stripped again from the result.
const RELATIVE_BASE_SCHEME: &str = "linkscan-relative:";

/// Resolve `reference` against `base`.
///
/// A reference with a scheme does not depend on the base and resolves even
/// when `base` is empty or invalid. Otherwise `base` must be an absolute
/// URI, or an absolute-path (`/docs/`) or network-path (`//host/docs/`)
/// reference, in which case the result is relative in the same way.
///
/// # Examples
///
/// ```
/// use linkscan::resolve;
///
/// assert_eq!(
///     resolve("../c.png", "https://example.com/a/b/").unwrap(),
///     "https://example.com/a/c.png"
/// );
/// assert_eq!(
///     resolve("mailto:me@example.com", "").unwrap(),
///     "mailto:me@example.com"
/// );
/// assert_eq!(resolve("b.html", "/a/").unwrap(), "/a/b.html");
/// assert!(resolve("c.png", "not a url").is_err());
/// ```
pub fn resolve(reference: &str, base: &str) -> Result<String> {
    let unresolvable = |source| Error::UnresolvableLink {
        reference: reference.to_string(),
        source,
    };

    let encoded = encode(reference);
    let target =
        UriRef::parse(&*encoded).map_err(|_| unresolvable(UriError::InvalidReference))?;

    if let Ok(absolute) = Uri::parse(without_fragment(&encoded)) {
        // Only dot-segment removal applies to a reference with a scheme
        return target
            .resolve_against(&absolute)
            .map(|uri| uri.as_str().to_string())
            .map_err(|err| unresolvable(UriError::Resolution(err.to_string())));
    }

    let (base, relative) = base_uri(base).map_err(unresolvable)?;
    let base = Uri::parse(&*base).map_err(|_| unresolvable(UriError::InvalidBase))?;
    let resolved = target
        .resolve_against(&base)
        .map_err(|err| unresolvable(UriError::Resolution(err.to_string())))?;

    let resolved = resolved.as_str();
    Ok(match resolved.strip_prefix(RELATIVE_BASE_SCHEME) {
        Some(rest) if relative => rest.to_string(),
        _ => resolved.to_string(),
    })
}

fn encode(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, NOT_IN_URI).into()
}

fn without_fragment(uri: &str) -> &str {
    uri.split_once('#').map_or(uri, |(before, _)| before)
}

/// Turn `base` into something [`Uri::parse`] accepts. The flag is set when
/// the placeholder scheme was added.
fn base_uri(base: &str) -> std::result::Result<(Cow<'_, str>, bool), UriError> {
    // The base fragment never reaches the result
    let base = without_fragment(base);
    if base.is_empty() {
        return Err(UriError::MissingBase);
    }

    let base = encode(base);
    if Uri::parse(&*base).is_ok() {
        return Ok((base, false));
    }
    if base.starts_with('/') && UriRef::parse(&*base).is_ok() {
        return Ok((Cow::Owned(format!("{RELATIVE_BASE_SCHEME}{base}")), true));
    }
    Err(UriError::InvalidBase)
}
