//! End-to-end link extraction through the public API.

use linkscan::{Error, LinkExtractor, extract_links, parse_html, parse_html_bytes};

const POST: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>A post</title>
    <link rel="stylesheet" href="/css/site.css">
    <link rel="webmention" href="https://webmention.example/endpoint">
    <link rel="icon" href="">
    <script src="/js/app.js"></script>
</head>
<body>
    <header><nav>
        <a href="/">Home</a>
        <a href="/archive/">Archive</a>
    </nav></header>
    <article class="h-entry">
        <p>Replying to <a class="u-in-reply-to" href="https://other.example/notes/1">a note</a>.</p>
        <blockquote cite="https://other.example/notes/1">Quoted text</blockquote>
        <img src="photo.jpg" alt="" data-src="lazy.jpg">
        <p style="background: url(bg.png)">CSS urls are not links</p>
        <a href="#comments">Comments</a>
    </article>
    <form action="/search"><input name="q"><button>Go</button></form>
</body>
</html>"##;

const POST_URL: &str = "https://blog.example/2024/01/post.html";

#[test]
fn test_post_links_in_document_order() {
    let links = extract_links(POST, POST_URL).expect("no base element to fail on");
    assert_eq!(
        links,
        [
            "https://blog.example/css/site.css",
            "https://webmention.example/endpoint",
            "https://blog.example/js/app.js",
            "https://blog.example/",
            "https://blog.example/archive/",
            "https://other.example/notes/1",
            "https://other.example/notes/1",
            "https://blog.example/2024/01/photo.jpg",
            "https://blog.example/2024/01/post.html#comments",
            "https://blog.example/search",
        ]
    );
}

#[test]
fn test_webmention_style_queries() {
    let dom = parse_html(POST);
    let extractor = LinkExtractor::for_document(&dom, POST_URL).unwrap();

    assert!(extractor.links_to("https://other.example/notes/1"));
    assert!(extractor.links_to("/archive/"));
    assert!(extractor.links_to("photo.jpg"));
    assert!(!extractor.links_to("lazy.jpg"));
    assert!(!extractor.links_to("bg.png"));
    assert!(!extractor.links_to("https://other.example/notes/2"));
}

#[test]
fn test_article_subtree_only() {
    let dom = parse_html(POST);
    let article = dom.find_by_tag("article").unwrap();
    let extractor = LinkExtractor::new(&dom, article, POST_URL).unwrap();

    let elements: Vec<_> = extractor
        .links()
        .iter()
        .map(|l| (l.element.as_str(), l.attribute.as_str()))
        .collect();
    assert_eq!(
        elements,
        [("a", "href"), ("blockquote", "cite"), ("img", "src"), ("a", "href")]
    );
    assert!(!extractor.links_to("/archive/"));
}

#[test]
fn test_base_scenario() {
    let html = r#"<html><head><base href="/a/"></head><body><a href="b.html">x</a><img src="c.png"></body></html>"#;
    let dom = parse_html(html);
    let extractor = LinkExtractor::for_document(&dom, "https://example.com/x/y").unwrap();

    assert_eq!(extractor.base_url(), "https://example.com/a/");
    assert_eq!(
        extractor.extract(),
        [
            "https://example.com/a/",
            "https://example.com/a/b.html",
            "https://example.com/a/c.png"
        ]
    );

    // Scanning only <body> leaves the <base> element itself out
    let body = dom.find_by_tag("body").unwrap();
    let body_links = LinkExtractor::new(&dom, body, "https://example.com/x/y").unwrap();
    assert_eq!(
        body_links.extract(),
        ["https://example.com/a/b.html", "https://example.com/a/c.png"]
    );
    assert!(extractor.links_to("https://example.com/a/b.html"));
    assert!(!extractor.links_to("https://example.com/x/b.html"));
}

#[test]
fn test_base_in_body_still_applies() {
    // <base> is searched for across the whole document, not just <head>
    let html = r#"<a href="first">x</a><div><base href="https://mirror.example/root/"></div>"#;
    let links = extract_links(html, "https://example.com/").unwrap();
    assert_eq!(
        links,
        ["https://mirror.example/root/first", "https://mirror.example/root/"]
    );
}

#[test]
fn test_base_outside_subtree_still_applies() {
    let html = r#"<head><base href="https://mirror.example/"></head><body><section><a href="p"></a></section></body>"#;
    let dom = parse_html(html);
    let section = dom.find_by_tag("section").unwrap();
    let extractor = LinkExtractor::new(&dom, section, "").unwrap();
    assert_eq!(extractor.extract(), ["https://mirror.example/p"]);
}

#[test]
fn test_malformed_base_is_the_only_error() {
    let html = r#"<base href="../up/"><a href="x"></a>"#;
    match extract_links(html, "not-absolute") {
        Err(Error::MalformedBaseUrl { href, .. }) => assert_eq!(href, "../up/"),
        other => panic!("expected MalformedBaseUrl, got {other:?}"),
    }

    // Bad individual links never fail extraction
    let links = extract_links(r#"<a href="https://[bad">x</a><a href="ok">y</a>"#, "https://e.example/")
        .unwrap();
    assert_eq!(links, ["https://[bad", "https://e.example/ok"]);
}

#[test]
fn test_non_links_are_ignored() {
    let html = r#"
        <p href="https://example.com">paragraph</p>
        <div src="x.png"></div>
        <img data-src="lazy.png">
        <object data=""></object>
        <video poster="" src="  "></video>
        <form action=" "></form>
        <html manifest="">
    "#;
    assert!(extract_links(html, "https://example.com/").unwrap().is_empty());
}

#[test]
fn test_whitespace_variants_resolve_identically() {
    let base = "https://example.com/";
    let plain = extract_links(r#"<a href="https://example.com/">x</a>"#, base).unwrap();
    for padded in [
        "<a href=\"  https://example.com/  \">x</a>",
        "<a href=\"\thttps://example.com/\n\">x</a>",
        "<a href=\"\r\n https://example.com/\u{c}\">x</a>",
    ] {
        assert_eq!(extract_links(padded, base).unwrap(), plain, "{padded:?}");
    }
}

#[test]
fn test_bytes_in_legacy_encoding() {
    let html = b"<meta charset=windows-1252><a href=\"/caf\xe9\">caf\xe9</a>";
    let dom = parse_html_bytes(html);
    let extractor = LinkExtractor::for_document(&dom, "https://example.com/").unwrap();
    assert_eq!(extractor.extract(), ["https://example.com/caf%C3%A9"]);
}
