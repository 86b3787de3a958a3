// src/scan/html.rs
// =============================================================================
// This module extracts same-site links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser)
// - Never fails: broken markup is repaired the way a browser would
//
// Every element in the document is inspected, whatever its tag: <a href>,
// <img src>, <link href>, <script src>, <iframe src>... all count.
//
// Rules for each href/src value:
// 1. Trim surrounding whitespace, then parse it as a URL
// 2. A relative reference is resolved against the crawl's site URL,
//    unless it carries a non-empty #fragment, in which case it is dropped
// 3. Keep it only if its host is the site's host or a subdomain of it
//
// Rust concepts:
// - Iterators: filter_map/flat_map chains instead of nested loops
// - Option<T>: "no usable link here" without any error plumbing
// =============================================================================

use scraper::{ElementRef, Html};
use url::Url;

// Attributes that may hold a link
const LINK_ATTRIBUTES: [&str; 2] = ["href", "src"];

// Extracts all same-site links from HTML content, in document order
//
// Parameters:
//   html: the HTML content to parse
//   site: the crawl's origin; relative links resolve against it
//
// Returns: absolute URLs on the same host or one of its subdomains
pub fn extract_links(html: &str, site: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|element| element.value().attrs())
        .filter(|(name, _)| LINK_ATTRIBUTES.contains(name))
        .filter_map(|(_, value)| resolve_reference(site, value))
        .filter(|url| is_same_site(url, site))
        .collect()
}

// Turns an attribute value into an absolute URL
//
// Examples (site = "https://test/dir/page"):
//   "https://test/a"  -> Some("https://test/a")
//   "sub"             -> Some("https://test/dir/sub")
//   "/root"           -> Some("https://test/root")
//   "#top", "a#top"   -> None (fragments are never followed)
//   "a#"              -> Some("https://test/dir/a") (empty fragment, same as "a")
//   "http://[::1"     -> None (unparseable)
fn resolve_reference(site: &Url, value: &str) -> Option<Url> {
    let value = value.trim();

    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let (reference, fragment) = value.split_once('#').unwrap_or((value, ""));
            if !fragment.is_empty() {
                return None;
            }
            site.join(reference).ok()
        }
        Err(_) => None,
    }
}

// Checks that `url` lives on the site's host or one of its subdomains
//
// Hosts are compared together with any explicit port, so
// "https://test:8080" is not the same site as "https://test".
fn is_same_site(url: &Url, site: &Url) -> bool {
    match (authority(url), authority(site)) {
        (Some(host), Some(site_host)) => {
            host == site_host || host.ends_with(&format!(".{site_host}"))
        }
        _ => false,
    }
}

// host[:port], with the port omitted when it's the scheme's default
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why walk descendants() instead of using a CSS selector?
//    - A selector like "a[href]" only finds links in <a> tags
//    - Images, stylesheets and scripts reference pages and assets too
//    - descendants() visits every node depth-first; ElementRef::wrap keeps
//      only the element nodes (skipping text and comments)
//
// 2. What is RelativeUrlWithoutBase?
//    - Url::parse only accepts absolute URLs
//    - "docs/intro" fails with exactly this error, which is how we know
//      the value is a relative reference that needs join()
//
// 3. Why not use url.domain()?
//    - domain() is None for IP addresses like 127.0.0.1
//    - host_str() works for both names and addresses
// -----------------------------------------------------------------------------
