// src/sitemap/page.rs
// =============================================================================
// One node of the sitemap tree.
//
// A Page has:
// - assets: URLs of files it references (images, stylesheets, PDFs...)
// - children: sub-pages, keyed by a single path segment such as "/blog"
//
// The JSON shape is {"assets": [...], "children": {"/blog": [Page]}}.
// Each segment maps to exactly one child in memory; the child is wrapped
// in a one-element list only when serializing, to keep that shape.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub assets: BTreeSet<String>,
    #[serde(serialize_with = "children_as_lists")]
    pub children: BTreeMap<String, Page>,
}

impl Page {
    // Walks down one child per path segment, creating missing ones
    //
    // Segments are given without slashes ("blog", "2024") and stored with
    // a leading slash ("/blog", "/2024").
    pub fn descend<'s, I>(&mut self, segments: I) -> &mut Page
    where
        I: IntoIterator<Item = &'s str>,
    {
        segments.into_iter().fold(self, |page, segment| {
            page.children.entry(format!("/{segment}")).or_default()
        })
    }

    // Looks up the child stored under `segment` ("/blog")
    #[cfg(test)]
    pub fn child(&self, segment: &str) -> Option<&Page> {
        self.children.get(segment)
    }

    // Number of pages in this subtree, this one included
    pub fn page_count(&self) -> usize {
        1 + self.children.values().map(Page::page_count).sum::<usize>()
    }
}

fn children_as_lists<S>(children: &BTreeMap<String, Page>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(
        children
            .iter()
            .map(|(segment, page)| (segment, std::slice::from_ref(page))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descend_creates_nested_children() {
        let mut root = Page::default();
        root.descend(["a", "b"]).assets.insert("x.png".to_string());

        let b = root.child("/a").and_then(|a| a.child("/b")).unwrap();
        assert!(b.assets.contains("x.png"));
        assert_eq!(root.page_count(), 3);
    }

    #[test]
    fn test_descend_reuses_existing_children() {
        let mut root = Page::default();
        root.descend(["a", "b"]);
        root.descend(["a", "c"]);
        root.descend(["a", "b"]).assets.insert("y.png".to_string());

        let a = root.child("/a").unwrap();
        assert_eq!(a.children.len(), 2);
        assert!(a.child("/b").unwrap().assets.contains("y.png"));
    }

    #[test]
    fn test_descend_without_segments_is_self() {
        let mut root = Page::default();
        root.descend(std::iter::empty()).assets.insert("z.css".to_string());
        assert!(root.assets.contains("z.css"));
        assert!(root.children.is_empty());
    }

    // Each child is stored once but serialized as a one-element list
    #[test]
    fn test_serializes_children_as_lists() {
        let mut root = Page::default();
        root.descend(["a"]).assets.insert("https://test/a.png".to_string());

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value,
            json!({
                "assets": [],
                "children": {
                    "/a": [
                        { "assets": ["https://test/a.png"], "children": {} }
                    ]
                }
            })
        );
    }
}
