// src/output.rs
// =============================================================================
// Printing the finished sitemap.
//
// JSON goes to stdout untouched so it can be piped into other tools; all
// logging goes to stderr.
// =============================================================================

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::sitemap::{Page, Sitemap};

pub fn print_sitemap(sitemap: &Sitemap, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(sitemap).context("could not encode sitemap to JSON")?
        }
        OutputFormat::Text => render_text(sitemap),
    };

    println!("{}", rendered.trim_end());
    Ok(())
}

// Renders the sitemap as an indented tree
//
// Example:
//   example.com
//     - https://example.com/logo.png
//     /blog
//       /first-post
pub fn render_text(sitemap: &Sitemap) -> String {
    let mut out = String::new();
    for (host, page) in &sitemap.hosts {
        out.push_str(host);
        out.push('\n');
        render_page(&mut out, page, 1);
    }
    out
}

fn render_page(out: &mut String, page: &Page, depth: usize) {
    let indent = "  ".repeat(depth);

    for asset in &page.assets {
        out.push_str(&format!("{indent}- {asset}\n"));
    }

    for (segment, child) in &page.children {
        out.push_str(&format!("{indent}{segment}\n"));
        render_page(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_render_text_tree() {
        let mut sitemap = Sitemap::new();
        let url = |s: &str| Url::parse(s).unwrap();
        sitemap.add(&url("https://test/"), &[url("https://test/logo.png")]);
        sitemap.add(&url("https://test/blog/first"), &[url("https://test/img/a.jpg")]);
        sitemap.add(&url("https://test/about"), &[]);

        let text = render_text(&sitemap);
        assert_eq!(
            text,
            "test\n\
             \x20\x20- https://test/logo.png\n\
             \x20\x20/about\n\
             \x20\x20/blog\n\
             \x20\x20\x20\x20/first\n\
             \x20\x20\x20\x20\x20\x20- https://test/img/a.jpg\n"
        );
    }

    #[test]
    fn test_render_empty_sitemap() {
        assert_eq!(render_text(&Sitemap::new()), "");
    }
}
