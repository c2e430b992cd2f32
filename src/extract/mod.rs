// src/extract/mod.rs

pub mod classify;
pub mod fields;
pub mod text;

use scraper::{ElementRef, Selector};
use url::Url;

pub use text::clean_text;

/// Parses a selector literal. All call sites pass compile-time constants,
/// so a failure here is a typo in the source, not a runtime condition.
pub fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid CSS selector")
}

/// First matching element's text, whitespace-collapsed. Empty matches count
/// as missing so they fall through to the placeholder.
pub fn select_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector)
        .next()
        .map(|m| clean_text(&m.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
}

/// First matching element's attribute value.
pub fn select_attr(el: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    el.select(selector)
        .next()
        .and_then(|m| m.value().attr(attr))
        .map(str::to_string)
}

/// The container's entire text flattened to one cleaned line, the haystack
/// for the regex fallbacks in [`fields`].
pub fn flat_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Resolves a possibly-relative href against the site's base URL.
pub fn absolutize(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else {
        Url::parse(base)
            .and_then(|b| b.join(href))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn select_text_takes_first_match_and_cleans() {
        let html = Html::parse_fragment(
            "<div><h3 class=\"card-title\">  Villa \n Arafat </h3><h3 class=\"card-title\">autre</h3></div>",
        );
        let root = html.root_element();
        let sel = css("h3.card-title");
        assert_eq!(select_text(root, &sel), Some("Villa Arafat".to_string()));
    }

    #[test]
    fn select_text_skips_empty_matches() {
        let html = Html::parse_fragment("<div><span class=\"date\">   </span></div>");
        let root = html.root_element();
        assert_eq!(select_text(root, &css("span.date")), None);
    }

    #[test]
    fn select_attr_reads_attributes() {
        let html = Html::parse_fragment("<div><a href=\"/annonce/12\">voir</a></div>");
        let root = html.root_element();
        assert_eq!(
            select_attr(root, &css("a"), "href"),
            Some("/annonce/12".to_string())
        );
    }

    #[test]
    fn absolutize_handles_the_usual_shapes() {
        assert_eq!(absolutize("https://voursa.com", "/annonce/3"), "https://voursa.com/annonce/3");
        assert_eq!(absolutize("https://voursa.com/", "annonce/3"), "https://voursa.com/annonce/3");
        assert_eq!(absolutize("https://voursa.com", "//cdn.x.com/a.jpg"), "https://cdn.x.com/a.jpg");
        assert_eq!(absolutize("https://voursa.com", "https://x.com/a"), "https://x.com/a");
    }
}
