// src/sources/lagence.rs
//
// lagence-mr.com runs an Elementor/JetEngine theme: each listing is a grid
// item whose detail fields sit in icon lists, so lookups are anchored on the
// FontAwesome icon class next to each value.

use crate::extract::{absolutize, css, fields, flat_text, select_attr, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record};
use crate::sources::Site;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use std::time::Duration;

const BASE_URL: &str = "https://lagence-mr.com/";
const PAGE_COUNT: u32 = 14;
const PAGE_DELAY: Duration = Duration::from_secs(3);

fn page_urls() -> Vec<String> {
    (1..=PAGE_COUNT)
        .map(|n| {
            if n == 1 {
                BASE_URL.to_string()
            } else {
                format!("{BASE_URL}page/{n}/")
            }
        })
        .collect()
}

fn background_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"url\(["']?([^"')]+)["']?\)"#).unwrap())
}

/// Value of the icon list item carrying the given FontAwesome icon.
fn icon_item(item: ElementRef<'_>, icon_class: &str) -> Option<String> {
    let icon = css(&format!("i.{icon_class}"));
    let value = css("span.elementor-icon-list-text");
    item.select(&css("li"))
        .find(|li| li.select(&icon).next().is_some())
        .and_then(|li| select_text(li, &value))
}

fn extract_item(item: ElementRef<'_>) -> Record {
    let mut rec = Record::new("lagence-mr.com");

    let post_id = item.value().attr("data-post-id").map(str::to_string);
    rec.set_opt("id_unique", post_id);

    rec.set_opt("titre", select_text(item, &css("h5.elementor-heading-title")));
    rec.set_opt(
        "prix",
        select_text(item, &css("p.elementor-heading-title")).map(|p| fields::clean_price(&p)),
    );
    rec.set_opt(
        "type_annonce",
        select_text(item, &css("span.elementor-icon-list-text")),
    );

    rec.set_opt("quartier", icon_item(item, "fa-map-marker-alt"));
    rec.set("ville", "Nouakchott");
    rec.set_opt(
        "nb_chambres",
        icon_item(item, "fa-bed").and_then(|t| fields::bedrooms(&t)),
    );
    rec.set_opt("surface_m2", icon_item(item, "fa-ruler-combined"));

    // The date rarely has a dedicated element; try one, then the full text.
    let dated = select_text(item, &css("[class*=\"date\"]"))
        .and_then(|t| fields::publication_date(&t))
        .or_else(|| fields::publication_date(&flat_text(item)));
    rec.set_opt_date("date_publication", dated);
    rec.set("date_scraping", scrape_date());

    rec.set_opt(
        "url",
        select_attr(item, &css("a.jet-engine-listing-overlay-link"), "href")
            .map(|h| absolutize(BASE_URL, &h)),
    );
    let image = select_attr(item, &css("div[style*=\"background-image\"]"), "style")
        .and_then(|style| {
            background_image_re()
                .captures(&style)
                .map(|c| c[1].to_string())
        });
    rec.set_opt("image_url", image);

    rec
}

pub struct Lagence;

impl Site for Lagence {
    fn name(&self) -> &'static str {
        "lagence-mr.com"
    }

    fn slug(&self) -> &'static str {
        "lagence"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Http {
            urls: page_urls(),
            delay: PAGE_DELAY,
            stop_on_empty: false,
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("div[class*=\"jet-listing-grid__item\"]"))
            .map(extract_item)
            .collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::Url
    }

    fn keep(&self) -> Keep {
        Keep::First
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PLACEHOLDER, PLACEHOLDER_DATE};

    const ITEM: &str = r##"
      <div class="jet-listing-grid__item" data-post-id="5336">
        <div style="background-image: url('https://lagence-mr.com/wp-content/uploads/villa.jpg');"></div>
        <h5 class="elementor-heading-title">Villa moderne Tevragh Zeina</h5>
        <p class="elementor-heading-title">3 500 000 MRU</p>
        <ul>
          <li><i class="fas fa-tag"></i><span class="elementor-icon-list-text">Vente</span></li>
          <li><i class="fas fa-map-marker-alt"></i><span class="elementor-icon-list-text">Tevragh Zeina</span></li>
          <li><i class="fas fa-bed"></i><span class="elementor-icon-list-text">4 chambres</span></li>
          <li><i class="fas fa-ruler-combined"></i><span class="elementor-icon-list-text">300 m²</span></li>
        </ul>
        <a class="jet-engine-listing-overlay-link" href="/annonce/villa-5336/"></a>
      </div>"##;

    #[test]
    fn grid_item_fields() {
        let records = Lagence.extract(&format!("<html><body>{ITEM}</body></html>"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];

        assert_eq!(rec.get("id_unique"), "5336");
        assert_eq!(rec.get("titre"), "Villa moderne Tevragh Zeina");
        assert_eq!(rec.get("prix"), "3500000 MRU");
        assert_eq!(rec.get("type_annonce"), "Vente");
        assert_eq!(rec.get("quartier"), "Tevragh Zeina");
        assert_eq!(rec.get("nb_chambres"), "4");
        assert_eq!(rec.get("surface_m2"), "300 m²");
        assert_eq!(rec.get("url"), "https://lagence-mr.com/annonce/villa-5336/");
        assert_eq!(
            rec.get("image_url"),
            "https://lagence-mr.com/wp-content/uploads/villa.jpg"
        );
        assert_eq!(rec.get("date_publication"), PLACEHOLDER_DATE);
    }

    #[test]
    fn bare_item_fills_placeholders() {
        let records =
            Lagence.extract("<html><body><div class=\"jet-listing-grid__item\"></div></body></html>");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("titre"), PLACEHOLDER);
        assert_eq!(records[0].get("quartier"), PLACEHOLDER);
        assert_eq!(records[0].get("source"), "lagence-mr.com");
    }

    #[test]
    fn fourteen_pages_starting_at_the_homepage() {
        let urls = page_urls();
        assert_eq!(urls.len(), 14);
        assert_eq!(urls[0], "https://lagence-mr.com/");
        assert_eq!(urls[1], "https://lagence-mr.com/page/2/");
        assert_eq!(urls[13], "https://lagence-mr.com/page/14/");
    }
}
