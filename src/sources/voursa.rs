// src/sources/voursa.rs
//
// voursa.com is a Next.js app: the grid grows through a "Voir plus" button,
// so the page is rendered in a headless browser until the button disappears
// or enough listings are loaded. Cards are Tailwind-styled, so the lookups
// match on class fragments rather than full class lists.

use crate::extract::{absolutize, classify, css, fields, flat_text, select_attr, select_text};
use crate::fetch::{BrowserPlan, FetchPlan};
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record};
use crate::sources::Site;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use std::time::Duration;

const BASE_URL: &str = "https://voursa.com";
const CATEGORY_URL: &str = "https://voursa.com/FR/categories/real_estate";
const RECORD_CAP: usize = 4000;
const CONTAINER: &str = "div.mb-6";

fn surface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Superficie · (\d+)").unwrap())
}

// The landmark is the last labeled section of a card; the only thing after
// it is the photo-count badge, which must not leak into the capture.
fn landmark_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Point le plus proche · (.+?)(?:\s+\d+\s*$|$)").unwrap())
}

fn image_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*$").unwrap())
}

fn extract_card(card: ElementRef<'_>) -> Record {
    let mut rec = Record::new("voursa.com");
    let text = flat_text(card);

    rec.set_opt(
        "url",
        select_attr(card, &css("a"), "href").map(|h| absolutize(BASE_URL, &h)),
    );
    rec.set_opt("titre", select_text(card, &css("h3[class*=\"font-bold\"]")));
    rec.set_opt("prix", select_text(card, &css("p[class*=\"text-primaryBlue\"]")));
    rec.set_opt(
        "type_bien",
        select_text(card, &css("span[class*=\"bg-gray-200\"]")),
    );

    rec.set_opt("vendeur", fields::seller(&text));
    rec.set_opt("quartier", classify::neighborhood(&text).map(String::from));
    rec.set_opt_date("date_publication", fields::relative_date(&text));
    rec.set_opt(
        "surface_m2",
        surface_re().captures(&text).map(|c| format!("{} m²", &c[1])),
    );
    rec.set_opt(
        "point_repere",
        landmark_re().captures(&text).map(|c| c[1].trim().to_string()),
    );
    rec.set_opt(
        "nb_images",
        image_count_re().captures(&text).map(|c| c[1].to_string()),
    );
    rec.set_opt(
        "image_url",
        select_attr(card, &css("img"), "src").map(|src| absolutize(BASE_URL, &src)),
    );

    rec.set("ville", "Nouakchott");
    rec.set("date_scraping", scrape_date());

    rec
}

pub struct Voursa;

impl Site for Voursa {
    fn name(&self) -> &'static str {
        "voursa.com"
    }

    fn slug(&self) -> &'static str {
        "voursa"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Browser(BrowserPlan {
            url: CATEGORY_URL,
            dismiss_labels: &[],
            load_more_label: "Voir plus",
            container_selector: CONTAINER,
            record_cap: RECORD_CAP,
            settle: Duration::from_secs(4),
        })
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css(CONTAINER)).map(extract_card).collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::Url
    }

    fn keep(&self) -> Keep {
        Keep::Last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PLACEHOLDER;

    const CARD: &str = r#"
      <div class="mb-6">
        <a href="/FR/ads/villa-tz-889"><img src="/_next/image?url=villa.jpg"></a>
        <span>Immo Sahel</span>
        <span>Tevragh Zeina il y a 2 jours</span>
        <span class="rounded-md bg-gray-200 px-2 py-1 text-[12px] text-gray-700">Immobilier résidentiel</span>
        <h3 class="text-[16px] font-bold">Villa de standing à louer</h3>
        <p class="text-lg font-[600] text-primaryBlue">350 000 MRU</p>
        <div>Superficie · 400 Point le plus proche · Ecole Nasr</div>
        <span>12</span>
      </div>"#;

    #[test]
    fn card_fields() {
        let records = Voursa.extract(&format!("<html><body>{CARD}</body></html>"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];

        assert_eq!(rec.get("url"), "https://voursa.com/FR/ads/villa-tz-889");
        assert_eq!(rec.get("titre"), "Villa de standing à louer");
        assert_eq!(rec.get("prix"), "350 000 MRU");
        assert_eq!(rec.get("type_bien"), "Immobilier résidentiel");
        assert_eq!(rec.get("vendeur"), "Immo Sahel");
        assert_eq!(rec.get("quartier"), "Tevragh Zeina");
        assert_eq!(rec.get("date_publication"), "il y a 2 jours");
        assert_eq!(rec.get("surface_m2"), "400 m²");
        assert_eq!(rec.get("point_repere"), "Ecole Nasr");
        assert_eq!(rec.get("nb_images"), "12");
        assert_eq!(
            rec.get("image_url"),
            "https://voursa.com/_next/image?url=villa.jpg"
        );
    }

    #[test]
    fn sparse_card_keeps_placeholders() {
        let html = "<html><body><div class=\"mb-6\"><h3 class=\"font-bold\">Terrain</h3></div></body></html>";
        let records = Voursa.extract(html);
        let rec = &records[0];

        assert_eq!(rec.get("titre"), "Terrain");
        assert_eq!(rec.get("prix"), PLACEHOLDER);
        assert_eq!(rec.get("vendeur"), PLACEHOLDER);
        assert_eq!(rec.get("url"), PLACEHOLDER);
    }
}
