// src/sources/elminassa.rs
//
// elminassa.com is an Arabic-language app behind a location dialog and an
// Arabic "load more" button. Cards carry their labels in Arabic, mapped to
// the dataset's French vocabulary, and the listing link is on an ancestor
// of the card rather than inside it.

use crate::extract::{absolutize, classify, css, fields, select_text};
use crate::fetch::{BrowserPlan, FetchPlan};
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record, PLACEHOLDER};
use crate::sources::Site;
use scraper::{ElementRef, Html};
use std::time::Duration;

const BASE_URL: &str = "https://www.elminassa.com";
const LIST_URL: &str = "https://www.elminassa.com/list";
const DISMISS_LABELS: &[&str] = &["حسنا", "OK", "Fermer"];
const LOAD_MORE_LABEL: &str = "تحميل المزيد";
const CONTAINER: &str = "div.swiper-slide";

/// The nearest enclosing anchor's href, if any.
fn ancestor_link(card: ElementRef<'_>) -> Option<String> {
    card.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

fn extract_card(index: usize, card: ElementRef<'_>) -> Record {
    let mut rec = Record::new("elminassa.com");

    rec.set_opt("prix", select_text(card, &css("span.myTopRight2")));

    let type_ar = select_text(card, &css("span.myTopLeftt2")).unwrap_or_default();
    rec.set_opt(
        "type_bien",
        classify::property_type_ar(&type_ar).map(String::from),
    );

    let titre = select_text(card, &css("div[dir=\"auto\"][lang=\"ar\"]")).unwrap_or_default();
    rec.set("titre", titre.clone());
    rec.set("description", titre.clone());

    rec.set_opt("surface_m2", fields::surface(&titre));
    rec.set_opt("quartier", classify::neighborhood_ar(&titre).map(String::from));

    rec.set_opt(
        "image_url",
        card.select(&css("img"))
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
    );
    rec.set_opt(
        "url",
        ancestor_link(card).map(|h| absolutize(BASE_URL, &h)),
    );

    // The site exposes no stable id; fall back to the card's position.
    rec.set("id_unique", (index + 1).to_string());
    rec.set("vendeur", "elminassa.com");
    rec.set_opt_date("date_publication", None);
    rec.set("nb_images", "1");
    rec.set("nb_chambres", PLACEHOLDER);
    rec.set("nb_sdb", PLACEHOLDER);
    rec.set("ville", "Nouakchott");
    rec.set("date_scraping", scrape_date());

    rec
}

pub struct Elminassa;

impl Site for Elminassa {
    fn name(&self) -> &'static str {
        "elminassa.com"
    }

    fn slug(&self) -> &'static str {
        "elminassa"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Browser(BrowserPlan {
            url: LIST_URL,
            dismiss_labels: DISMISS_LABELS,
            load_more_label: LOAD_MORE_LABEL,
            container_selector: CONTAINER,
            record_cap: usize::MAX,
            settle: Duration::from_secs(3),
        })
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css(CONTAINER))
            .enumerate()
            .map(|(i, card)| extract_card(i, card))
            .collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::Url
    }

    fn keep(&self) -> Keep {
        Keep::Last
    }
}
