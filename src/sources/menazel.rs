// src/sources/menazel.rs
//
// menazel.org paginates server-side but fills the cards from JavaScript, so
// each search page is rendered in the browser before parsing. Bedroom and
// bathroom counts hang off Material Design icons; the value is the first
// span following the icon.

use crate::extract::{absolutize, classify, clean_text, css, fields, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record, PLACEHOLDER};
use crate::sources::Site;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

const BASE_URL: &str = "https://menazel.org";
const PAGE_COUNT: u32 = 7;
const SETTLE: Duration = Duration::from_secs(5);

fn page_urls() -> Vec<String> {
    (1..=PAGE_COUNT)
        .map(|n| format!("{BASE_URL}/fr/search?page={n}&sort=Newest"))
        .collect()
}

/// Text of the first span following the given icon element.
fn icon_value(card: ElementRef<'_>, icon: &Selector) -> Option<String> {
    let icon_el = card.select(icon).next()?;
    icon_el
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
}

fn extract_card(card: ElementRef<'_>) -> Option<Record> {
    // Without a property link the card is a decorative grid cell.
    let href = card
        .select(&css("a[href^=\"/fr/property/\"]"))
        .next()
        .and_then(|a| a.value().attr("href"))?
        .to_string();

    let mut rec = Record::new("menazel.org");
    rec.set("url", absolutize(BASE_URL, &href));
    rec.set_opt(
        "id_unique",
        href.rsplit('/').next().map(str::to_string),
    );

    let titre = select_text(card, &css("a.text-lg")).unwrap_or_default();
    rec.set("titre", titre.clone());

    let prix = select_text(card, &css("span[dir=\"ltr\"]")).and_then(|t| {
        let digits: String = t.chars().filter(char::is_ascii_digit).collect();
        (!digits.is_empty()).then(|| format!("{digits} MRU"))
    });
    rec.set_opt("prix", prix);

    rec.set_opt("type_bien", classify::property_type(&titre).map(String::from));
    rec.set_opt("quartier", classify::neighborhood(&titre).map(String::from));
    rec.set_opt("surface_m2", fields::surface(&titre));

    rec.set_opt("nb_chambres", icon_value(card, &css("i.mdi-door-sliding")));
    rec.set_opt("nb_sdb", icon_value(card, &css("i.mdi-shower")));

    let mut telephone = None;
    let mut whatsapp = None;
    for link in card.select(&css("a[href]")) {
        if let Some(h) = link.value().attr("href") {
            if let Some(number) = h.strip_prefix("tel:") {
                telephone = Some(number.to_string());
            } else if h.contains("wa.me") {
                whatsapp = Some(h.to_string());
            }
        }
    }
    rec.set_opt("telephone", telephone);
    rec.set_opt("whatsapp", whatsapp);

    rec.set_opt(
        "image_url",
        card.select(&css("img"))
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| absolutize(BASE_URL, src)),
    );

    rec.set("vendeur", PLACEHOLDER);
    rec.set_opt_date("date_publication", None);
    rec.set("nb_images", "1");
    rec.set("ville", "Nouakchott");
    rec.set("date_scraping", scrape_date());

    Some(rec)
}

pub struct Menazel;

impl Site for Menazel {
    fn name(&self) -> &'static str {
        "menazel.org"
    }

    fn slug(&self) -> &'static str {
        "menazel"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::BrowserPages {
            urls: page_urls(),
            settle: SETTLE,
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("div.group"))
            .filter_map(extract_card)
            .collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::Url
    }

    fn keep(&self) -> Keep {
        Keep::Last
    }
}
