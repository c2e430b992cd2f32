// src/sources/mauri_home.rs
//
// mauri-home.com renders its search results from JavaScript into article
// cards. Detail fields hang off inline SVG icons (map-pin, bed, bath,
// maximize), so lookups anchor on the icon's class fragment and read the
// enclosing element's text. The price span carries an optional period
// suffix ("/mois") that decides rent vs. sale.

use crate::extract::{absolutize, clean_text, css, fields, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record, PLACEHOLDER};
use crate::sources::Site;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use std::time::Duration;

const BASE_URL: &str = "https://www.mauri-home.com";
const SEARCH_URL: &str = "https://www.mauri-home.com/recherche";
const SETTLE: Duration = Duration::from_secs(3);

// Digits (with plain or narrow no-break spaces as thousand separators),
// an optional currency word, an optional "/periode" suffix.
fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\d\s]+)[A-Za-z]*(?:/(\w+))?").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").unwrap())
}

/// Text of the span wrapping the given SVG icon.
fn icon_span_value(card: ElementRef<'_>, icon_fragment: &str) -> Option<String> {
    let svg = card
        .select(&css(&format!("svg[class*=\"{icon_fragment}\"]")))
        .next()?;
    svg.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
}

/// Neighborhood: the first icon-free span next to the map-pin icon.
fn map_pin_value(card: ElementRef<'_>) -> Option<String> {
    let svg = card.select(&css("svg[class*=\"map-pin\"]")).next()?;
    let holder = svg
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")?;
    holder
        .select(&css("span"))
        .filter(|span| span.select(&css("svg")).next().is_none())
        .map(|span| clean_text(&span.text().collect::<Vec<_>>().join(" ")))
        .find(|t| !t.is_empty())
}

fn extract_card(card: ElementRef<'_>) -> Record {
    let mut rec = Record::new("mauri-home.com");

    rec.set_opt("titre", select_text(card, &css("h3[class*=\"font-bold\"]")));

    // "350 000/mois" style: digits, optional currency, optional period.
    // A price without a period is a monthly rent on this site.
    match select_text(card, &css("span.text-primary")) {
        Some(prix_text) => match price_re().captures(&prix_text) {
            Some(c) => {
                let digits: String = c[1].chars().filter(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    rec.set("prix", prix_text.as_str());
                    rec.set("type_annonce", PLACEHOLDER);
                } else {
                    rec.set("prix", format!("{digits} MRU"));
                    let periode = c.get(2).map(|m| m.as_str().to_lowercase());
                    let periode = periode.as_deref().unwrap_or("mois");
                    rec.set(
                        "type_annonce",
                        if periode.contains("mois") {
                            "Location"
                        } else {
                            "Vente"
                        },
                    );
                }
            }
            None => {
                rec.set("prix", prix_text.as_str());
                rec.set("type_annonce", PLACEHOLDER);
            }
        },
        None => {
            rec.set("prix", PLACEHOLDER);
            rec.set("type_annonce", PLACEHOLDER);
        }
    }

    rec.set("ville", "Nouakchott");
    rec.set_opt("quartier", map_pin_value(card));
    rec.set_opt(
        "nb_chambres",
        icon_span_value(card, "bed").and_then(|t| {
            number_re().captures(&t).map(|c| c[1].to_string())
        }),
    );
    rec.set_opt(
        "nb_sdb",
        icon_span_value(card, "bath").and_then(|t| {
            number_re().captures(&t).map(|c| c[1].to_string())
        }),
    );
    rec.set_opt(
        "surface_m2",
        icon_span_value(card, "maximize").and_then(|t| fields::surface(&t)),
    );

    rec.set_opt_date("date_publication", None);
    rec.set("date_scraping", scrape_date());
    rec.set_opt(
        "url",
        card.select(&css("a[href]"))
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|h| absolutize(BASE_URL, h)),
    );
    rec.set_opt(
        "image_url",
        card.select(&css("img"))
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| absolutize(BASE_URL, src)),
    );

    rec
}

pub struct MauriHome;

impl Site for MauriHome {
    fn name(&self) -> &'static str {
        "mauri-home.com"
    }

    fn slug(&self) -> &'static str {
        "mauri_home"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::BrowserPages {
            urls: vec![SEARCH_URL.to_string()],
            settle: SETTLE,
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("article.group"))
            .map(extract_card)
            .collect()
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

    const CARD: &str = "
      <article class=\"group\">
        <a href=\"/annonce/villa-tz-55\"><img src=\"/images/55/cover.jpg\"></a>
        <h3 class=\"text-lg font-bold\">Villa moderne Tevragh Zeina</h3>
        <span class=\"text-primary\">350\u{202f}000 MRU/mois</span>
        <div>
          <svg class=\"lucide lucide-map-pin\"></svg><span>Tevragh Zeina</span>
        </div>
        <span><svg class=\"lucide lucide-bed\"></svg> 4</span>
        <span><svg class=\"lucide lucide-bath\"></svg> 3</span>
        <span><svg class=\"lucide lucide-maximize\"></svg> 300 m²</span>
      </article>";

    #[test]
    fn card_fields() {
        let records = MauriHome.extract(&format!("<html><body>{CARD}</body></html>"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];

        assert_eq!(rec.get("titre"), "Villa moderne Tevragh Zeina");
        assert_eq!(rec.get("prix"), "350000 MRU");
        assert_eq!(rec.get("type_annonce"), "Location");
        assert_eq!(rec.get("quartier"), "Tevragh Zeina");
        assert_eq!(rec.get("nb_chambres"), "4");
        assert_eq!(rec.get("nb_sdb"), "3");
        assert_eq!(rec.get("surface_m2"), "300 m²");
        assert_eq!(rec.get("url"), "https://www.mauri-home.com/annonce/villa-tz-55");
        assert_eq!(rec.get("image_url"), "https://www.mauri-home.com/images/55/cover.jpg");
    }

    #[test]
    fn explicit_yearly_period_is_a_sale_price_shape() {
        let html = "<html><body><article class=\"group\">
            <span class=\"text-primary\">12 500 000 MRU/vente</span>
          </article></body></html>";
        let records = MauriHome.extract(html);
        assert_eq!(records[0].get("prix"), "12500000 MRU");
        assert_eq!(records[0].get("type_annonce"), "Vente");
    }

    #[test]
    fn card_without_price_span_keeps_placeholders() {
        let html = "<html><body><article class=\"group\">
            <h3 class=\"font-bold\">Terrain clôturé</h3>
          </article></body></html>";
        let records = MauriHome.extract(html);
        assert_eq!(records[0].get("prix"), PLACEHOLDER);
        assert_eq!(records[0].get("type_annonce"), PLACEHOLDER);
        assert_eq!(records[0].get("quartier"), PLACEHOLDER);
    }
}
