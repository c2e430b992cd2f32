// src/sources/untoitenrim.rs
//
// untoitenrim.com serves all its cards on a single Bootstrap page. The card
// itself only gives title, price, badge and a truncated description; type,
// transaction, neighborhood and counts come from keyword and regex passes
// over that text.

use crate::extract::{classify, css, fields, select_attr, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record, PLACEHOLDER};
use crate::sources::Site;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use std::time::Duration;

const BASE_URL: &str = "https://untoitenrim.com/";
const LISTINGS_URL: &str = "https://untoitenrim.com/annonces.php";

fn detail_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"id=(\d+)").unwrap())
}

fn extract_card(card: ElementRef<'_>) -> Record {
    let mut rec = Record::new("untoitenrim.com");

    let href = select_attr(card, &css("a[href^=\"annonce_detail.php\"]"), "href");
    match &href {
        Some(h) => {
            rec.set("url", format!("{BASE_URL}{h}"));
            rec.set_opt(
                "id_unique",
                detail_id_re().captures(h).map(|c| c[1].to_string()),
            );
        }
        None => {
            rec.set("url", PLACEHOLDER);
            rec.set("id_unique", PLACEHOLDER);
        }
    }

    let titre = select_text(card, &css("h5.card-title")).unwrap_or_default();
    let description = select_text(card, &css("p.card-text.text-truncate")).unwrap_or_default();
    rec.set("titre", titre.clone());
    rec.set_opt("prix", select_text(card, &css("span.fw-bold.text-success")));
    // The availability badge rides in the nb_vues column; that is the slot
    // this source has always written it to in the shared dataset.
    rec.set_opt("nb_vues", select_text(card, &css("span.badge")));
    rec.set("description", description.clone());
    rec.set_opt(
        "image_url",
        select_attr(card, &css("img.card-img-top"), "src").map(|src| format!("{BASE_URL}{src}")),
    );

    rec.set_opt("type_bien", classify::property_type(&titre).map(String::from));
    rec.set_opt(
        "type_annonce",
        classify::transaction_type(&titre).map(String::from),
    );
    rec.set_opt("quartier", classify::neighborhood(&titre).map(String::from));
    rec.set("ville", "Nouakchott");

    let haystack = format!("{titre} {description}");
    rec.set_opt("surface_m2", fields::surface(&haystack));
    rec.set_opt("nb_chambres", fields::bedrooms(&description));
    rec.set_opt("nb_sdb", fields::bathrooms(&description));

    rec.set_opt_date("date_publication", None);
    rec.set("date_scraping", scrape_date());

    rec
}

pub struct Untoitenrim;

impl Site for Untoitenrim {
    fn name(&self) -> &'static str {
        "untoitenrim.com"
    }

    fn slug(&self) -> &'static str {
        "untoitenrim"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Http {
            urls: vec![LISTINGS_URL.to_string()],
            delay: Duration::from_secs(3),
            stop_on_empty: false,
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("div.col-md-6.col-lg-4"))
            .map(extract_card)
            .collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::IdAndSource
    }

    fn keep(&self) -> Keep {
        Keep::First
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PLACEHOLDER;

    const CARD: &str = r#"
      <div class="col-md-6 col-lg-4">
        <img class="card-img-top" src="uploads/villa42.jpg">
        <span class="badge bg-success">Disponible</span>
        <h5 class="card-title">Villa à louer à Tevragh Zeina 300 m²</h5>
        <p class="card-text text-truncate">Grande villa avec 4 chambres et 3 salles de bain, jardin.</p>
        <span class="fw-bold text-success">250 000 MRU / mois</span>
        <a href="annonce_detail.php?id=42">Voir détails</a>
      </div>"#;

    #[test]
    fn card_fields() {
        let records = Untoitenrim.extract(&format!("<html><body>{CARD}</body></html>"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];

        assert_eq!(rec.get("id_unique"), "42");
        assert_eq!(rec.get("url"), "https://untoitenrim.com/annonce_detail.php?id=42");
        assert_eq!(rec.get("titre"), "Villa à louer à Tevragh Zeina 300 m²");
        assert_eq!(rec.get("prix"), "250 000 MRU / mois");
        assert_eq!(rec.get("nb_vues"), "Disponible");
        assert_eq!(rec.get("type_bien"), "Villa");
        assert_eq!(rec.get("type_annonce"), "Location");
        assert_eq!(rec.get("quartier"), "Tevragh Zeina");
        assert_eq!(rec.get("surface_m2"), "300 m²");
        assert_eq!(rec.get("nb_chambres"), "4");
        assert_eq!(rec.get("nb_sdb"), "3");
        assert_eq!(rec.get("image_url"), "https://untoitenrim.com/uploads/villa42.jpg");
    }

    #[test]
    fn card_without_detail_link_keeps_placeholders() {
        let html = r#"<html><body><div class="col-md-6 col-lg-4">
            <h5 class="card-title">Terrain en vente</h5>
          </div></body></html>"#;
        let records = Untoitenrim.extract(html);
        let rec = &records[0];

        assert_eq!(rec.get("url"), PLACEHOLDER);
        assert_eq!(rec.get("id_unique"), PLACEHOLDER);
        assert_eq!(rec.get("type_bien"), "Terrain");
        assert_eq!(rec.get("type_annonce"), "Vente");
    }
}
