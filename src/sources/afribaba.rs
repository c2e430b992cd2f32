// src/sources/afribaba.rs
//
// afribaba.com blocks plain crawlers, so its pages are saved from a browser
// and parsed from disk. The category mixes real listings with construction
// services, hence the housing filter before a card becomes a record.

use crate::extract::{classify, clean_text, css, fields, flat_text, select_attr, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record};
use crate::sources::Site;
use scraper::{ElementRef, Html};
use std::path::PathBuf;

const SNAPSHOT_DIR: &str = "data_raw/snapshots";
const SNAPSHOT_PAGES: u32 = 3;

fn snapshot_paths() -> Vec<PathBuf> {
    (1..=SNAPSHOT_PAGES)
        .map(|n| PathBuf::from(SNAPSHOT_DIR).join(format!("afribaba_page_{n}.html")))
        .collect()
}

/// Description rebuilt from the card's own text nodes: long enough lines
/// that are not buttons or badges.
fn description_from(card: ElementRef<'_>) -> Option<String> {
    let kept: Vec<String> = card
        .text()
        .map(str::trim)
        .filter(|line| {
            line.len() > 20
                && !line.contains("Contacter")
                && !line.contains("badge")
                && !line.contains("Offre")
        })
        .map(|line| clean_text(line))
        .collect();

    (!kept.is_empty()).then(|| kept.join(" "))
}

fn extract_card(card: ElementRef<'_>) -> Option<Record> {
    let titre = select_text(card, &css("h3.card-title a")).unwrap_or_default();
    let text = flat_text(card);
    let description = description_from(card).unwrap_or_default();

    let type_bien = classify::property_type(&format!("{titre} {text}"));

    // Service ads share the housing vocabulary; only keep actual listings.
    let check = format!("{titre} {} {description}", type_bien.unwrap_or(""));
    if !classify::is_real_estate(&check) {
        eprintln!("⚠️ Excluded (not housing): {:.30}", titre);
        return None;
    }

    let mut rec = Record::new("afribaba.com");
    rec.set("titre", titre);
    rec.set_opt(
        "prix",
        select_text(card, &css("span.badge-primary")).or_else(|| fields::price(&text)),
    );
    rec.set("ville", classify::city(&text));
    rec.set("quartier", crate::record::PLACEHOLDER);
    rec.set_opt("type_bien", type_bien.map(String::from));
    rec.set_opt("nb_chambres", fields::bedrooms(&text));
    rec.set_opt("nb_sdb", fields::bathrooms(&text));
    rec.set_opt("surface_m2", fields::surface(&text));
    rec.set_opt_date("date_publication", select_text(card, &css("span.date")));
    rec.set("date_scraping", scrape_date());
    rec.set_opt(
        "url",
        select_attr(card, &css("h3.card-title a"), "href").map(|h| {
            if h.starts_with("//") {
                format!("https:{h}")
            } else {
                h
            }
        }),
    );
    rec.set("description", description);

    Some(rec)
}

pub struct Afribaba;

impl Site for Afribaba {
    fn name(&self) -> &'static str {
        "afribaba.com"
    }

    fn slug(&self) -> &'static str {
        "afribaba"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Snapshots {
            paths: snapshot_paths(),
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("div.card"))
            .filter_map(extract_card)
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

    const LISTING: &str = r#"
      <div class="card">
        <h3 class="card-title"><a href="//www.afribaba.com/mr/annonce/appartement-3ch">Appartement 3 chambres à louer Nouakchott</a></h3>
        <span class="badge badge-primary">150 000 MRO</span>
        <span class="date">Publié le 10/02/2026</span>
        <p>Bel appartement de 120 m² avec 3 chambres et 2 salles de bain, proche du marché.</p>
      </div>"#;

    const SERVICE: &str = r#"
      <div class="card">
        <h3 class="card-title"><a href="//www.afribaba.com/mr/annonce/ing">Ingénieur bâtiment pour vos chantiers</a></h3>
        <p>Études et suivi de chantiers de construction, devis gratuit sur demande.</p>
      </div>"#;

    #[test]
    fn listing_fields() {
        let records = Afribaba.extract(&format!("<html><body>{LISTING}</body></html>"));
        assert_eq!(records.len(), 1);
        let rec = &records[0];

        assert_eq!(rec.get("titre"), "Appartement 3 chambres à louer Nouakchott");
        assert_eq!(rec.get("prix"), "150 000 MRO");
        assert_eq!(rec.get("type_bien"), "Appartement");
        assert_eq!(rec.get("nb_chambres"), "3");
        assert_eq!(rec.get("nb_sdb"), "2");
        assert_eq!(rec.get("surface_m2"), "120 m²");
        assert_eq!(rec.get("date_publication"), "Publié le 10/02/2026");
        assert_eq!(rec.get("url"), "https://www.afribaba.com/mr/annonce/appartement-3ch");
    }

    #[test]
    fn service_ads_are_filtered_out() {
        let records = Afribaba.extract(&format!("<html><body>{SERVICE}</body></html>"));
        assert!(records.is_empty());
    }

    #[test]
    fn price_falls_back_to_text_regex() {
        let html = r#"<html><body><div class="card">
            <h3 class="card-title"><a href="//x.com/a">Villa à vendre</a></h3>
            <p>Très belle villa, prix 2500000 UM négociable.</p>
          </div></body></html>"#;
        let records = Afribaba.extract(html);
        assert_eq!(records[0].get("prix"), "2500000 UM");
    }

    #[test]
    fn three_snapshot_pages() {
        let paths = snapshot_paths();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("afribaba_page_1.html"));
    }
}
