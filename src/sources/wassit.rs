// src/sources/wassit.rs
//
// wassit.info is a classic server-rendered listing board. Pagination is
// open-ended, so the page walk stops at the first page without listings.

use crate::extract::{absolutize, css, select_attr, select_text};
use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::{scrape_date, Record};
use crate::sources::Site;
use scraper::{ElementRef, Html};
use std::time::Duration;

const BASE_URL: &str = "https://wassit.info";
const FIRST_PAGE: &str = "http://wassit.info/immobilier.html";
const MAX_PAGES: u32 = 10;
const PAGE_DELAY: Duration = Duration::from_secs(2);

fn page_urls() -> Vec<String> {
    (1..=MAX_PAGES)
        .map(|n| {
            if n == 1 {
                FIRST_PAGE.to_string()
            } else {
                format!("http://wassit.info/immobilier/{n}-3-2.html")
            }
        })
        .collect()
}

fn extract_block(block: ElementRef<'_>) -> Option<Record> {
    // Everything of interest sits under the block's center column.
    let center = block.select(&css("div.center")).next()?;
    let mut rec = Record::new("wassit.info");

    rec.set_opt(
        "titre",
        select_text(center, &css("div.title h2 a"))
            .or_else(|| select_text(center, &css("div.title h2"))),
    );
    rec.set_opt(
        "prix",
        select_text(center, &css("div.price")).map(|p| p.replace("UM", "").trim().to_string()),
    );
    rec.set(
        "ville",
        select_text(center, &css("div.city")).unwrap_or_else(|| "Nouakchott".to_string()),
    );
    rec.set_opt_date("date_publication", select_text(center, &css("div.date")));
    rec.set_opt(
        "url",
        select_attr(center, &css("div.title a"), "href").map(|h| absolutize(BASE_URL, &h)),
    );
    rec.set("date_scraping", scrape_date());

    Some(rec)
}

pub struct Wassit;

impl Site for Wassit {
    fn name(&self) -> &'static str {
        "wassit.info"
    }

    fn slug(&self) -> &'static str {
        "wassit"
    }

    fn plan(&self) -> FetchPlan {
        FetchPlan::Http {
            urls: page_urls(),
            delay: PAGE_DELAY,
            stop_on_empty: true,
        }
    }

    fn extract(&self, html: &str) -> Vec<Record> {
        let doc = Html::parse_document(html);
        doc.select(&css("div.block"))
            .filter_map(extract_block)
            .collect()
    }

    fn merge_key(&self) -> DedupeKey {
        DedupeKey::Url
    }

    fn keep(&self) -> Keep {
        Keep::First
    }
}
