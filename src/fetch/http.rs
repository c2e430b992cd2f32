// src/fetch/http.rs

use crate::fetch::FetchError;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;

/// Fixed identification header; the sites asked for an honest label.
const USER_AGENT: &str = "MauritaniaHousingProject/1.0 (etudiante) - Projet academique";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u64 = 3;
const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_SECS: u64 = 2;
const MAX_CONSECUTIVE_FAILURES: usize = 3;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// One page, with bounded retries and linear backoff plus jitter.
    pub fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch(url) {
                Ok(html) => return Ok(html),
                Err(e) => {
                    eprintln!("⚠️ Attempt {attempt}/{MAX_ATTEMPTS} failed for {url}: {e}");
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                        std::thread::sleep(Duration::from_secs(base + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| FetchError::Network("retry loop failed".into())))
    }

    fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| FetchError::Network(e.to_string()))
    }

    /// Walks a page sequence, handing each page's HTML to `on_page`, which
    /// reports how many records it yielded. A failed page is skipped; the
    /// walk stops after too many failures in a row, or (for open-ended
    /// sequences) on the first page that yields nothing.
    pub fn fetch_paginated<F>(
        &self,
        urls: &[String],
        delay: Duration,
        stop_on_empty: bool,
        mut on_page: F,
    ) -> Result<(), FetchError>
    where
        F: FnMut(String) -> usize,
    {
        let mut consecutive_failures = 0;

        for (page, url) in urls.iter().enumerate() {
            let page = page + 1;
            eprintln!("📄 Scraping page {page}: {url}");

            match self.fetch_page(url) {
                Ok(html) => {
                    consecutive_failures = 0;
                    let count = on_page(html);
                    eprintln!("✅ Page {page} parsed ({count} listings)");

                    if count == 0 && stop_on_empty {
                        eprintln!("🏁 No listings on page {page}, stopping");
                        break;
                    }
                }
                Err(e) => {
                    consecutive_failures += 1;
                    eprintln!("❌ Page {page} skipped: {e}");

                    if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                        eprintln!("❌ Too many failures in a row, aborting this source");
                        break;
                    }
                }
            }

            if page < urls.len() {
                std::thread::sleep(delay);
            }
        }

        Ok(())
    }
}
