// src/fetch/browser.rs
//
// Headless-browser rendering for the sites that only populate their listing
// grids from JavaScript. The browser is used strictly to obtain final HTML;
// all extraction happens afterwards on the returned string.

use crate::fetch::FetchError;
use headless_chrome::{Browser, LaunchOptions};
use scraper::{Html, Selector};
use std::time::Duration;

/// One rendered page driven through dialogs and a "load more" control.
pub struct BrowserPlan {
    pub url: &'static str,
    /// Button labels that dismiss interstitial dialogs, tried in order.
    pub dismiss_labels: &'static [&'static str],
    /// Label of the "load more" button; clicked until it disappears.
    pub load_more_label: &'static str,
    /// Selector counting loaded listing containers, for the record cap.
    pub container_selector: &'static str,
    pub record_cap: usize,
    /// Fixed settle delay after navigation and after each interaction.
    pub settle: Duration,
}

fn launch() -> Result<Browser, FetchError> {
    Browser::new(LaunchOptions {
        headless: true,
        ..Default::default()
    })
    .map_err(|e| FetchError::Browser(e.to_string()))
}

fn count_containers(html: &str, selector: &Selector) -> usize {
    Html::parse_document(html).select(selector).count()
}

/// Renders one page fully: navigate, dismiss dialogs, click "load more"
/// until it disappears or the record cap is reached, return the final HTML.
pub fn fetch_rendered(plan: &BrowserPlan) -> Result<String, FetchError> {
    let browser = launch()?;
    let tab = browser
        .new_tab()
        .map_err(|e| FetchError::Browser(e.to_string()))?;

    eprintln!("📄 Loading {} in headless browser...", plan.url);
    tab.navigate_to(plan.url)
        .and_then(|t| t.wait_until_navigated())
        .map_err(|e| FetchError::Browser(e.to_string()))?;
    std::thread::sleep(plan.settle);

    for label in plan.dismiss_labels {
        let xpath = format!("//button[contains(text(), '{label}')]");
        if let Ok(button) = tab.find_element_by_xpath(&xpath) {
            if button.click().is_ok() {
                eprintln!("✅ Dismissed dialog via '{label}'");
                std::thread::sleep(Duration::from_secs(2));
                break;
            }
        }
    }

    let container = Selector::parse(plan.container_selector)
        .map_err(|e| FetchError::Browser(e.to_string()))?;
    let load_more_xpath = format!("//button[contains(text(), '{}')]", plan.load_more_label);
    let mut clicks = 0;

    loop {
        let button = match tab.find_element_by_xpath(&load_more_xpath) {
            Ok(b) => b,
            Err(_) => {
                eprintln!("✅ No more '{}' button after {clicks} clicks", plan.load_more_label);
                break;
            }
        };

        let _ = button.scroll_into_view();
        std::thread::sleep(Duration::from_secs(1));

        if button.click().is_err() {
            eprintln!("⚠️ '{}' no longer clickable, stopping", plan.load_more_label);
            break;
        }
        clicks += 1;
        eprintln!("🖱️ Click {clicks} on '{}'", plan.load_more_label);
        std::thread::sleep(plan.settle);

        let html = tab
            .get_content()
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        let loaded = count_containers(&html, &container);
        eprintln!("   📊 {loaded} listings loaded");

        if loaded >= plan.record_cap {
            eprintln!("🎯 Record cap reached ({loaded})");
            break;
        }
    }

    tab.get_content()
        .map_err(|e| FetchError::Browser(e.to_string()))
}

/// Renders a fixed URL sequence, scrolling each page to the bottom to
/// trigger lazy content. A page that fails to render is skipped.
pub fn fetch_rendered_pages(urls: &[String], settle: Duration) -> Result<Vec<String>, FetchError> {
    let browser = launch()?;
    let tab = browser
        .new_tab()
        .map_err(|e| FetchError::Browser(e.to_string()))?;

    let mut pages = Vec::new();

    for (page, url) in urls.iter().enumerate() {
        let page = page + 1;
        eprintln!("📄 Rendering page {page}: {url}");

        let rendered = tab
            .navigate_to(url)
            .and_then(|t| t.wait_until_navigated())
            .and_then(|t| {
                t.evaluate("window.scrollTo(0, document.body.scrollHeight);", false)?;
                Ok(t)
            })
            .map(|t| {
                std::thread::sleep(settle);
                t.get_content()
            });

        match rendered {
            Ok(Ok(html)) => pages.push(html),
            Ok(Err(e)) | Err(e) => eprintln!("❌ Page {page} skipped: {e}"),
        }
    }

    Ok(pages)
}
