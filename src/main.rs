use crate::pipeline::run_site;
use std::path::Path;

mod extract;
mod fetch;
mod merge;
mod pipeline;
mod record;
mod sources;

#[cfg(test)]
mod tests;

const DATA_DIR: &str = "data_raw";

fn usage() -> String {
    let slugs: Vec<&str> = sources::all().iter().map(|s| s.slug()).collect();
    format!(
        "Usage: housing_scrape <site|all>\n\nSites: {}",
        slugs.join(", ")
    )
}

fn main() {
    let arg = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            eprintln!("{}", usage());
            std::process::exit(2);
        }
    };

    let sites = if arg == "all" {
        sources::all()
    } else {
        match sources::find(&arg) {
            Some(site) => vec![site],
            None => {
                eprintln!("❌ Unknown site '{arg}'\n\n{}", usage());
                std::process::exit(2);
            }
        }
    };

    let data_dir = Path::new(DATA_DIR);
    let mut failures = 0;

    for site in &sites {
        match run_site(site.as_ref(), data_dir) {
            Ok(stats) => {
                println!(
                    "🏁 {}: {} listings scraped, dataset now {} rows",
                    stats.site, stats.extracted, stats.dataset_rows
                );
            }
            Err(e) => {
                eprintln!("❌ {} failed: {e}", site.name());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("❌ {failures}/{} site(s) failed", sites.len());
        std::process::exit(1);
    }
}
