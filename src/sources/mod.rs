// src/sources/mod.rs
//
// One module per listing site. Each site pairs a fetch plan (how its pages
// are obtained) with a pure extraction function over the returned HTML, plus
// the de-duplication policy its listings merge under. All site-specific
// configuration (URLs, selectors, caps) lives in consts inside the module.

mod afribaba;
mod elminassa;
mod lagence;
mod mauri_home;
mod menazel;
mod untoitenrim;
mod voursa;
mod wassit;

pub use afribaba::Afribaba;
pub use elminassa::Elminassa;
pub use lagence::Lagence;
pub use mauri_home::MauriHome;
pub use menazel::Menazel;
pub use untoitenrim::Untoitenrim;
pub use voursa::Voursa;
pub use wassit::Wassit;

use crate::fetch::FetchPlan;
use crate::merge::{DedupeKey, Keep};
use crate::record::Record;

pub trait Site {
    /// Domain name written into every record's `source` column.
    fn name(&self) -> &'static str;
    /// Short identifier used on the command line and for the batch file.
    fn slug(&self) -> &'static str;
    fn plan(&self) -> FetchPlan;
    /// Extracts all listings from one page of HTML. A listing that fails
    /// partway keeps placeholders; it is never dropped for missing fields.
    fn extract(&self, html: &str) -> Vec<Record>;
    fn merge_key(&self) -> DedupeKey;
    fn keep(&self) -> Keep;
}

pub fn all() -> Vec<Box<dyn Site>> {
    vec![
        Box::new(Lagence),
        Box::new(Wassit),
        Box::new(Untoitenrim),
        Box::new(Afribaba),
        Box::new(Voursa),
        Box::new(Menazel),
        Box::new(Elminassa),
        Box::new(MauriHome),
    ]
}

pub fn find(slug: &str) -> Option<Box<dyn Site>> {
    all().into_iter().find(|s| s.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_is_reachable_by_slug() {
        for site in all() {
            let found = find(site.slug()).expect("slug registered");
            assert_eq!(found.name(), site.name());
        }
        assert!(find("nosuchsite").is_none());
    }

    #[test]
    fn slugs_are_unique() {
        let sites = all();
        for (i, a) in sites.iter().enumerate() {
            for b in &sites[i + 1..] {
                assert_ne!(a.slug(), b.slug());
            }
        }
    }
}
