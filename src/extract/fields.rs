// src/extract/fields.rs
//
// Regex fallbacks over a container's flattened text, used when the
// structural lookup for a field finds nothing.

use crate::extract::classify::NEIGHBORHOODS;
use regex::Regex;
use std::sync::OnceLock;

fn surface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*m[²2]").unwrap())
}

fn bedrooms_re() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(?i)(\d+)\s*(?:chambres?|pi[èe]ces?)\b").unwrap(),
            Regex::new(r"(?i)chambres?\s*:?\s*(\d+)").unwrap(),
        ]
    })
}

fn bathrooms_re() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(?i)(\d+)\s*(?:salles? de bain|sdb|bains?|douches?|toilettes?)").unwrap(),
            Regex::new(r"(?i)salles? de bain\s*:?\s*(\d+)").unwrap(),
        ]
    })
}

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d[\d\s]*\d|\d)\s*(MRU|MRO|UM)").unwrap())
}

fn price_parts_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+[\s\d]*)\s*([A-Za-z]+)").unwrap())
}

fn date_res() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})").unwrap(),
            Regex::new(r"(\d{4}[/-]\d{1,2}[/-]\d{1,2})").unwrap(),
            Regex::new(
                r"(?i)(\d{1,2}\s+(?:janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre)\s+\d{4})",
            )
            .unwrap(),
        ]
    })
}

fn relative_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"il y a (\d+)\s+(?:heures?|jours?)").unwrap())
}

fn seller_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let quartiers = NEIGHBORHOODS.join("|");
        Regex::new(&format!(r"^(.+?)\s+(?:{quartiers})")).unwrap()
    })
}

/// Surface area, normalized to "<n> m²".
pub fn surface(text: &str) -> Option<String> {
    surface_re()
        .captures(text)
        .map(|c| format!("{} m²", &c[1]))
}

pub fn bedrooms(text: &str) -> Option<String> {
    bedrooms_re()
        .iter()
        .find_map(|re| re.captures(text))
        .map(|c| c[1].to_string())
}

pub fn bathrooms(text: &str) -> Option<String> {
    bathrooms_re()
        .iter()
        .find_map(|re| re.captures(text))
        .map(|c| c[1].to_string())
}

/// Free-text price: digit run plus a known currency token.
pub fn price(text: &str) -> Option<String> {
    price_re()
        .captures(text)
        .map(|c| format!("{} {}", c[1].trim(), &c[2]))
}

/// Normalizes a price element's text to "<digits> <currency>", dropping
/// thousand-separator spaces. Unrecognized shapes pass through as-is.
pub fn clean_price(text: &str) -> String {
    let text = text.trim();
    match price_parts_re().captures(text) {
        Some(c) => format!("{} {}", c[1].replace(' ', ""), &c[2]),
        None => text.to_string(),
    }
}

/// First absolute date found in the text (dd/mm/yyyy, yyyy-mm-dd, or a
/// spelled-out French month).
pub fn publication_date(text: &str) -> Option<String> {
    date_res()
        .iter()
        .find_map(|re| re.captures(text))
        .map(|c| c[1].to_string())
}

/// Relative dates like "il y a 3 jours", kept verbatim.
pub fn relative_date(text: &str) -> Option<String> {
    relative_date_re().find(text).map(|m| m.as_str().to_string())
}

/// Seller name: the text leading up to the first known neighborhood.
pub fn seller(text: &str) -> Option<String> {
    seller_re()
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_accepts_both_square_markers() {
        assert_eq!(surface("belle villa de 250 m² à Arafat"), Some("250 m²".into()));
        assert_eq!(surface("200m2 clôturé"), Some("200 m²".into()));
        assert_eq!(surface("pas de surface ici"), None);
    }

    #[test]
    fn bedroom_patterns() {
        assert_eq!(bedrooms("villa 4 chambres salon"), Some("4".into()));
        assert_eq!(bedrooms("Chambres : 3"), Some("3".into()));
        assert_eq!(bedrooms("appartement 5 pièces"), Some("5".into()));
        assert_eq!(bedrooms("sans détail"), None);
    }

    #[test]
    fn bathroom_patterns() {
        assert_eq!(bathrooms("2 salles de bain modernes"), Some("2".into()));
        assert_eq!(bathrooms("3 douches"), Some("3".into()));
        assert_eq!(bathrooms("1 sdb"), Some("1".into()));
    }

    #[test]
    fn price_fallback_over_text() {
        assert_eq!(price("loyer 150 000 UM négociable"), Some("150 000 UM".into()));
        assert_eq!(price("2500000 MRO"), Some("2500000 MRO".into()));
        assert_eq!(price("prix à discuter"), None);
    }

    #[test]
    fn clean_price_normalizes_separators() {
        assert_eq!(clean_price(" 1 500 000 MRU "), "1500000 MRU");
        assert_eq!(clean_price("Prix sur demande"), "Prix sur demande");
    }

    #[test]
    fn absolute_dates() {
        assert_eq!(publication_date("publié le 12/02/2026"), Some("12/02/2026".into()));
        assert_eq!(publication_date("mis en ligne 2026-02-12"), Some("2026-02-12".into()));
        assert_eq!(
            publication_date("ajouté le 12 février 2026"),
            Some("12 février 2026".into())
        );
        assert_eq!(publication_date("aucune date"), None);
    }

    #[test]
    fn relative_dates_kept_verbatim() {
        assert_eq!(relative_date("posté il y a 3 jours par Ahmed"), Some("il y a 3 jours".into()));
        assert_eq!(relative_date("il y a 1 heure"), Some("il y a 1 heure".into()));
    }

    #[test]
    fn seller_precedes_neighborhood() {
        assert_eq!(seller("Immo Sahel Tevragh Zeina il y a 2 jours"), Some("Immo Sahel".into()));
        assert_eq!(seller("Tevragh Zeina direct"), None);
    }
}
