// src/extract/classify.rs
//
// Keyword classifiers shared by the per-site extractors. All of them work
// by substring membership on the listing's flattened text; anything that
// matches nothing stays at the placeholder.

/// Keyword → canonical label, tested in order on the lowercased text.
const PROPERTY_TYPES: &[(&str, &str)] = &[
    ("appartement", "Appartement"),
    ("villa", "Villa"),
    ("maison", "Maison"),
    ("duplex", "Duplex"),
    ("terrain", "Terrain"),
    ("studio", "Studio"),
    ("bureau", "Bureau"),
    ("magasin", "Local commercial"),
    ("local", "Local commercial"),
];

/// Known neighborhoods of Nouakchott, checked verbatim against the text.
pub const NEIGHBORHOODS: &[&str] = &[
    "Tevragh Zeina",
    "Arafat",
    "Dar Naim",
    "Teyarett",
    "Toujounine",
    "Ksar",
    "Sebkha",
    "El Mina",
    "Riyad",
    "Cité Plage",
    "Ilot K",
];

/// Arabic neighborhood names as they appear on Arabic-language sites.
pub const NEIGHBORHOODS_AR: &[(&str, &str)] = &[
    ("تفرغ زينة", "Tevragh Zeina"),
    ("دار النعيم", "Dar Naim"),
    ("لكصر", "Ksar"),
    ("الميناء", "El Mina"),
    ("السبخة", "Sebkha"),
    ("تيارت", "Teyarett"),
    ("الرياض", "Riyad"),
    ("عرفات", "Arafat"),
    ("توجنين", "Toujounine"),
];

/// Arabic property-type labels used by elminassa.
pub const PROPERTY_TYPES_AR: &[(&str, &str)] = &[
    ("قطعة أرضية", "Terrain"),
    ("منزل", "Maison"),
    ("شقة", "Appartement"),
    ("مكتب", "Bureau"),
    ("محل تجاري", "Local commercial"),
];

/// Vocabulary that marks a listing as real estate at all.
const HOUSING_KEYWORDS: &[&str] = &[
    "appartement",
    "villa",
    "maison",
    "duplex",
    "terrain",
    "studio",
    "chambre",
    "bureau",
    "local",
    "immeuble",
    "logement",
];

/// Construction-trade services that share the housing vocabulary but are
/// not listings.
const EXCLUDED_SERVICES: &[&str] = &["ingénieur", "bâtiment", "chantier", "construction", "agence"];

pub fn property_type(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    PROPERTY_TYPES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, label)| *label)
}

pub fn property_type_ar(text: &str) -> Option<&'static str> {
    PROPERTY_TYPES_AR
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, label)| *label)
}

/// Sale vs. rent, from the wording of the title/description.
pub fn transaction_type(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    if lower.contains("louer") || lower.contains("location") {
        Some("Location")
    } else if lower.contains("vendre") || lower.contains("vente") {
        Some("Vente")
    } else {
        None
    }
}

pub fn neighborhood(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    NEIGHBORHOODS
        .iter()
        .find(|q| lower.contains(&q.to_lowercase()))
        .copied()
}

pub fn neighborhood_ar(text: &str) -> Option<&'static str> {
    NEIGHBORHOODS_AR
        .iter()
        .find(|(ar, _)| text.contains(ar))
        .map(|(_, fr)| *fr)
}

/// Defaults to Nouakchott: all sources are overwhelmingly capital listings.
pub fn city(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("nouadhibou") || lower.contains("nouâdhibou") {
        "Nouadhibou"
    } else {
        "Nouakchott"
    }
}

/// The filtering extractor variant: keep only text that carries a housing
/// keyword and none of the excluded service keywords.
pub fn is_real_estate(text: &str) -> bool {
    let lower = text.to_lowercase();
    let housing = HOUSING_KEYWORDS.iter().any(|k| lower.contains(k));
    let service = EXCLUDED_SERVICES.iter().any(|k| lower.contains(k));
    housing && !service
}
