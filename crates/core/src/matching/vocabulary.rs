//! Fixed vocabulary used by the analyzers.
//!
//! Every keyword table is an ordered slice evaluated front to back; the first hit wins, so more
//! specific phrases must precede the shorter phrases they contain.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductLine {
    Vantage,
    Icon,
    Prestige,
    Heritage,
}

impl ProductLine {
    pub const ALL: [ProductLine; 4] = [Self::Vantage, Self::Icon, Self::Prestige, Self::Heritage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vantage => "VANTAGE",
            Self::Icon => "ICON",
            Self::Prestige => "PRESTIGE",
            Self::Heritage => "HERITAGE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Mah,
    Ahw,
    Afz,
    Oak,
    Olive,
}

impl Material {
    pub const ALL: [Material; 5] = [Self::Mah, Self::Ahw, Self::Afz, Self::Oak, Self::Olive];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Mah => "MAH",
            Self::Ahw => "AHW",
            Self::Afz => "AFZ",
            Self::Oak => "OAK",
            Self::Olive => "OLIVE",
        }
    }
}

/// Category prefixes recognised outright. Sorted longest first at first use.
const KNOWN_PREFIXES: &[&str] = &[
    "GBC", "GBCD", "TBC", "BBC", "SBC", "FBC", "MBC", "HPC", "GDC", "JFC", "HDC", "BATC",
    "COINSLAB",
];

pub static KNOWN_PREFIXES_LONGEST_FIRST: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut prefixes = KNOWN_PREFIXES.to_vec();
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    prefixes
});

/// Endings that mark an unknown leading letter run as a category code.
pub const PREFIX_SUFFIX_TOKENS: &[&str] = &["CASE", "BC", "DC", "FC", "PC"];

pub const PREFIX_MIN_LEN: usize = 2;
pub const PREFIX_MAX_LEN: usize = 6;

/// `B12-...` codes belong to a separate numbering scheme and carry no category prefix.
pub static BIN_CODE_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^B[0-9]{1,3}-").expect("valid bin code regex"));

pub static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

/// Single-letter packaging variants of the same physical item.
pub const VARIANT_SUFFIXES: &[&str] = &["-P", "-R"];

/// Suffixes grouping items for display purposes only.
pub const DISPLAY_GROUP_SUFFIXES: &[&str] = &["-BALL", "-PUCK", "-SET", "-DUO"];

/// Leading SKU segments that name a line rather than a category.
pub const LEGACY_LINE_CODES: &[&str] = &["PTB", "GBL", "PRM", "HRT", "CLS"];

pub const PRODUCT_LINE_KEYWORDS: &[(&str, ProductLine)] = &[
    ("vantage", ProductLine::Vantage),
    ("icon", ProductLine::Icon),
    ("prestige", ProductLine::Prestige),
    ("heritage", ProductLine::Heritage),
    ("turf base", ProductLine::Vantage),
    ("gloss black", ProductLine::Icon),
    ("piano black", ProductLine::Icon),
    ("glass dome", ProductLine::Prestige),
    ("classic wood", ProductLine::Heritage),
    ("solid wood", ProductLine::Heritage),
];

pub const MATERIAL_KEYWORDS: &[(&str, Material)] = &[
    ("african hardwood", Material::Ahw),
    ("hardwood", Material::Ahw),
    ("mahogany", Material::Mah),
    ("afzelia", Material::Afz),
    ("doussie", Material::Afz),
    ("oak", Material::Oak),
    ("olive", Material::Olive),
];

pub const BACKGROUND_KEYWORDS: &[(&str, &str)] = &[
    ("hole in one", "HOLE_IN_ONE"),
    ("albatross", "ALBATROSS"),
    ("eagle", "EAGLE"),
    ("birdie", "BIRDIE"),
    ("course map", "COURSE_MAP"),
    ("course layout", "COURSE_MAP"),
    ("scorecard", "SCORECARD"),
    ("score card", "SCORECARD"),
    ("world map", "WORLD_MAP"),
];

/// Background codes that appear as whole SKU segments.
pub const BACKGROUND_CODES: &[(&str, &str)] = &[
    ("HIO", "HOLE_IN_ONE"),
    ("ALB", "ALBATROSS"),
    ("EAGLE", "EAGLE"),
    ("BIRDIE", "BIRDIE"),
    ("MAP", "COURSE_MAP"),
];

pub const SPORT_KEYWORDS: &[(&str, &str)] = &[
    ("golf", "GOLF"),
    ("tennis", "TENNIS"),
    ("basketball", "BASKETBALL"),
    ("baseball", "BASEBALL"),
    ("softball", "SOFTBALL"),
    ("football", "FOOTBALL"),
    ("soccer", "SOCCER"),
    ("rugby", "RUGBY"),
    ("cricket", "CRICKET"),
    ("hockey", "HOCKEY"),
];

/// Non-core categories that never take part in matching.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "necklace",
    "bracelet",
    "earring",
    "pendant",
    "jewellery",
    "jewelry",
    "anklet",
    "brooch",
    "challenge coin",
    "coin ring",
];

pub struct LegacyPattern {
    pub pattern: Regex,
    pub line: ProductLine,
    pub note: &'static str,
}

pub static LEGACY_PATTERNS: LazyLock<Vec<LegacyPattern>> = LazyLock::new(|| {
    [
        (
            r"^PTB-",
            ProductLine::Vantage,
            "PTB (Premium Turf Base) codes were renamed to the VANTAGE line",
        ),
        (r"^GBL-", ProductLine::Icon, "GBL (Gloss Black) codes were renamed to the ICON line"),
        (r"^PRM-", ProductLine::Prestige, "PRM (Premium Dome) codes predate the PRESTIGE naming"),
        (r"^(HRT|CLS)-", ProductLine::Heritage, "HRT/CLS (Classic) codes were folded into HERITAGE"),
        (r"-TB(-[PR])?$", ProductLine::Vantage, "trailing TB (turf base) marker predates VANTAGE"),
    ]
    .into_iter()
    .map(|(pattern, line, note)| LegacyPattern {
        pattern: Regex::new(pattern).expect("valid legacy pattern"),
        line,
        note,
    })
    .collect()
});

/// Materials that replaced one another as suppliers changed; any two are interchangeable.
pub const EQUIVALENT_MATERIALS: &[Material] = &[Material::Mah, Material::Ahw, Material::Afz];
