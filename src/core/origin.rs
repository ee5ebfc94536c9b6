/// Place-of-origin generation from historical weight tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;

use crate::core::sampling::{chance, WeightedTable};
use crate::schema::origin::{Origin, JAPAN};

/// Share of wrestlers born in Japan.
pub const JAPANESE_PROBABILITY: f64 = 0.88;

/// Japanese prefectures: ISO 3166-2 code, name, historical weight.
pub const PREFECTURES: [(&str, &str, f64); 47] = [
    ("JP-01", "Hokkaido", 0.0746288441145281),
    ("JP-02", "Aomori", 0.043478260869565216),
    ("JP-03", "Iwate", 0.011532343584305408),
    ("JP-04", "Miyagi", 0.015906680805938492),
    ("JP-05", "Akita", 0.019353128313891833),
    ("JP-06", "Yamagata", 0.012725344644750796),
    ("JP-07", "Fukushima", 0.0165694591728526),
    ("JP-08", "Ibaraki", 0.027704135737009545),
    ("JP-09", "Tochigi", 0.013785790031813362),
    ("JP-10", "Gunma", 0.013123011664899258),
    ("JP-11", "Saitama", 0.03207847295864263),
    ("JP-12", "Chiba", 0.035790031813361614),
    ("JP-13", "Tokyo", 0.08059384941675504),
    ("JP-14", "Kanagawa", 0.035790031813361614),
    ("JP-15", "Niigata", 0.018027571580063628),
    ("JP-16", "Toyama", 0.0076882290562036056),
    ("JP-17", "Ishikawa", 0.011267232237539766),
    ("JP-18", "Fukui", 0.007555673382820784),
    ("JP-19", "Yamanashi", 0.008218451749734889),
    ("JP-20", "Nagano", 0.010339342523860021),
    ("JP-21", "Gifu", 0.01497879109225875),
    ("JP-22", "Shizuoka", 0.021474019088016966),
    ("JP-23", "Aichi", 0.05726405090137858),
    ("JP-24", "Mie", 0.014581124072110286),
    ("JP-25", "Shiga", 0.005567338282078473),
    ("JP-26", "Kyoto", 0.011532343584305408),
    ("JP-27", "Osaka", 0.0662778366914104),
    ("JP-28", "Hyogo", 0.03989925768822906),
    ("JP-29", "Nara", 0.0076882290562036056),
    ("JP-30", "Wakayama", 0.0076882290562036056),
    ("JP-31", "Tottori", 0.003181336161187699),
    ("JP-32", "Shimane", 0.005567338282078473),
    ("JP-33", "Okayama", 0.007820784729586427),
    ("JP-34", "Hiroshima", 0.010737009544008483),
    ("JP-35", "Yamaguchi", 0.014050901378579003),
    ("JP-36", "Tokushima", 0.006230116648992577),
    ("JP-37", "Kagawa", 0.006627783669141039),
    ("JP-38", "Ehime", 0.014183457051961824),
    ("JP-39", "Kochi", 0.010471898197242842),
    ("JP-40", "Fukuoka", 0.048117709437963944),
    ("JP-41", "Saga", 0.013123011664899258),
    ("JP-42", "Nagasaki", 0.017497348886532343),
    ("JP-43", "Kumamoto", 0.023064687168610817),
    ("JP-44", "Oita", 0.012195121951219513),
    ("JP-45", "Miyazaki", 0.015111346765641569),
    ("JP-46", "Kagoshima", 0.039766702014846236),
    ("JP-47", "Okinawa", 0.009146341463414634),
];

/// Foreign countries named explicitly: ISO 3166-1 alpha-2 code, name, weight.
pub const NAMED_COUNTRIES: [(&str, &str, f64); 11] = [
    ("BG", "Bulgaria", 0.03),
    ("BR", "Brazil", 0.03),
    ("CN", "China", 0.07),
    ("EE", "Estonia", 0.02),
    ("GE", "Georgia", 0.04),
    ("KP", "North Korea", 0.04),
    ("KZ", "Kazakhstan", 0.02),
    ("MN", "Mongolia", 0.55),
    ("RU", "Russia", 0.07),
    ("UA", "Ukraine", 0.02),
    ("US", "United States", 0.02),
];

/// Weight of the bucket covering every other nation.
pub const OTHER_COUNTRY_WEIGHT: f64 = 0.09;

/// Every ISO 3166-1 alpha-2 code.
pub const ISO_ALPHA2: [&str; 249] = [
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT",
    "AU", "AW", "AX", "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI",
    "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY",
    "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK",
    "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL",
    "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR",
    "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS",
    "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW",
    "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP",
    "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM",
    "SN", "SO", "SR", "SS", "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF",
    "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR", "TT", "TV", "TW",
    "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OriginError {
    #[error("{0} weights are degenerate")]
    DegenerateWeights(&'static str),
    #[error("no nations left for the other bucket")]
    NoOtherNations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForeignDraw {
    Named(&'static str),
    Other,
}

/// Draws origins: Japan with [`JAPANESE_PROBABILITY`], weighted by
/// prefecture; otherwise a weighted foreign country.
pub struct OriginGenerator {
    prefectures: WeightedTable<&'static str>,
    countries: WeightedTable<ForeignDraw>,
    others: Vec<&'static str>,
    rng: StdRng,
}

impl OriginGenerator {
    pub fn new(seed: u64) -> Result<Self, OriginError> {
        let prefectures = PREFECTURES.iter().map(|(code, _, w)| (*code, *w));
        let countries = NAMED_COUNTRIES
            .iter()
            .map(|(code, _, w)| (ForeignDraw::Named(*code), *w))
            .chain(std::iter::once((ForeignDraw::Other, OTHER_COUNTRY_WEIGHT)));

        let others = other_nations();
        if others.is_empty() {
            return Err(OriginError::NoOtherNations);
        }

        Ok(Self {
            prefectures: WeightedTable::new(prefectures)
                .ok_or(OriginError::DegenerateWeights("prefecture"))?,
            countries: WeightedTable::new(countries)
                .ok_or(OriginError::DegenerateWeights("country"))?,
            others,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate(&mut self) -> Origin {
        if chance(&mut self.rng, JAPANESE_PROBABILITY) {
            Origin::japan(self.prefectures.sample(&mut self.rng))
        } else {
            let code = match *self.countries.sample(&mut self.rng) {
                ForeignDraw::Named(code) => code,
                ForeignDraw::Other => self.others[self.rng.gen_range(0..self.others.len())],
            };
            Origin {
                nation_code: code.to_string(),
                subdivision_code: None,
            }
        }
    }
}

/// Nations eligible for the "other" bucket: neither Japan nor named.
pub fn other_nations() -> Vec<&'static str> {
    ISO_ALPHA2
        .iter()
        .copied()
        .filter(|code| *code != JAPAN && !NAMED_COUNTRIES.iter().any(|(named, _, _)| named == code))
        .collect()
}

pub fn prefecture_name(code: &str) -> Option<&'static str> {
    PREFECTURES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

pub fn country_name(code: &str) -> Option<&'static str> {
    if code == JAPAN {
        return Some("Japan");
    }
    NAMED_COUNTRIES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

/// "<Prefecture>, Japan", the country name, or the bare code.
impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.subdivision_code, self.is_japanese()) {
            (Some(sub), true) => {
                let name = prefecture_name(sub).unwrap_or(sub.as_str());
                write!(f, "{}, Japan", name)
            }
            _ => f.write_str(country_name(&self.nation_code).unwrap_or(self.nation_code.as_str())),
        }
    }
}
