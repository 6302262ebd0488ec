//! Attribute normalisers
//!
//! A rule may name a normaliser that derives extra attributes from the
//! match text and its captures, e.g. an ISO date from `day`/`month`/`year`.

use std::collections::BTreeMap;
use std::str::FromStr;

/// Available normalisers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// `day`, `month`, `year` captures → `iso_date`
    GermanDate,
    /// Match text upper-cased → `normalized`
    Uppercase,
    /// Whitespace runs collapsed to one space → `normalized`
    CollapseWhitespace,
}

impl FromStr for Normalizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "german_date" => Ok(Normalizer::GermanDate),
            "uppercase" => Ok(Normalizer::Uppercase),
            "collapse_whitespace" => Ok(Normalizer::CollapseWhitespace),
            other => Err(format!(
                "unknown normalizer '{other}' (expected german_date, uppercase or collapse_whitespace)"
            )),
        }
    }
}

impl Normalizer {
    /// Add derived attributes for one match
    pub fn apply(&self, text: &str, attributes: &mut BTreeMap<String, String>) {
        match self {
            Normalizer::GermanDate => {
                if let Some(iso) = german_date(attributes) {
                    attributes.insert("iso_date".to_string(), iso);
                }
            }
            Normalizer::Uppercase => {
                attributes.insert("normalized".to_string(), text.to_uppercase());
            }
            Normalizer::CollapseWhitespace => {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                attributes.insert("normalized".to_string(), collapsed);
            }
        }
    }
}

fn german_date(attributes: &BTreeMap<String, String>) -> Option<String> {
    let day: u32 = attributes.get("day")?.trim_end_matches('.').parse().ok()?;
    let month = month_number(attributes.get("month")?)?;
    let year: u32 = attributes.get("year")?.trim_end_matches('.').parse().ok()?;

    if !(1000..=9999).contains(&year) || day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

fn month_number(raw: &str) -> Option<u32> {
    let name = raw.trim().trim_end_matches('.').to_lowercase();
    if let Ok(n) = name.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let n = match name.as_str() {
        "januar" | "jänner" | "jan" | "jän" => 1,
        "februar" | "feber" | "feb" => 2,
        "märz" | "maerz" | "mär" | "mrz" => 3,
        "april" | "apr" => 4,
        "mai" => 5,
        "juni" | "jun" => 6,
        "juli" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "oktober" | "okt" => 10,
        "november" | "nov" => 11,
        "dezember" | "dez" => 12,
        _ => return None,
    };
    Some(n)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("german_date".parse::<Normalizer>(), Ok(Normalizer::GermanDate));
        assert!("iso".parse::<Normalizer>().unwrap_err().contains("unknown normalizer"));
    }

    #[test]
    fn test_german_date_from_month_name() {
        let mut a = attrs(&[("day", "24."), ("month", "Dezember"), ("year", "2023")]);
        Normalizer::GermanDate.apply("24. Dezember 2023", &mut a);
        assert_eq!(a["iso_date"], "2023-12-24");
    }

    #[test]
    fn test_german_date_numeric_and_abbreviated() {
        let mut a = attrs(&[("day", "1"), ("month", "3"), ("year", "2024")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert_eq!(a["iso_date"], "2024-03-01");

        let mut a = attrs(&[("day", "7"), ("month", "Okt."), ("year", "2021")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert_eq!(a["iso_date"], "2021-10-07");
    }

    #[test]
    fn test_invalid_calendar_date_is_skipped() {
        let mut a = attrs(&[("day", "30"), ("month", "Februar"), ("year", "2024")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert!(!a.contains_key("iso_date"));

        let mut a = attrs(&[("day", "29"), ("month", "Februar"), ("year", "2024")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert_eq!(a["iso_date"], "2024-02-29");

        let mut a = attrs(&[("day", "29"), ("month", "Februar"), ("year", "1900")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert!(!a.contains_key("iso_date"));
    }

    #[test]
    fn test_missing_capture_is_skipped() {
        let mut a = attrs(&[("day", "1"), ("year", "2024")]);
        Normalizer::GermanDate.apply("", &mut a);
        assert!(!a.contains_key("iso_date"));
    }

    #[test]
    fn test_text_normalizers() {
        let mut a = BTreeMap::new();
        Normalizer::Uppercase.apply("Bverfg", &mut a);
        assert_eq!(a["normalized"], "BVERFG");

        let mut a = BTreeMap::new();
        Normalizer::CollapseWhitespace.apply("OBERLANDESGERICHT\nKARLSRUHE", &mut a);
        assert_eq!(a["normalized"], "OBERLANDESGERICHT KARLSRUHE");
    }
}
