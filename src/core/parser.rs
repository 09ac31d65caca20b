use crate::domain::model::{CensusYears, Observation, ParsedLine};

pub const FIELD_DELIMITER: char = ',';

/// Turns one raw `<year>,<region>,<population>,...` line into a [`ParsedLine`].
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    years: CensusYears,
}

impl LineParser {
    pub fn new(years: CensusYears) -> Self {
        Self { years }
    }

    pub fn parse(&self, line: &str) -> ParsedLine {
        let mut fields = line.split(FIELD_DELIMITER);
        let (Some(year), Some(region), Some(population)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return ParsedLine::Ignored;
        };

        // 非數字的年份 (例如標題列) 在此被過濾
        let year = match parse_leading_int(year) {
            Some(year) if self.years.contains(year) => year,
            _ => return ParsedLine::Ignored,
        };

        ParsedLine::Observed(Observation {
            // contains() 已確認等於其中一個 i32 年份
            year: year as i32,
            region: region.to_string(),
            population: parse_leading_int(population),
        })
    }
}

/// Lenient integer parsing: skips leading whitespace (and a BOM), accepts an optional
/// sign, then reads digits up to the first non-digit. `None` when no digit is found
/// or the value does not fit in an `i64`.
pub fn parse_leading_int(token: &str) -> Option<i64> {
    let trimmed = token.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digit_count].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineParser {
        LineParser::new(CensusYears::new(2010, 2015))
    }

    #[test]
    fn test_parse_target_year_line() {
        let parsed = parser().parse("2010,Tokyo,13000000");
        assert_eq!(
            parsed,
            ParsedLine::Observed(Observation {
                year: 2010,
                region: "Tokyo".to_string(),
                population: Some(13_000_000),
            })
        );
    }

    #[test]
    fn test_other_years_are_ignored() {
        assert_eq!(parser().parse("2011,Tokyo,13000000"), ParsedLine::Ignored);
        assert_eq!(parser().parse("2005,Tokyo,13000000"), ParsedLine::Ignored);
    }

    #[test]
    fn test_header_line_is_ignored() {
        assert_eq!(
            parser().parse("集計年,都道府県名,10〜14歳の人口,15〜19歳の人口"),
            ParsedLine::Ignored
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let parsed = parser().parse("2015,北海道,225690,248565");
        let ParsedLine::Observed(observation) = parsed else {
            panic!("expected an observation");
        };
        assert_eq!(observation.region, "北海道");
        assert_eq!(observation.population, Some(225_690));
    }

    #[test]
    fn test_short_lines_are_rejected() {
        assert_eq!(parser().parse(""), ParsedLine::Ignored);
        assert_eq!(parser().parse("2010"), ParsedLine::Ignored);
        assert_eq!(parser().parse("2010,Tokyo"), ParsedLine::Ignored);
    }

    #[test]
    fn test_non_numeric_population_is_kept_as_missing() {
        let ParsedLine::Observed(observation) = parser().parse("2010,Tokyo,n/a") else {
            panic!("expected an observation");
        };
        assert_eq!(observation.population, None);
    }

    #[test]
    fn test_region_is_used_verbatim() {
        let ParsedLine::Observed(observation) = parser().parse("2010, Tokyo ,1") else {
            panic!("expected an observation");
        };
        assert_eq!(observation.region, " Tokyo ");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("2010"), Some(2010));
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("\u{feff}2010"), Some(2010));
        assert_eq!(parse_leading_int("13000000\r"), Some(13_000_000));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }
}
