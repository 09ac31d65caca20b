use crate::domain::model::CensusYears;
use crate::utils::error::{CensusError, Result};

pub const MIN_CENSUS_YEAR: i32 = 1;
pub const MAX_CENSUS_YEAR: i32 = 9999;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CensusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CensusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CensusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 兩個普查年份必須在合理範圍內且互不相同
pub fn validate_census_years(years: &CensusYears) -> Result<()> {
    validate_range("earlier_year", years.earlier, MIN_CENSUS_YEAR, MAX_CENSUS_YEAR)?;
    validate_range("later_year", years.later, MIN_CENSUS_YEAR, MAX_CENSUS_YEAR)?;

    if years.earlier == years.later {
        return Err(CensusError::InvalidConfigValueError {
            field: "later_year".to_string(),
            value: years.later.to_string(),
            reason: "later_year must differ from earlier_year".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CensusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input_path", "./popu-pref.csv").is_ok());
        assert!(validate_path("input_path", "").is_err());
        assert!(validate_path("input_path", "  ").is_err());
        assert!(validate_path("input_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_census_years() {
        assert!(validate_census_years(&CensusYears::new(2010, 2015)).is_ok());
        // Reversed order is allowed; it only swaps which column is the baseline
        assert!(validate_census_years(&CensusYears::new(2015, 2010)).is_ok());
        assert!(validate_census_years(&CensusYears::new(2010, 2010)).is_err());
        assert!(validate_census_years(&CensusYears::new(0, 2010)).is_err());
        assert!(validate_census_years(&CensusYears::new(2010, 10_000)).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("pipeline.name", "prefecture-growth").is_ok());
        assert!(validate_non_empty_string("pipeline.name", " \t").is_err());
    }
}
