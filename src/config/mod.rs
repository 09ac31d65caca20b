pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{CensusYears, OutputFormat, DEFAULT_EARLIER_YEAR, DEFAULT_LATER_YEAR};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_PATH: &str = "./popu-pref.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "census-growth")]
#[command(about = "Rank regions by population growth between two census years")]
pub struct CliConfig {
    /// Census CSV file: <year>,<region>,<population>,...
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: String,

    /// Year whose population is the baseline
    #[arg(long, default_value_t = DEFAULT_EARLIER_YEAR)]
    pub earlier_year: i32,

    /// Year compared against the baseline
    #[arg(long, default_value_t = DEFAULT_LATER_YEAR)]
    pub later_year: i32,

    /// Directory to also save the ranking into
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export formats used with --output
    #[arg(long, value_enum, value_delimiter = ',', default_value = "text")]
    pub format: Vec<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn census_years(&self) -> CensusYears {
        CensusYears::new(self.earlier_year, self.later_year)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.format
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_census_years(&self.census_years())?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}
