//! Population growth ranking over a line-oriented census file.
//!
//! A run reads `<year>,<region>,<population>,...` lines, keeps the populations of two
//! census years per region, computes `later / earlier` for every region and emits the
//! regions ordered by descending growth ratio.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{
    cli::{ConsoleSink, LocalStorage},
    toml_config::TomlConfig,
};

pub use self::core::{
    aggregator::{Aggregator, FinalizedRegions},
    etl::RankEngine,
    parser::LineParser,
    pipeline::CensusPipeline,
    ranking::RankingFormatter,
};
pub use domain::model::{CensusYears, GrowthRecord, OutputFormat, RankedRegion, RankingReport};
pub use utils::error::{CensusError, Result};
