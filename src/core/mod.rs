pub mod aggregator;
pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod ranking;

pub use crate::domain::model::{GrowthRecord, Observation, ParsedLine, RankingReport, RegionMap};
pub use crate::domain::ports::{ConfigProvider, LineSource, OutputSink, Pipeline, Storage};
pub use crate::utils::error::Result;
