use crate::core::aggregator::Aggregator;
use crate::domain::model::{CensusYears, OutputFormat, RankingReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A lazy sequence of raw text lines, pulled one at a time.
pub trait LineSource: Send {
    fn next_line(&mut self) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

pub trait Storage: Send + Sync {
    type Lines: LineSource;

    fn open_lines(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Self::Lines>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives the whole rendered ranking in a single write.
pub trait OutputSink: Send + Sync {
    fn emit(&self, text: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn census_years(&self) -> CensusYears;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[OutputFormat];

    fn output_filename(&self, format: OutputFormat) -> String {
        format.default_filename().to_string()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Aggregator>;
    async fn transform(&self, aggregator: Aggregator) -> Result<RankingReport>;
    async fn load(&self, report: RankingReport) -> Result<String>;
}
