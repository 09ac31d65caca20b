use crate::core::aggregator::Aggregator;
use crate::core::parser::LineParser;
use crate::core::ranking::{format_ratio, RankingFormatter};
use crate::core::{ConfigProvider, LineSource, OutputSink, Pipeline, Storage};
use crate::domain::model::{OutputFormat, ParsedLine, RankedRegion, RankingReport};
use crate::utils::error::Result;
use chrono::Utc;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;

/// 讀取普查檔案 → 彙總 → 排名輸出
pub struct CensusPipeline<S: Storage, O: OutputSink, C: ConfigProvider> {
    storage: S,
    sink: O,
    config: C,
}

impl<S: Storage, O: OutputSink, C: ConfigProvider> CensusPipeline<S, O, C> {
    pub fn new(storage: S, sink: O, config: C) -> Self {
        Self {
            storage,
            sink,
            config,
        }
    }

    async fn export(
        &self,
        dir: &str,
        format: OutputFormat,
        report: &RankingReport,
    ) -> Result<String> {
        let data = match format {
            OutputFormat::Text => report.console_output().into_bytes(),
            OutputFormat::Csv => render_csv(&report.entries)?,
            OutputFormat::Json => serde_json::to_vec_pretty(report)?,
        };

        let path = Path::new(dir)
            .join(self.config.output_filename(format))
            .to_string_lossy()
            .into_owned();
        tracing::debug!("Writing {} export ({} bytes) to {}", format, data.len(), path);
        self.storage.write_file(&path, &data).await?;
        Ok(path)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    region: &'a str,
    earlier_population: Option<i64>,
    later_population: Option<i64>,
    ratio: String,
}

fn render_csv(entries: &[RankedRegion]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    for entry in entries {
        wtr.serialize(CsvRow {
            rank: entry.rank,
            region: &entry.region,
            earlier_population: entry.record.earlier_population,
            later_population: entry.record.later_population,
            ratio: format_ratio(entry.record.ratio_or_nan()),
        })?;
    }
    let data = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(data)
}

#[async_trait::async_trait]
impl<S: Storage, O: OutputSink, C: ConfigProvider> Pipeline for CensusPipeline<S, O, C> {
    async fn extract(&self) -> Result<Aggregator> {
        let years = self.config.census_years();
        let parser = LineParser::new(years);
        let mut aggregator = Aggregator::new(years);

        tracing::debug!(
            "Reading census lines from {} (years {} and {})",
            self.config.input_path(),
            years.earlier,
            years.later
        );
        let mut lines = self.storage.open_lines(self.config.input_path()).await?;

        while let Some(line) = lines.next_line().await? {
            let parsed = parser.parse(&line);
            if matches!(parsed, ParsedLine::Ignored) {
                tracing::trace!("Ignoring line: {}", line);
            }
            aggregator.ingest(parsed);
        }

        Ok(aggregator)
    }

    async fn transform(&self, aggregator: Aggregator) -> Result<RankingReport> {
        let finalized = aggregator.finalize();
        let years = finalized.years();
        let stats = finalized.stats();

        let entries = RankingFormatter::rank(finalized);
        let rendered = RankingFormatter::format_all(&entries);

        Ok(RankingReport {
            generated_at: Utc::now(),
            source: self.config.input_path().to_string(),
            years,
            stats,
            entries,
            rendered,
        })
    }

    async fn load(&self, report: RankingReport) -> Result<String> {
        // 整份排名一次寫出
        self.sink.emit(&report.console_output()).await?;
        let mut destinations = vec!["stdout".to_string()];

        if let Some(dir) = self.config.output_path() {
            for format in self.config.output_formats() {
                let path = self.export(dir, *format, &report).await?;
                destinations.push(path);
            }
        }

        Ok(destinations.join(", "))
    }
}
