use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one pipeline run: ingest, finalize and rank, then report.
pub struct RankEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RankEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting census ranking run");

        // Extract
        let aggregator = self.pipeline.extract().await?;
        let stats = aggregator.stats();
        tracing::info!(
            "Read {} lines ({} ignored, {} observations) covering {} regions",
            stats.lines_read,
            stats.lines_ignored,
            stats.observations,
            aggregator.regions().len()
        );
        self.monitor.log_stats("ingest");

        // Transform
        let report = self.pipeline.transform(aggregator).await?;
        tracing::info!("Ranked {} regions", report.entries.len());
        self.monitor.log_stats("rank");

        // Load
        let destination = self.pipeline.load(report).await?;
        tracing::info!("Ranking written to: {}", destination);
        self.monitor.log_final_stats();

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::Aggregator;
    use crate::core::ranking::RankingFormatter;
    use crate::domain::model::{CensusYears, Observation, RankingReport};
    use chrono::Utc;
    use std::sync::Mutex;

    /// Records phase order instead of touching files.
    #[derive(Default)]
    struct PhaseRecorder {
        phases: Mutex<Vec<&'static str>>,
    }

    #[async_trait::async_trait]
    impl Pipeline for PhaseRecorder {
        async fn extract(&self) -> Result<Aggregator> {
            self.phases.lock().unwrap().push("extract");
            let mut aggregator = Aggregator::new(CensusYears::default());
            aggregator.observe(Observation {
                year: 2010,
                region: "Tokyo".to_string(),
                population: Some(10),
            });
            Ok(aggregator)
        }

        async fn transform(&self, aggregator: Aggregator) -> Result<RankingReport> {
            self.phases.lock().unwrap().push("transform");
            let finalized = aggregator.finalize();
            let (years, stats) = (finalized.years(), finalized.stats());
            let entries = RankingFormatter::rank(finalized);
            Ok(RankingReport {
                generated_at: Utc::now(),
                source: "memory".to_string(),
                years,
                stats,
                rendered: RankingFormatter::format_all(&entries),
                entries,
            })
        }

        async fn load(&self, report: RankingReport) -> Result<String> {
            self.phases.lock().unwrap().push("load");
            Ok(format!("{} entries", report.entries.len()))
        }
    }

    #[test]
    fn test_run_executes_phases_in_order() {
        let engine = RankEngine::new(PhaseRecorder::default());
        let destination = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(destination, "1 entries");
        assert_eq!(
            *engine.pipeline().phases.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }
}
