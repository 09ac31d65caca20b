use census_growth::utils::error::ErrorSeverity;
use census_growth::utils::{logger, validation::Validate};
use census_growth::{CensusPipeline, CliConfig, ConsoleSink, LocalStorage, RankEngine};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    let pipeline = CensusPipeline::new(LocalStorage::default(), ConsoleSink, config);
    let engine = RankEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = engine.run().await {
        tracing::error!(
            "❌ Ranking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
