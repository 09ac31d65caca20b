use anyhow::{bail, Context};
use census_growth::core::ConfigProvider;
use census_growth::utils::{logger, validation::Validate};
use census_growth::{CensusPipeline, ConsoleSink, LocalStorage, RankEngine, TomlConfig};
use clap::Parser;
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml_rank")]
#[command(about = "Census growth ranking driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "census.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the input file from config
    #[arg(long)]
    input: Option<String>,

    /// Show what would be processed without reading the census file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if args.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_with_level(config.log_level(), config.json_logs());
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(input) = args.input {
        tracing::info!("🔧 Input overridden to: {}", input);
        config.source.path = input;
    }

    if let Err(e) = config.validate() {
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        bail!("{}", e.user_friendly_message());
    }

    display_config_summary(&config, args.dry_run);

    if args.dry_run {
        let exists = Path::new(config.input_path()).is_file();
        eprintln!(
            "🔍 Dry run: input {} {}",
            config.input_path(),
            if exists { "found" } else { "NOT found" }
        );
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = CensusPipeline::new(LocalStorage::default(), ConsoleSink, config);
    let engine = RankEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await.map_err(|e| {
        anyhow::anyhow!("{} ({})", e.user_friendly_message(), e.recovery_suggestion())
    })?;

    Ok(())
}

// 摘要輸出到 stderr，避免混入排名結果
fn display_config_summary(config: &TomlConfig, dry_run: bool) {
    let years = config.census_years();
    eprintln!("📋 Configuration Summary:");
    eprintln!("  Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        eprintln!("  Description: {}", description);
    }
    eprintln!("  Source: {}", config.input_path());
    eprintln!("  Years: {} => {}", years.earlier, years.later);

    match config.output_path() {
        Some(path) => {
            let formats: Vec<String> = config
                .output_formats()
                .iter()
                .map(|f| format!("{} ({})", f, config.output_filename(*f)))
                .collect();
            eprintln!("  Output: {} [{}]", path, formats.join(", "));
        }
        None => eprintln!("  Output: stdout only"),
    }

    if dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }
    eprintln!();
}
