use crate::core::ConfigProvider;
use crate::domain::model::{CensusYears, OutputFormat, DEFAULT_EARLIER_YEAR, DEFAULT_LATER_YEAR};
use crate::utils::error::{CensusError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub census: CensusConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CensusConfig {
    #[serde(default = "default_earlier_year")]
    pub earlier_year: i32,
    #[serde(default = "default_later_year")]
    pub later_year: i32,
}

fn default_earlier_year() -> i32 {
    DEFAULT_EARLIER_YEAR
}

fn default_later_year() -> i32 {
    DEFAULT_LATER_YEAR
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            earlier_year: DEFAULT_EARLIER_YEAR,
            later_year: DEFAULT_LATER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    #[serde(default)]
    pub output_formats: Vec<OutputFormat>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub text: Option<String>,
    pub csv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    #[serde(default)]
    pub json_logs: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CENSUS_DIR})，未定義者保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_census_years(&self.census_years()).map_err(|e| match e {
            CensusError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => CensusError::InvalidConfigValueError {
                field: format!("census.{}", field),
                value,
                reason,
            },
            other => other,
        })?;

        if let Some(output_path) = &self.load.output_path {
            validation::validate_path("load.output_path", output_path)?;
        } else if !self.load.output_formats.is_empty() {
            return Err(CensusError::MissingConfigError {
                field: "load.output_path".to_string(),
            });
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.json_logs).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn census_years(&self) -> CensusYears {
        CensusYears::new(self.census.earlier_year, self.census.later_year)
    }

    fn output_path(&self) -> Option<&str> {
        self.load.output_path.as_deref()
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }

    fn output_filename(&self, format: OutputFormat) -> String {
        let custom = self.load.filenames.as_ref().and_then(|names| match format {
            OutputFormat::Text => names.text.clone(),
            OutputFormat::Csv => names.csv.clone(),
            OutputFormat::Json => names.json.clone(),
        });
        custom.unwrap_or_else(|| format.default_filename().to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
