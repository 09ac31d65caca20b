use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EARLIER_YEAR: i32 = 2010;
pub const DEFAULT_LATER_YEAR: i32 = 2015;

/// 追蹤的兩個普查年份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusYears {
    pub earlier: i32,
    pub later: i32,
}

impl CensusYears {
    pub fn new(earlier: i32, later: i32) -> Self {
        Self { earlier, later }
    }

    pub fn contains(&self, year: i64) -> bool {
        year == i64::from(self.earlier) || year == i64::from(self.later)
    }
}

impl Default for CensusYears {
    fn default() -> Self {
        Self::new(DEFAULT_EARLIER_YEAR, DEFAULT_LATER_YEAR)
    }
}

/// One accepted input row. `population` is `None` when the field was not numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub year: i32,
    pub region: String,
    pub population: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Observed(Observation),
    Ignored,
}

/// 單一地區兩個年份的人口快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub earlier_population: Option<i64>,
    pub later_population: Option<i64>,
    pub ratio: Option<f64>,
}

impl Default for GrowthRecord {
    fn default() -> Self {
        Self {
            earlier_population: Some(0),
            later_population: Some(0),
            ratio: None,
        }
    }
}

impl GrowthRecord {
    /// later / earlier under IEEE-754 rules: `N/0` is infinite, `0/0` and missing values are NaN.
    pub fn compute_ratio(&self) -> f64 {
        let as_float = |p: Option<i64>| p.map_or(f64::NAN, |v| v as f64);
        as_float(self.later_population) / as_float(self.earlier_population)
    }

    /// Ratio used for ordering; an unfinalized record sorts like NaN.
    pub fn ratio_or_nan(&self) -> f64 {
        self.ratio.unwrap_or(f64::NAN)
    }
}

/// Region name to growth record, in first-seen order.
pub type RegionMap = IndexMap<String, GrowthRecord>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub lines_read: usize,
    pub lines_ignored: usize,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRegion {
    pub rank: usize,
    pub region: String,
    #[serde(flatten)]
    pub record: GrowthRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub years: CensusYears,
    pub stats: IngestStats,
    pub entries: Vec<RankedRegion>,
    #[serde(skip)]
    pub rendered: Vec<String>,
}

impl RankingReport {
    /// 所有排名行合併為一次輸出的內容
    pub fn console_output(&self) -> String {
        let mut out = self.rendered.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Text => "ranking.txt",
            OutputFormat::Csv => "ranking.csv",
            OutputFormat::Json => "ranking.json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}
