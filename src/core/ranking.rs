use crate::core::aggregator::FinalizedRegions;
use crate::domain::model::{GrowthRecord, RankedRegion};
use std::cmp::Ordering;

pub const REGION_SEPARATOR: &str = ";";
pub const POPULATION_ARROW: &str = "=>";
pub const RATIO_LABEL: &str = "growth ratio";

/// Orders finalized regions by growth ratio and renders display lines.
pub struct RankingFormatter;

impl RankingFormatter {
    /// Descending by ratio. The sort is stable, so ties keep first-seen order.
    pub fn rank(regions: FinalizedRegions) -> Vec<RankedRegion> {
        let mut pairs: Vec<(String, GrowthRecord)> = regions.into_regions().into_iter().collect();
        pairs.sort_by(|(_, a), (_, b)| compare_ratio_desc(a.ratio_or_nan(), b.ratio_or_nan()));

        pairs
            .into_iter()
            .enumerate()
            .map(|(index, (region, record))| RankedRegion {
                rank: index + 1,
                region,
                record,
            })
            .collect()
    }

    /// `<region>;<earlier>=><later>growth ratio<ratio>`
    pub fn format(entry: &RankedRegion) -> String {
        let record = &entry.record;
        format!(
            "{}{}{}{}{}{}{}",
            entry.region,
            REGION_SEPARATOR,
            format_population(record.earlier_population),
            POPULATION_ARROW,
            format_population(record.later_population),
            RATIO_LABEL,
            format_ratio(record.ratio_or_nan()),
        )
    }

    pub fn format_all(entries: &[RankedRegion]) -> Vec<String> {
        entries.iter().map(Self::format).collect()
    }
}

/// +∞ first, then finite values descending, then -∞, NaN last.
pub fn compare_ratio_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

pub fn format_population(population: Option<i64>) -> String {
    population.map_or_else(|| "NaN".to_string(), |p| p.to_string())
}

pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_nan() {
        "NaN".to_string()
    } else if ratio == f64::INFINITY {
        "Infinity".to_string()
    } else if ratio == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        ratio.to_string()
    }
}
