use crate::domain::model::{
    CensusYears, GrowthRecord, IngestStats, Observation, ParsedLine, RegionMap,
};

/// Ingesting phase: collects per-region populations for the two census years.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    years: CensusYears,
    regions: RegionMap,
    stats: IngestStats,
}

impl Aggregator {
    pub fn new(years: CensusYears) -> Self {
        Self {
            years,
            regions: RegionMap::new(),
            stats: IngestStats::default(),
        }
    }

    /// Feeds one parsed line; ignored lines are only counted.
    pub fn ingest(&mut self, line: ParsedLine) {
        self.stats.lines_read += 1;
        match line {
            ParsedLine::Observed(observation) => self.observe(observation),
            ParsedLine::Ignored => self.stats.lines_ignored += 1,
        }
    }

    /// 同一地區同一年份重複出現時，以後出現者為準
    pub fn observe(&mut self, observation: Observation) {
        if !self.years.contains(i64::from(observation.year)) {
            tracing::trace!("Dropping observation for untracked year {}", observation.year);
            return;
        }

        self.stats.observations += 1;
        let record = self.regions.entry(observation.region).or_default();
        if observation.year == self.years.earlier {
            record.earlier_population = observation.population;
        }
        if observation.year == self.years.later {
            record.later_population = observation.population;
        }
    }

    pub fn years(&self) -> CensusYears {
        self.years
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Computes every region's ratio. Consumes the aggregator, so it runs exactly once.
    pub fn finalize(self) -> FinalizedRegions {
        let mut regions = self.regions;
        for record in regions.values_mut() {
            record.ratio = Some(record.compute_ratio());
        }

        tracing::debug!("Finalized growth ratios for {} regions", regions.len());
        FinalizedRegions {
            years: self.years,
            regions,
            stats: self.stats,
        }
    }
}

/// Finalized phase: every record carries its ratio.
#[derive(Debug, Clone)]
pub struct FinalizedRegions {
    years: CensusYears,
    regions: RegionMap,
    stats: IngestStats,
}

impl FinalizedRegions {
    pub fn years(&self) -> CensusYears {
        self.years
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn get(&self, region: &str) -> Option<&GrowthRecord> {
        self.regions.get(region)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn into_regions(self) -> RegionMap {
        self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(year: i32, region: &str, population: i64) -> Observation {
        Observation {
            year,
            region: region.to_string(),
            population: Some(population),
        }
    }

    #[test]
    fn test_observe_creates_and_updates_record() {
        let mut aggregator = Aggregator::new(CensusYears::default());
        aggregator.observe(obs(2010, "Tokyo", 13_000_000));

        let record = aggregator.regions()["Tokyo"];
        assert_eq!(record.earlier_population, Some(13_000_000));
        assert_eq!(record.later_population, Some(0));
        assert!(record.ratio.is_none());

        aggregator.observe(obs(2015, "Tokyo", 13_500_000));
        let record = aggregator.regions()["Tokyo"];
        assert_eq!(record.later_population, Some(13_500_000));
        assert_eq!(aggregator.regions().len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut aggregator = Aggregator::new(CensusYears::default());
        aggregator.observe(obs(2010, "Osaka", 1));
        aggregator.observe(obs(2010, "Osaka", 8_800_000));

        assert_eq!(
            aggregator.regions()["Osaka"].earlier_population,
            Some(8_800_000)
        );
    }

    #[test]
    fn test_ingest_counts_ignored_lines() {
        let mut aggregator = Aggregator::new(CensusYears::default());
        aggregator.ingest(ParsedLine::Ignored);
        aggregator.ingest(ParsedLine::Observed(obs(2015, "Kyoto", 10)));

        let stats = aggregator.stats();
        assert_eq!(stats.lines_read, 2);
        assert_eq!(stats.lines_ignored, 1);
        assert_eq!(stats.observations, 1);
    }

    #[test]
    fn test_untracked_year_leaves_state_unchanged() {
        let mut aggregator = Aggregator::new(CensusYears::default());
        aggregator.observe(obs(2012, "Nara", 10));
        assert!(aggregator.regions().is_empty());
        assert_eq!(aggregator.stats().observations, 0);
    }

    #[test]
    fn test_finalize_computes_ratios() {
        let mut aggregator = Aggregator::new(CensusYears::default());
        aggregator.observe(obs(2010, "Tokyo", 13_000_000));
        aggregator.observe(obs(2015, "Tokyo", 13_500_000));
        aggregator.observe(obs(2015, "NewTown", 100));

        let finalized = aggregator.finalize();
        assert_eq!(finalized.len(), 2);
        assert_eq!(
            finalized.get("Tokyo").and_then(|r| r.ratio),
            Some(13_500_000.0 / 13_000_000.0)
        );
        assert_eq!(
            finalized.get("NewTown").and_then(|r| r.ratio),
            Some(f64::INFINITY)
        );
    }

    #[test]
    fn test_finalize_empty() {
        let finalized = Aggregator::new(CensusYears::default()).finalize();
        assert!(finalized.is_empty());
    }
}
