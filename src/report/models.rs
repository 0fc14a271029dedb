/// One neighborhood pulled out of the agent's report.
///
/// Only emitted once both a name and a price were seen for the area, so
/// `avg_price` is always set. `rental_yield_pct` falls back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodRecord {
    pub name: String,
    pub avg_price: f64,
    pub rental_yield_pct: f64,
}

/// Whole-text metrics, independent of the per-area records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    /// Mean of every plausible `N%` token in the text. `None` when there were none.
    pub avg_rental_yield_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    pub summary: SummaryMetrics,
    /// Distinct area names, in the order they first appeared.
    pub neighborhoods: Vec<String>,
    pub records: Vec<NeighborhoodRecord>,
}

impl ParsedReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top_neighborhoods(&self, n: usize) -> &[String] {
        &self.neighborhoods[..self.neighborhoods.len().min(n)]
    }

    pub fn max_price(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.avg_price)
            .fold(0.0, f64::max)
    }
}
