// Aggregations behind the dashboard charts: the timeline histogram and the
// subject/relief category breakdowns.

use crate::config::{RELIEF_CATEGORIES, SUBJECT_CATEGORIES};
use crate::data::{Dataset, PrivateLaw};
use crate::filters::{count_categories, CategoryKind, FilterState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Timeline x-axis: calendar year or congress number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineView {
    Year,
    Congress,
}

impl TimelineView {
    pub fn parse(value: &str) -> TimelineView {
        match value {
            "congress" => TimelineView::Congress,
            _ => TimelineView::Year,
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            TimelineView::Year => "Year",
            TimelineView::Congress => "Congress",
        }
    }
}

/// One timeline bar
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimelineBucket {
    pub bucket: i32,
    pub count: usize,
}

/// One breakdown bar: label, raw count, share of all assignments
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

/// Everything the chart panel needs for one filter state
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_laws: usize,
    pub timeline: Vec<TimelineBucket>,
    pub subject_breakdown: Vec<CategoryCount>,
    pub relief_breakdown: Vec<CategoryCount>,
    /// The relief column may be entirely unclassified; the UI shows a
    /// placeholder section in that case.
    pub has_relief_data: bool,
    /// True when a category filter is active (the timeline recolors)
    pub filter_active: bool,
}

/// Laws per year (or per congress), ascending by bucket.
/// Honors the year range and category filters but not search, matching
/// the chart behavior of the original dashboard.
pub fn timeline_counts(laws: &[PrivateLaw], state: &FilterState, view: TimelineView) -> Vec<TimelineBucket> {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();

    for law in laws {
        if !state.matches_categories(law) {
            continue;
        }
        let bucket = match view {
            TimelineView::Year => law.year,
            TimelineView::Congress => law.congress.map(|c| c as i32),
        };
        if let Some(bucket) = bucket {
            *buckets.entry(bucket).or_insert(0) += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(bucket, count)| TimelineBucket { bucket, count })
        .collect()
}

/// Category breakdown sorted by count descending, with each label's share
/// of total assignments. Respects the year range only: the breakdown keeps
/// showing every category so an active filter can be compared against rest.
pub fn category_breakdown(
    laws: &[PrivateLaw],
    state: &FilterState,
    kind: CategoryKind,
) -> Vec<CategoryCount> {
    let year_filtered: Vec<&PrivateLaw> =
        laws.iter().filter(|law| state.matches_year(law)).collect();

    let valid: &[&str] = match kind {
        CategoryKind::Subject => &SUBJECT_CATEGORIES,
        CategoryKind::Relief => &RELIEF_CATEGORIES,
    };

    let mut counts = count_categories(&year_filtered, kind, valid);
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total_assignments: usize = counts.iter().map(|(_, c)| c).sum();

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
            percentage: if total_assignments > 0 {
                count as f64 / total_assignments as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Assemble the full chart payload for one filter state.
pub fn dashboard_stats(dataset: &Dataset, state: &FilterState, view: TimelineView) -> DashboardStats {
    let total_laws = dataset
        .laws
        .iter()
        .filter(|law| state.matches_categories(law))
        .count();

    let relief_breakdown = category_breakdown(&dataset.laws, state, CategoryKind::Relief);
    let has_relief_data = relief_breakdown.iter().any(|c| c.count > 0);

    DashboardStats {
        total_laws,
        timeline: timeline_counts(&dataset.laws, state, view),
        subject_breakdown: category_breakdown(&dataset.laws, state, CategoryKind::Subject),
        relief_breakdown,
        has_relief_data,
        filter_active: state.has_category_filter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn sample_state() -> FilterState {
        FilterState::new(1789, 2025)
    }

    #[test]
    fn test_timeline_counts_sum_to_total() {
        let dataset = Dataset::sample(1000);
        let state = sample_state();

        let timeline = timeline_counts(&dataset.laws, &state, TimelineView::Year);
        let total: usize = timeline.iter().map(|b| b.count).sum();

        assert_eq!(total, 1000, "Every law lands in exactly one year bucket");
        for pair in timeline.windows(2) {
            assert!(pair[0].bucket < pair[1].bucket, "Buckets are ascending");
        }
    }

    #[test]
    fn test_timeline_respects_year_range() {
        let dataset = Dataset::sample(1000);
        let mut state = sample_state();
        state.year_from = 1920;
        state.year_to = 1969;

        let timeline = timeline_counts(&dataset.laws, &state, TimelineView::Year);

        assert!(!timeline.is_empty());
        assert!(timeline.iter().all(|b| b.bucket >= 1920 && b.bucket <= 1969));
    }

    #[test]
    fn test_congress_view_uses_congress_numbers() {
        let dataset = Dataset::sample(500);
        let state = sample_state();

        let timeline = timeline_counts(&dataset.laws, &state, TimelineView::Congress);

        // 1789-2025 spans congresses 1 through 119
        assert!(timeline.iter().all(|b| b.bucket >= 1 && b.bucket <= 119));
        let total: usize = timeline.iter().map(|b| b.count).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn test_breakdown_percentages_sum_to_100() {
        let dataset = Dataset::sample(1000);
        let state = sample_state();

        let breakdown = category_breakdown(&dataset.laws, &state, CategoryKind::Subject);
        let sum: f64 = breakdown.iter().map(|c| c.percentage).sum();

        assert!((sum - 100.0).abs() < 1e-6, "Shares must sum to 100, got {}", sum);
        for pair in breakdown.windows(2) {
            assert!(pair[0].count >= pair[1].count, "Breakdown sorts descending");
        }
    }

    #[test]
    fn test_breakdown_ignores_category_filter_but_not_years() {
        let dataset = Dataset::sample(1000);

        let mut filtered = sample_state();
        filtered.subject = Some("Health".to_string());
        let unfiltered = sample_state();

        let a = category_breakdown(&dataset.laws, &filtered, CategoryKind::Subject);
        let b = category_breakdown(&dataset.laws, &unfiltered, CategoryKind::Subject);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.count, y.count, "Breakdown shows all categories for comparison");
        }
    }

    #[test]
    fn test_sample_data_has_no_relief_classification() {
        let dataset = Dataset::sample(200);
        let stats = dashboard_stats(&dataset, &sample_state(), TimelineView::Year);

        assert!(!stats.has_relief_data, "Sample data leaves relief blank");
        assert_eq!(stats.total_laws, 200);
        assert!(!stats.filter_active);
    }
}
