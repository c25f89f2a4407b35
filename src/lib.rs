// Private Laws Dashboard - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod data;
pub mod export;
pub mod filters;
pub mod schema;
pub mod stats;
pub mod theme;

// Re-export commonly used types
pub use data::{ordinal_suffix, truncate_label, Dataset, PrivateLaw};
pub use export::{export_csv, export_filename};
pub use filters::{count_categories, page_offset, CategoryKind, FilterState};
pub use schema::{validate_headers, ColumnIssue, SchemaReport};
pub use stats::{
    category_breakdown, dashboard_stats, timeline_counts, CategoryCount, DashboardStats,
    TimelineBucket, TimelineView,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
