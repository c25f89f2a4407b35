// Configuration constants for the Private Laws Dashboard
// Category label lists and dashboard defaults

/// Default CSV data file, relative to the working directory
pub const DATA_FILE: &str = "Private_Laws_Data.csv";

/// Fall back to seeded sample data when the CSV is missing (for testing)
pub const USE_SAMPLE_IF_MISSING: bool = true;

/// Number of sample records generated when the CSV is missing
pub const SAMPLE_RECORD_COUNT: usize = 5000;

/// Earliest year covered by the dataset (1st Congress)
pub const YEAR_MIN: i32 = 1789;

/// Latest year covered by the dataset
pub const YEAR_MAX: i32 = 2025;

/// Selectable table page sizes
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Default table page size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Server bind address
pub const SERVER_ADDR: &str = "0.0.0.0:8050";

// ============================================================================
// CATEGORY DEFINITIONS
// ============================================================================

/// Subject matter categories (Policy Agendas style major topics)
pub const SUBJECT_CATEGORIES: [&str; 21] = [
    "Macroeconomics",
    "Civil Rights, Minority Issues, and Civil Liberties",
    "Health",
    "Agriculture",
    "Labor and Employment",
    "Education",
    "Environment",
    "Energy",
    "Immigration",
    "Transportation",
    "Law, Crime, and Family Issues",
    "Social Welfare",
    "Community Development and Housing Ideas",
    "Banking, Finance, and Domestic Commerce",
    "Defense",
    "Space, Science, Technology, and Communications",
    "Foreign Trade",
    "International Affairs and Foreign Aid",
    "Government Operations",
    "Public Lands and Water Management",
    "District of Columbia Affairs",
];

/// Relief categories describing what the private law grants
pub const RELIEF_CATEGORIES: [&str; 20] = [
    "For Federal Government Service",
    "For Federal Contract Claims",
    "For Damage Caused by the Federal Government",
    "Federal Tax Relief",
    "Relief from Non-Tax Federal Monetary Obligations",
    "Real Property",
    "Chattel Property",
    "Patent Rights or Copyright",
    "Adjusting Immigration Status",
    "Bringing Claims Before Article III Court",
    "Bringing Claims Before an Existing, Non–Article III Tribunal",
    "Creating Ad Hoc Adjudication Process",
    "Directing Further Fact-Finding",
    "Statutory or Regulatory Procedures and Obligations",
    "Article III and non-Article III Procedures or Decisions",
    "Relief from Constitutional Disability",
    "Providing or Amending an Institutional Charter",
    "Granting a Divorce or Authorizing a Name Change",
    "Payment of Private Liabilities",
    "Providing Relief from Harm Caused by Natural or non-Natural Disasters",
];

/// Export column order - must match the input CSV contract
pub const EXPORT_COLUMNS: [&str; 11] = [
    "congress",
    "volume",
    "chapter",
    "title",
    "date",
    "year",
    "subject_category",
    "relief_category",
    "summary",
    "pdf_link",
    "details_link",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lists_are_unique() {
        let mut subjects: Vec<&str> = SUBJECT_CATEGORIES.to_vec();
        subjects.sort();
        subjects.dedup();
        assert_eq!(
            subjects.len(),
            SUBJECT_CATEGORIES.len(),
            "Subject categories must not contain duplicates"
        );

        let mut reliefs: Vec<&str> = RELIEF_CATEGORIES.to_vec();
        reliefs.sort();
        reliefs.dedup();
        assert_eq!(
            reliefs.len(),
            RELIEF_CATEGORIES.len(),
            "Relief categories must not contain duplicates"
        );
    }

    #[test]
    fn test_default_page_size_is_selectable() {
        assert!(
            PAGE_SIZES.contains(&DEFAULT_PAGE_SIZE),
            "Default page size must be one of the selectable sizes"
        );
    }
}
