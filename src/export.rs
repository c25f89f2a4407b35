// CSV export of the filtered view, original column order preserved.

use crate::config::EXPORT_COLUMNS;
use crate::data::PrivateLaw;
use anyhow::{Context, Result};

/// Download filename for a given year range
pub fn export_filename(year_from: i32, year_to: i32) -> String {
    format!("private_laws_{}_{}.csv", year_from, year_to)
}

/// Serialize the filtered rows back out as CSV, with the same column set
/// and order as the input contract.
pub fn export_csv(laws: &[&PrivateLaw]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(EXPORT_COLUMNS)
        .context("Failed to write CSV header")?;

    for law in laws {
        wtr.write_record([
            opt_num(law.congress).as_str(),
            opt_num(law.volume).as_str(),
            opt_num(law.chapter).as_str(),
            law.title.as_str(),
            law.date.as_str(),
            law.year.map(|y| y.to_string()).unwrap_or_default().as_str(),
            law.subject_category.as_str(),
            law.relief_category.as_str(),
            law.summary.as_str(),
            law.pdf_link.as_str(),
            law.details_link.as_str(),
        ])
        .context("Failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("Exported CSV was not valid UTF-8")
}

fn opt_num(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::filters::FilterState;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(1789, 2025), "private_laws_1789_2025.csv");
    }

    #[test]
    fn test_export_header_preserves_column_order() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "congress,volume,chapter,title,date,year,subject_category,relief_category,summary,pdf_link,details_link"
        );
    }

    #[test]
    fn test_export_contains_exactly_the_filtered_rows() {
        let dataset = Dataset::sample(300);
        let mut state = FilterState::new(1900, 1960);
        state.subject = Some("Defense".to_string());

        let filtered = state.apply(&dataset.laws);
        let csv = export_csv(&filtered).unwrap();

        let data_rows = csv.lines().count() - 1;
        assert_eq!(
            data_rows,
            filtered.len(),
            "Export must contain exactly the visible rows"
        );
    }

    #[test]
    fn test_export_round_trips_through_the_loader() {
        let dataset = Dataset::sample(50);
        let state = FilterState::new(1789, 2025);
        let filtered = state.apply(&dataset.laws);

        let csv = export_csv(&filtered).unwrap();

        let path = std::env::temp_dir().join("private_laws_test_roundtrip.csv");
        std::fs::write(&path, &csv).unwrap();
        let reloaded = Dataset::load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(reloaded.len(), 50);
        assert_eq!(reloaded.laws[0].title, dataset.laws[0].title);
        assert_eq!(reloaded.laws[0].year, dataset.laws[0].year);
        assert_eq!(reloaded.laws[0].subject_category, dataset.laws[0].subject_category);
    }

    #[test]
    fn test_titles_with_commas_stay_quoted() {
        let mut dataset = Dataset::sample(1);
        dataset.laws[0].title = "An Act for the Relief of Smith, Jones, and Co.".to_string();

        let refs: Vec<_> = dataset.laws.iter().collect();
        let csv = export_csv(&refs).unwrap();

        assert!(csv.contains("\"An Act for the Relief of Smith, Jones, and Co.\""));
    }
}
