use crate::config;
use crate::schema::{validate_headers, SchemaReport};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Date formats tried column-wide before falling back to per-row detection
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
];

/// One Congressional private law. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateLaw {
    pub id: u32,
    pub congress: Option<u32>,
    pub volume: Option<u32>,
    pub chapter: Option<u32>,
    pub title: String,
    /// Enactment date, normalized to YYYY-MM-DD when it parsed
    pub date: String,
    #[serde(skip)]
    pub enacted: Option<NaiveDate>,
    pub year: Option<i32>,
    /// Comma-separated list; a law may carry several subject labels
    pub subject_category: String,
    pub relief_category: String,
    pub summary: String,
    pub pdf_link: String,
    pub details_link: String,
}

impl PrivateLaw {
    /// Long-form date for the info panel, e.g. "June 14, 1956"
    pub fn display_date(&self) -> String {
        match self.enacted {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }

    /// Congress number with ordinal suffix, e.g. "84th"
    pub fn congress_display(&self) -> String {
        match self.congress {
            Some(n) => format!("{}{}", n, ordinal_suffix(n)),
            None => String::new(),
        }
    }
}

/// Raw CSV row - every field optional so absent columns are tolerated
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    congress: Option<String>,
    #[serde(default)]
    volume: Option<String>,
    #[serde(default)]
    chapter: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    subject_category: Option<String>,
    #[serde(default)]
    relief_category: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    pdf_link: Option<String>,
    #[serde(default)]
    details_link: Option<String>,
}

/// The in-memory table behind every dashboard view.
/// Loaded once at process start; all access afterwards is read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub laws: Vec<PrivateLaw>,
    pub schema: SchemaReport,
}

impl Dataset {
    pub fn load_csv(path: &Path) -> Result<Dataset> {
        let mut rdr = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file {:?}", path))?;

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let schema = validate_headers(&headers);
        if !schema.is_loadable() {
            bail!(
                "CSV {:?} has neither a 'date' nor a 'year' column; no timeline can be built",
                path
            );
        }
        for warning in &schema.warnings {
            println!("⚠ Column {}", warning);
        }

        let mut raw_records = Vec::new();
        for result in rdr.deserialize() {
            let record: RawRecord = result.context("Failed to deserialize private law row")?;
            raw_records.push(record);
        }

        let laws = build_laws(raw_records);

        println!("✓ Loaded {} records", laws.len());
        if let Some((min, max)) = year_range(&laws) {
            println!("✓ Year range: {} - {}", min, max);
        }

        Ok(Dataset { laws, schema })
    }

    pub fn from_laws(laws: Vec<PrivateLaw>) -> Dataset {
        Dataset {
            laws,
            schema: SchemaReport::default(),
        }
    }

    /// Seeded synthetic dataset used when no CSV is present.
    /// Year distribution is weighted toward the 1920-1970 peak of
    /// private-law activity.
    pub fn sample(n: usize) -> Dataset {
        let mut rng = StdRng::seed_from_u64(42);

        let first_names = ["John", "Mary", "James", "Elizabeth", "William", "Sarah"];
        let last_names = [
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        ];

        let mut laws = Vec::with_capacity(n);
        for i in 0..n {
            let year: i32 = match rng.gen_range(0..10) {
                0 => rng.gen_range(1789..1860),          // early
                1 | 2 => rng.gen_range(1860..1920),      // mid
                3..=7 => rng.gen_range(1920..1970),      // peak
                _ => rng.gen_range(1970..2025),          // modern
            };
            let congress = ((year - 1789) / 2 + 1) as u32;

            let n_cats: usize = match rng.gen_range(0..100) {
                0..=69 => 1,
                70..=94 => 2,
                _ => 3,
            };
            let mut cats: Vec<&str> = Vec::new();
            while cats.len() < n_cats {
                let cat = config::SUBJECT_CATEGORIES[rng.gen_range(0..config::SUBJECT_CATEGORIES.len())];
                if !cats.contains(&cat) {
                    cats.push(cat);
                }
            }

            let month = rng.gen_range(1..13u32);
            let day = rng.gen_range(1..29u32);
            let enacted = NaiveDate::from_ymd_opt(year, month, day);

            let volume = rng.gen_range(1..150u32);
            let page = rng.gen_range(1..1000u32);
            let law_number = rng.gen_range(1..500u32);

            laws.push(PrivateLaw {
                id: (i + 1) as u32,
                congress: Some(congress),
                volume: Some(volume),
                chapter: Some(rng.gen_range(1..500)),
                title: format!(
                    "An Act for the Relief of {} {}",
                    first_names[rng.gen_range(0..first_names.len())],
                    last_names[rng.gen_range(0..last_names.len())],
                ),
                date: enacted.map(|d| d.to_string()).unwrap_or_default(),
                enacted,
                year: Some(year),
                subject_category: cats.join(", "),
                relief_category: String::new(),
                summary: "This private law provides relief to the named individual(s).".to_string(),
                pdf_link: format!(
                    "https://www.govinfo.gov/content/pkg/STATUTE-{v}/pdf/STATUTE-{v}-Pg{page}.pdf",
                    v = volume,
                ),
                details_link: format!(
                    "https://www.congress.gov/bill/{congress}th-congress/private-law/{law_number}",
                ),
            });
        }

        laws.sort_by_key(|law| law.enacted);
        Dataset::from_laws(laws)
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    pub fn law_by_id(&self, id: u32) -> Option<&PrivateLaw> {
        self.laws.iter().find(|law| law.id == id)
    }

    /// Min/max year over records; falls back to the configured bounds
    /// when no record carries a year.
    pub fn year_bounds(&self) -> (i32, i32) {
        year_range(&self.laws).unwrap_or((config::YEAR_MIN, config::YEAR_MAX))
    }
}

fn year_range(laws: &[PrivateLaw]) -> Option<(i32, i32)> {
    let years: Vec<i32> = laws.iter().filter_map(|law| law.year).collect();
    let min = *years.iter().min()?;
    let max = *years.iter().max()?;
    Some((min, max))
}

/// Convert raw rows into laws: pick one date format for the whole column,
/// derive year from date, assign sequential ids where missing.
fn build_laws(raw_records: Vec<RawRecord>) -> Vec<PrivateLaw> {
    let column_format = detect_date_format(&raw_records);
    if let Some(fmt) = column_format {
        println!("✓ Parsed dates with format: {}", fmt);
    }

    let mut laws = Vec::with_capacity(raw_records.len());
    for (idx, raw) in raw_records.into_iter().enumerate() {
        let raw_date = raw.date.unwrap_or_default().trim().to_string();
        let enacted = match column_format {
            Some(fmt) => NaiveDate::parse_from_str(&raw_date, fmt).ok(),
            None => parse_date_any(&raw_date),
        };

        let year = raw
            .year
            .as_deref()
            .and_then(parse_int)
            .map(|y| y as i32)
            .or_else(|| enacted.map(|d| d.year()));

        laws.push(PrivateLaw {
            id: raw
                .id
                .as_deref()
                .and_then(parse_int)
                .unwrap_or((idx + 1) as u32),
            congress: raw.congress.as_deref().and_then(parse_int),
            volume: raw.volume.as_deref().and_then(parse_int),
            chapter: raw.chapter.as_deref().and_then(parse_int),
            title: raw.title.unwrap_or_default(),
            date: enacted.map(|d| d.to_string()).unwrap_or(raw_date),
            enacted,
            year,
            subject_category: raw.subject_category.unwrap_or_default(),
            relief_category: raw.relief_category.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            pdf_link: raw.pdf_link.unwrap_or_default(),
            details_link: raw.details_link.unwrap_or_default(),
        });
    }

    laws
}

/// First format that parses every non-empty date in the column.
/// Returns None for mixed-format files; those fall back to per-row detection.
fn detect_date_format(records: &[RawRecord]) -> Option<&'static str> {
    let dates: Vec<&str> = records
        .iter()
        .filter_map(|r| r.date.as_deref())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    if dates.is_empty() {
        return None;
    }

    DATE_FORMATS.iter().copied().find(|fmt| {
        dates
            .iter()
            .all(|d| NaiveDate::parse_from_str(d, fmt).is_ok())
    })
}

fn parse_date_any(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Lenient integer parse; tolerates the "84.0" floats pandas writes
/// for nullable integer columns.
fn parse_int(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as u32))
}

/// Ordinal suffix for congress display (1st, 2nd, 3rd, 4th, ..., 111th)
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Truncate text to `max_len` characters with an ellipsis.
pub fn truncate_label(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > max_len {
        let kept: String = chars[..max_len.saturating_sub(3)].iter().collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("private_laws_test_{}.csv", name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_year_derived_from_date_at_boundaries() {
        let path = temp_csv(
            "year_boundary",
            "congress,title,date,subject_category\n\
             84,An Act for the Relief of A,1955-12-31,Immigration\n\
             84,An Act for the Relief of B,1956-01-01,Immigration\n",
        );

        let dataset = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(dataset.laws[0].year, Some(1955), "Dec 31 stays in the old year");
        assert_eq!(dataset.laws[1].year, Some(1956), "Jan 1 belongs to the new year");
    }

    #[test]
    fn test_explicit_year_column_wins_over_derivation() {
        let path = temp_csv(
            "explicit_year",
            "title,date,year\nAn Act,1955-12-31,1999\n",
        );

        let dataset = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(dataset.laws[0].year, Some(1999));
    }

    #[test]
    fn test_load_is_idempotent() {
        let path = temp_csv(
            "idempotent",
            "congress,volume,chapter,title,date,subject_category\n\
             84,70,120,An Act for the Relief of Jane Doe,1956-06-14,Immigration\n\
             85,71,3,An Act for the Relief of John Roe,1957-02-02,\"Health, Immigration\"\n",
        );

        let first = Dataset::load_csv(&path).unwrap();
        let second = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(first.len(), second.len(), "Re-loading must not change the record count");
        assert_eq!(
            first.schema.missing, second.schema.missing,
            "Re-loading must not change the column set"
        );
        assert_eq!(first.laws[0].id, second.laws[0].id);
    }

    #[test]
    fn test_missing_date_and_year_is_a_startup_failure() {
        let path = temp_csv("no_year_axis", "congress,title\n84,An Act\n");

        let result = Dataset::load_csv(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err(), "A file with no year axis must be rejected");
    }

    #[test]
    fn test_column_wide_date_format_detection() {
        let path = temp_csv(
            "us_dates",
            "title,date\nAn Act A,06/14/1956\nAn Act B,12/01/1957\n",
        );

        let dataset = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        // %m/%d/%Y wins column-wide; 12/01 is December 1st, not January 12th
        assert_eq!(dataset.laws[1].enacted, NaiveDate::from_ymd_opt(1957, 12, 1));
        assert_eq!(dataset.laws[0].date, "1956-06-14", "Dates normalize to ISO");
    }

    #[test]
    fn test_mixed_formats_fall_back_to_per_row_parsing() {
        let path = temp_csv(
            "mixed_dates",
            "title,date\nAn Act A,1956-06-14\nAn Act B,12/01/1957\n",
        );

        let dataset = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(dataset.laws[0].year, Some(1956));
        assert_eq!(dataset.laws[1].year, Some(1957));
    }

    #[test]
    fn test_sequential_ids_assigned_when_column_absent() {
        let path = temp_csv("no_ids", "title,year\nAn Act A,1900\nAn Act B,1901\n");

        let dataset = Dataset::load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(dataset.laws[0].id, 1);
        assert_eq!(dataset.laws[1].id, 2);
        assert!(dataset.law_by_id(2).is_some());
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(111), "th");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 25), "short");
        assert_eq!(
            truncate_label("Banking, Finance, and Domestic Commerce", 20),
            "Banking, Finance,..."
        );
    }

    #[test]
    fn test_sample_data_is_deterministic() {
        let a = Dataset::sample(200);
        let b = Dataset::sample(200);

        assert_eq!(a.len(), 200);
        assert_eq!(a.laws[0].title, b.laws[0].title, "Seeded generation must be stable");
        assert_eq!(a.laws[150].year, b.laws[150].year);
    }

    #[test]
    fn test_sample_congress_matches_year() {
        let dataset = Dataset::sample(100);

        for law in &dataset.laws {
            let year = law.year.unwrap();
            let expected = ((year - 1789) / 2 + 1) as u32;
            assert_eq!(
                law.congress,
                Some(expected),
                "Congress number derives from the two-year session"
            );
        }
    }
}
