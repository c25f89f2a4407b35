// Filtering and search over the in-memory law table.
// Category filters are substring containment on the multi-valued category
// text; search is case-insensitive substring over title/date/categories.

use crate::data::PrivateLaw;

/// Which category column a filter targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Subject,
    Relief,
}

impl CategoryKind {
    pub fn field<'a>(&self, law: &'a PrivateLaw) -> &'a str {
        match self {
            CategoryKind::Subject => &law.subject_category,
            CategoryKind::Relief => &law.relief_category,
        }
    }
}

/// The complete filter state behind every view: charts, table, and export
/// all derive from the same struct so they can never disagree.
#[derive(Debug, Clone)]
pub struct FilterState {
    /// Inclusive year range
    pub year_from: i32,
    pub year_to: i32,
    /// Selected subject category, if any
    pub subject: Option<String>,
    /// Selected relief category, if any
    pub relief: Option<String>,
    /// Free-text search; empty means no search
    pub search: String,
}

impl FilterState {
    pub fn new(year_from: i32, year_to: i32) -> Self {
        Self {
            year_from,
            year_to,
            subject: None,
            relief: None,
            search: String::new(),
        }
    }

    pub fn has_category_filter(&self) -> bool {
        self.subject.is_some() || self.relief.is_some()
    }

    /// Year range + category filters, without search.
    /// The timeline chart uses this subset.
    pub fn matches_categories(&self, law: &PrivateLaw) -> bool {
        if !self.matches_year(law) {
            return false;
        }
        if let Some(subject) = &self.subject {
            if !law.subject_category.contains(subject.as_str()) {
                return false;
            }
        }
        if let Some(relief) = &self.relief {
            if !law.relief_category.contains(relief.as_str()) {
                return false;
            }
        }
        true
    }

    pub fn matches_year(&self, law: &PrivateLaw) -> bool {
        match law.year {
            Some(year) => year >= self.year_from && year <= self.year_to,
            None => false,
        }
    }

    /// Full filter: year range, categories, and search text.
    pub fn matches(&self, law: &PrivateLaw) -> bool {
        self.matches_categories(law) && self.matches_search(law)
    }

    fn matches_search(&self, law: &PrivateLaw) -> bool {
        let query = self.search.trim();
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        law.title.to_lowercase().contains(&needle)
            || law.date.to_lowercase().contains(&needle)
            || law.subject_category.to_lowercase().contains(&needle)
            || law.relief_category.to_lowercase().contains(&needle)
    }

    /// Apply the full filter, preserving dataset order.
    pub fn apply<'a>(&self, laws: &'a [PrivateLaw]) -> Vec<&'a PrivateLaw> {
        laws.iter().filter(|law| self.matches(law)).collect()
    }
}

/// Clamp a 0-based page index against the filtered row count and return
/// `(page, row_offset)`. The page number and size both come straight from
/// the query string, so the arithmetic saturates instead of overflowing
/// and a page past the end lands on the last non-empty page.
pub fn page_offset(total: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let last_page = if total == 0 { 0 } else { (total - 1) / page_size };
    let page = page.min(last_page);
    (page, page.saturating_mul(page_size))
}

/// Count category assignments in a multi-valued column.
///
/// Labels are matched longest-first and each match consumes its text once,
/// so a label that is a substring of a longer one ("Health" inside a longer
/// label, say) is not double counted. Returns `(label, count)` in the order
/// of `valid_categories`.
pub fn count_categories<'a>(
    laws: &[&PrivateLaw],
    kind: CategoryKind,
    valid_categories: &[&'a str],
) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = valid_categories.iter().map(|c| (*c, 0)).collect();

    let mut by_length: Vec<&str> = valid_categories.to_vec();
    by_length.sort_by_key(|c| std::cmp::Reverse(c.len()));

    for law in laws {
        let value = kind.field(law).trim();
        if value.is_empty() {
            continue;
        }

        let mut remaining = value.to_string();
        for cat in &by_length {
            if remaining.contains(cat) {
                if let Some(entry) = counts.iter_mut().find(|(c, _)| c == cat) {
                    entry.1 += 1;
                }
                remaining = remaining.replacen(cat, "", 1);
            }
        }
    }

    counts
}
