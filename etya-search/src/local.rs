//! Built-in site content index.
//!
//! A fixed, ordered mapping from category key to the site's own articles.
//! Matching is a case-insensitive substring test over title and excerpt;
//! there is no ranking, so matches come back in index order.

use crate::types::{ContentRecord, Query, ResultSource};

/// Site content shipped with the station website, in display order.
const SITE_CONTENT: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "news",
        &[(
            "Latest Local News Update",
            "Breaking news from the local community with updates on current events...",
            "news.html",
        )],
    ),
    (
        "sports",
        &[
            (
                "Local Sports Championship",
                "The annual sports championship brings together teams from across the region...",
                "sports.html",
            ),
            (
                "Football League Updates",
                "Latest scores and standings from the regional football league...",
                "sports.html",
            ),
        ],
    ),
    (
        "business",
        &[
            (
                "Local Business Growth",
                "Small businesses in the area are showing remarkable growth this quarter...",
                "business.html",
            ),
            (
                "Economic Development News",
                "New initiatives to boost economic development in the region...",
                "business.html",
            ),
        ],
    ),
    (
        "politics",
        &[
            (
                "Political Developments",
                "Recent political changes and their impact on the community...",
                "politics.html",
            ),
            (
                "Community Leadership Changes",
                "New leadership appointments and their vision for the community...",
                "politics.html",
            ),
        ],
    ),
];

/// One article in the local index, before category and source are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    /// Article title.
    pub title: String,
    /// Short summary.
    pub excerpt: String,
    /// Page-relative link, e.g. `news.html`.
    pub url: String,
}

impl LocalEntry {
    /// Convenience constructor.
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            url: url.into(),
        }
    }

    fn matches(&self, folded_query: &str) -> bool {
        self.title.to_lowercase().contains(folded_query)
            || self.excerpt.to_lowercase().contains(folded_query)
    }
}

#[derive(Debug, Clone)]
struct Category {
    label: String,
    entries: Vec<LocalEntry>,
}

/// Read-only index of site content grouped by category.
#[derive(Debug, Clone)]
pub struct LocalIndex {
    categories: Vec<Category>,
}

impl LocalIndex {
    /// Build an index from `(category key, entries)` pairs, keeping order.
    ///
    /// Keys with no characters are skipped, since every local record must
    /// carry a category label.
    pub fn new<K: AsRef<str>>(categories: impl IntoIterator<Item = (K, Vec<LocalEntry>)>) -> Self {
        let categories = categories
            .into_iter()
            .filter_map(|(key, entries)| {
                let label = capitalize(key.as_ref());
                if label.is_empty() {
                    tracing::warn!("skipping local content category with empty key");
                    return None;
                }
                Some(Category { label, entries })
            })
            .collect();
        Self { categories }
    }

    /// Category labels in index order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Returns `true` if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries whose title or excerpt contains the query, ignoring case.
    ///
    /// Results follow category order, then entry order within a category.
    pub fn matches(&self, query: &Query) -> Vec<ContentRecord> {
        let needle = query.folded();
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .entries
                    .iter()
                    .filter(move |entry| entry.matches(needle))
                    .map(move |entry| ContentRecord {
                        title: entry.title.clone(),
                        excerpt: entry.excerpt.clone(),
                        url: entry.url.clone(),
                        category: category.label.clone(),
                        source: ResultSource::Local,
                    })
            })
            .collect()
    }
}

impl Default for LocalIndex {
    /// The station website's built-in content.
    fn default() -> Self {
        Self::new(SITE_CONTENT.iter().map(|(key, entries)| {
            let entries = entries
                .iter()
                .map(|(title, excerpt, url)| LocalEntry::new(*title, *excerpt, *url))
                .collect();
            (*key, entries)
        }))
    }
}

/// Capitalize the first character of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => {
            let mut result = c.to_uppercase().to_string();
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}
