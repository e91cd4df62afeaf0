use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};

use crate::searchable::Searchable;

/// Which record texts take part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchKeys {
    pub title: bool,
    pub brand: bool,
    pub categories: bool,
}

impl Default for SearchKeys {
    fn default() -> Self {
        Self {
            title: true,
            brand: true,
            categories: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Largest accepted distance, from 0.0 (exact) to 1.0 (anything that
    /// matches at all).
    pub threshold: f64,
    pub keys: SearchKeys,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            keys: SearchKeys::default(),
            limit: None,
        }
    }
}

/// One ranked result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    /// Distance of the best matching key: 0.0 is a perfect match.
    pub score: f64,
    /// Position of the item in the searched collection.
    pub index: usize,
}

/// Fuzzy index over a borrowed product collection.
pub struct ProductSearch<'a, T> {
    items: &'a [T],
    options: SearchOptions,
    matcher: SkimMatcherV2,
}

impl<'a, T: Searchable> ProductSearch<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self::with_options(items, SearchOptions::default())
    }

    pub fn with_options(items: &'a [T], options: SearchOptions) -> Self {
        Self {
            items,
            options,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Rank items against `query`, best first. Equal scores keep collection
    /// order. A blank query yields no hits.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a, T>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let Some(perfect) = self.matcher.fuzzy_match(query, query).filter(|s| *s > 0) else {
            return Vec::new();
        };

        let mut hits: Vec<SearchHit<'a, T>> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let best = self.best_key_score(item, query)?;
                let relevance = (best as f64 / perfect as f64).clamp(0.0, 1.0);
                let score = 1.0 - relevance;
                (score <= self.options.threshold).then_some(SearchHit { item, score, index })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        if let Some(limit) = self.options.limit {
            hits.truncate(limit);
        }

        tracing::debug!(query, candidates = self.items.len(), hits = hits.len(), "product search");
        hits
    }

    /// Matching items only, best first.
    pub fn search_items(&self, query: &str) -> Vec<&'a T> {
        self.search(query).into_iter().map(|hit| hit.item).collect()
    }

    fn best_key_score(&self, item: &T, query: &str) -> Option<i64> {
        let keys = self.options.keys;
        let mut texts: Vec<&str> = Vec::new();
        if keys.title {
            texts.push(item.title());
        }
        if keys.brand {
            texts.extend(item.brand_name());
        }
        if keys.categories {
            texts.extend(item.category_names());
        }

        texts
            .into_iter()
            .filter_map(|text| self.matcher.fuzzy_match(text, query))
            .max()
    }
}
