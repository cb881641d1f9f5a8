//! Browsable roster index: search, type filtering, pagination.
//!
//! The entry list is fetched once; type membership is fetched lazily and
//! cached so each type costs at most one request for the lifetime of the
//! index.

use std::collections::{HashMap, HashSet};

use crate::api::{NamedResource, PokeApi};
use crate::config;
use crate::errors::FetchResult;

#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    entries: Vec<NamedResource>,
    type_cache: HashMap<String, HashSet<String>>,
}

impl LibraryIndex {
    pub fn new(entries: Vec<NamedResource>) -> Self {
        Self {
            entries,
            type_cache: HashMap::new(),
        }
    }

    /// Fetch the roster from the live API.
    pub async fn load(api: &PokeApi) -> FetchResult<Self> {
        let entries = api.fetch_index(config::MAX_POKEMON_ID).await?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[NamedResource] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ensure the member set for a type is cached, fetching it on first use.
    pub async fn prime_type(&mut self, api: &PokeApi, type_name: &str) -> FetchResult<()> {
        if !self.type_cache.contains_key(type_name) {
            let members = api.fetch_type_members(type_name).await?;
            self.insert_type_members(type_name, members);
        }
        Ok(())
    }

    pub fn insert_type_members(&mut self, type_name: &str, members: Vec<String>) {
        self.type_cache
            .insert(type_name.to_string(), members.into_iter().collect());
    }

    /// Entries visible for a search term and optional type filter.
    ///
    /// The search is a trimmed, case-insensitive substring match. A type
    /// filter whose member set has not been primed is ignored, matching the
    /// original page's fallback when the type fetch fails.
    pub fn visible(&self, search: &str, type_filter: Option<&str>) -> Vec<&NamedResource> {
        let term = search.trim().to_lowercase();
        let members = type_filter.and_then(|name| self.type_cache.get(name));

        self.entries
            .iter()
            .filter(|entry| term.is_empty() || entry.name.to_lowercase().contains(&term))
            .filter(|entry| members.map_or(true, |set| set.contains(&entry.name)))
            .collect()
    }

    /// One page of a filtered listing. Pages are zero-indexed; a page past
    /// the end is empty.
    pub fn page<'a>(
        listing: &'a [&'a NamedResource],
        page_index: usize,
        page_size: usize,
    ) -> &'a [&'a NamedResource] {
        if page_size == 0 {
            return &[];
        }
        let start = page_index.saturating_mul(page_size);
        if start >= listing.len() {
            return &[];
        }
        let end = (start + page_size).min(listing.len());
        &listing[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://api.test/pokemon/{}/", name),
        }
    }

    fn sample_index() -> LibraryIndex {
        LibraryIndex::new(vec![
            entry("bulbasaur"),
            entry("ivysaur"),
            entry("venusaur"),
            entry("charmander"),
            entry("squirtle"),
        ])
    }

    #[test]
    fn search_is_case_insensitive_substring_match() {
        let index = sample_index();
        let hits = index.visible("  SAUR ", None);
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    }

    #[test]
    fn empty_search_returns_everything() {
        let index = sample_index();
        assert_eq!(index.visible("", None).len(), 5);
    }

    #[test]
    fn type_filter_uses_the_cached_member_set() {
        let mut index = sample_index();
        index.insert_type_members(
            "grass",
            vec!["bulbasaur".to_string(), "ivysaur".to_string(), "venusaur".to_string()],
        );

        let names: Vec<&str> = index
            .visible("", Some("grass"))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);

        // Search and type filter compose.
        let names: Vec<&str> = index
            .visible("ivy", Some("grass"))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["ivysaur"]);
    }

    #[test]
    fn unprimed_type_filter_falls_back_to_no_filter() {
        let index = sample_index();
        assert_eq!(index.visible("", Some("fire")).len(), 5);
    }

    #[test]
    fn pagination_clamps_to_the_listing() {
        let index = sample_index();
        let listing = index.visible("", None);

        let first = LibraryIndex::page(&listing, 0, 2);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "bulbasaur");

        let last = LibraryIndex::page(&listing, 2, 2);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].name, "squirtle");

        assert!(LibraryIndex::page(&listing, 3, 2).is_empty());
        assert!(LibraryIndex::page(&listing, 0, 0).is_empty());
    }
}
