use crate::filter_state::{FilterState, SortOrder, ALL_CATEGORIES, ALL_LEVELS, ALL_TAGS};

pub const CATEGORY_PARAM: &str = "category";
pub const TAG_PARAM: &str = "tag";
pub const SEARCH_PARAM: &str = "search";
pub const LEVEL_PARAM: &str = "level";
pub const SORT_PARAM: &str = "sort";
pub const PAGE_PARAM: &str = "page";
pub const FEATURED_PARAM: &str = "featured";

/// Parameters owned by `FilterState`, in the order they are written back.
pub const FILTER_PARAMS: [&str; 7] = [
    CATEGORY_PARAM,
    TAG_PARAM,
    SEARCH_PARAM,
    LEVEL_PARAM,
    SORT_PARAM,
    PAGE_PARAM,
    FEATURED_PARAM,
];

/// Query string of a listing page. Keeps the original parameter order so
/// that parameters not owned by the listing survive a rewrite untouched.
#[derive(PartialEq, Debug, Default, Clone)]
pub struct QueryString {
    items: Vec<(String, String)>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let buf = buf.strip_prefix('?').unwrap_or(buf);
        let items: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);

        QueryString {
            items,
        }
    }

    /// First value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn get_page(&self) -> u32 {
        let val = self.get(PAGE_PARAM).unwrap_or("1");
        let val: u32 = val.trim().parse().unwrap_or(1);
        if val == 0 { return 1; }
        val
    }

    pub fn get_featured(&self) -> bool {
        match self.get(FEATURED_PARAM) {
            Some(v) => {
                let v = v.trim();
                v.eq_ignore_ascii_case("true") || v == "1"
            }
            None => false,
        }
    }

    /// Missing or unparseable values fall back to the defaults.
    pub fn to_filter_state(&self) -> FilterState {
        let defaults = FilterState::default();
        FilterState {
            active_category: self.get_non_empty(CATEGORY_PARAM)
                .map(str::to_string)
                .unwrap_or(defaults.active_category),
            active_tag: self.get_non_empty(TAG_PARAM)
                .map(str::to_string)
                .unwrap_or(defaults.active_tag),
            search_query: self.get(SEARCH_PARAM)
                .map(str::to_string)
                .unwrap_or(defaults.search_query),
            knowledge_level: self.get_non_empty(LEVEL_PARAM)
                .map(str::to_string)
                .unwrap_or(defaults.knowledge_level),
            featured_only: self.get_featured(),
            sort_by: self.get(SORT_PARAM)
                .and_then(|s| SortOrder::parse(s.trim()))
                .unwrap_or(defaults.sort_by),
            current_page: self.get_page(),
        }
    }

    /// Rewrites the parameters owned by `FilterState`: defaults are omitted,
    /// everything else in the query is preserved in place.
    pub fn with_filter_state(&self, state: &FilterState) -> QueryString {
        let mut items: Vec<(String, String)> = self.items.iter()
            .filter(|(k, _)| !FILTER_PARAMS.contains(&k.as_str()))
            .cloned()
            .collect();

        let mut push = |key: &str, value: String| items.push((key.to_string(), value));

        if state.active_category != ALL_CATEGORIES && !state.active_category.is_empty() {
            push(CATEGORY_PARAM, state.active_category.clone());
        }
        if state.active_tag != ALL_TAGS && !state.active_tag.is_empty() {
            push(TAG_PARAM, state.active_tag.clone());
        }
        if !state.search_query.trim().is_empty() {
            push(SEARCH_PARAM, state.search_query.clone());
        }
        if state.knowledge_level != ALL_LEVELS && !state.knowledge_level.is_empty() {
            push(LEVEL_PARAM, state.knowledge_level.clone());
        }
        if state.sort_by != SortOrder::default() {
            push(SORT_PARAM, state.sort_by.as_str().to_string());
        }
        if state.current_page > 1 {
            push(PAGE_PARAM, state.current_page.to_string());
        }
        if state.featured_only {
            push(FEATURED_PARAM, "true".to_string());
        }

        QueryString {
            items,
        }
    }

    /// Encoded form without the leading `?`; empty when there is nothing to write.
    pub fn encode(&self) -> String {
        serde_urlencoded::to_string(&self.items).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
