use serde::Serialize;

pub const ALL_CATEGORIES: &str = "All";
pub const ALL_TAGS: &str = "All";
pub const ALL_LEVELS: &str = "All Levels";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<SortOrder> {
        match s {
            "newest" => Some(SortOrder::Newest),
            "oldest" => Some(SortOrder::Oldest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

/// Filter, sort and page selections of one listing view.
///
/// The setters are the way a view should change the selection: any change
/// to a filter or to the sort order sends the view back to page 1, so a
/// page number from an older result set is never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub active_category: String,
    pub active_tag: String,
    pub search_query: String,
    pub knowledge_level: String,
    pub featured_only: bool,
    pub sort_by: SortOrder,
    pub current_page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            active_category: ALL_CATEGORIES.to_string(),
            active_tag: ALL_TAGS.to_string(),
            search_query: String::new(),
            knowledge_level: ALL_LEVELS.to_string(),
            featured_only: false,
            sort_by: SortOrder::Newest,
            current_page: 1,
        }
    }
}

impl FilterState {
    pub fn set_category(&mut self, category: &str) {
        if self.active_category != category {
            self.active_category = category.to_string();
            self.current_page = 1;
        }
    }

    pub fn set_tag(&mut self, tag: &str) {
        if self.active_tag != tag {
            self.active_tag = tag.to_string();
            self.current_page = 1;
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        if self.search_query != query {
            self.search_query = query.to_string();
            self.current_page = 1;
        }
    }

    pub fn set_knowledge_level(&mut self, level: &str) {
        if self.knowledge_level != level {
            self.knowledge_level = level.to_string();
            self.current_page = 1;
        }
    }

    pub fn set_featured_only(&mut self, featured_only: bool) {
        if self.featured_only != featured_only {
            self.featured_only = featured_only;
            self.current_page = 1;
        }
    }

    pub fn set_sort(&mut self, sort_by: SortOrder) {
        if self.sort_by != sort_by {
            self.sort_by = sort_by;
            self.current_page = 1;
        }
    }

    /// Pages are 1-based; 0 becomes 1. The upper bound is only known once
    /// the result set is paginated.
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Lowercase, trimmed search text; `None` when the query is blank.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}
