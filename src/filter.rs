use crate::filter_state::{FilterState, ALL_CATEGORIES, ALL_LEVELS, ALL_TAGS};
use crate::record::ContentRecord;

/// Which text fields the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Title, excerpt and tags.
    Summary,
    /// Summary fields plus the long-form content.
    WithContent,
}

/// Predicates of a `FilterState`, prepared once per filter pass.
pub struct RecordFilter<'a> {
    state: &'a FilterState,
    needle: Option<String>,
    scope: SearchScope,
}

impl<'a> RecordFilter<'a> {
    pub fn new(state: &'a FilterState, scope: SearchScope) -> Self {
        RecordFilter {
            state,
            needle: state.search_needle(),
            scope,
        }
    }

    pub fn matches_category(&self, record: &ContentRecord) -> bool {
        let wanted = self.state.active_category.as_str();
        if wanted == ALL_CATEGORIES {
            return true;
        }
        record.category.as_deref() == Some(wanted)
    }

    pub fn matches_tag(&self, record: &ContentRecord) -> bool {
        let wanted = self.state.active_tag.as_str();
        if wanted == ALL_TAGS {
            return true;
        }
        record.tags.iter().any(|t| t == wanted)
    }

    pub fn matches_level(&self, record: &ContentRecord) -> bool {
        let wanted = self.state.knowledge_level.as_str();
        if wanted == ALL_LEVELS {
            return true;
        }
        match record.level {
            Some(level) => level.as_str().eq_ignore_ascii_case(wanted.trim()),
            None => false,
        }
    }

    pub fn matches_featured(&self, record: &ContentRecord) -> bool {
        !self.state.featured_only || record.is_featured()
    }

    pub fn matches_search(&self, record: &ContentRecord) -> bool {
        let Some(ref needle) = self.needle else {
            return true;
        };

        let hit = |text: &str| text.to_lowercase().contains(needle.as_str());

        if hit(&record.title) || hit(&record.excerpt) || record.tags.iter().any(|t| hit(t)) {
            return true;
        }

        match self.scope {
            SearchScope::WithContent => hit(&record.content),
            SearchScope::Summary => false,
        }
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        self.matches_category(record)
            && self.matches_tag(record)
            && self.matches_level(record)
            && self.matches_featured(record)
            && self.matches_search(record)
    }

    /// Keeps the input order; only the sort stage reorders.
    pub fn apply<'r, I>(&self, records: I) -> Vec<&'r ContentRecord>
        where
            I: IntoIterator<Item=&'r ContentRecord>,
    {
        records.into_iter()
            .filter(|r| self.matches(r))
            .collect()
    }
}

pub fn filter_records<'r>(records: &'r [ContentRecord], state: &FilterState, scope: SearchScope) -> Vec<&'r ContentRecord> {
    RecordFilter::new(state, scope).apply(records)
}
