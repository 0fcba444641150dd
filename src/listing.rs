use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::filter::{RecordFilter, SearchScope};
use crate::filter_state::FilterState;
use crate::paginator::Paginator;
use crate::ranking::sort_records;
use crate::record::{ContentRecord, ContentType, RecordKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStyle {
    /// `/blog/{slug}`
    Blog,
    /// `/resources/{type}/{slug}`
    Resources,
}

/// One listing section of the site. Every section runs the same pipeline;
/// only the parameters differ.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub name: String,
    pub page_size: u32,
    pub search_scope: SearchScope,
    pub content_types: Vec<ContentType>,
    pub route_style: RouteStyle,
}

#[derive(Debug, Serialize)]
pub struct ListingItem<'a> {
    pub key: RecordKey,
    pub route: String,
    pub record: &'a ContentRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ListingPage<'a> {
    pub items: Vec<ListingItem<'a>>,
    /// Matches across all pages.
    pub total: usize,
    /// The page actually shown, after clamping.
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub tags: Vec<TagCount>,
    pub categories: Vec<String>,
}

impl ListingPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ListingView {
    pub fn blog(page_size: u32) -> Self {
        ListingView {
            name: "blog".to_string(),
            page_size,
            search_scope: SearchScope::Summary,
            content_types: vec![ContentType::Blog],
            route_style: RouteStyle::Blog,
        }
    }

    pub fn resources(page_size: u32) -> Self {
        ListingView {
            name: "resources".to_string(),
            page_size,
            search_scope: SearchScope::WithContent,
            content_types: vec![ContentType::Blog, ContentType::Tutorial, ContentType::Link],
            route_style: RouteStyle::Resources,
        }
    }

    pub fn tutorials(page_size: u32) -> Self {
        ListingView {
            name: "tutorials".to_string(),
            page_size,
            search_scope: SearchScope::Summary,
            content_types: vec![ContentType::Tutorial],
            route_style: RouteStyle::Resources,
        }
    }

    pub fn includes(&self, record: &ContentRecord) -> bool {
        self.content_types.contains(&record.content_type)
    }

    pub fn detail_route(&self, record: &ContentRecord) -> String {
        match self.route_style {
            RouteStyle::Blog => format!("/blog/{}", record.slug),
            RouteStyle::Resources => format!("/resources/{}/{}", record.content_type, record.slug),
        }
    }

    /// Filter, sort and paginate `records` for this view. Facets are
    /// computed over every record of the view, not only the matches.
    pub fn run<'r>(&self, records: &'r [ContentRecord], state: &FilterState) -> ListingPage<'r> {
        let section: Vec<&ContentRecord> = records.iter()
            .filter(|r| self.includes(r))
            .collect();

        let filter = RecordFilter::new(state, self.search_scope);
        let mut matches = filter.apply(section.iter().copied());
        sort_records(&mut matches, state.sort_by);

        let paginator = Paginator::from(&matches, self.page_size);
        let page = paginator.clamp_page(state.current_page);
        let items = paginator.get_page(page)
            .iter()
            .map(|r| ListingItem {
                key: r.key(),
                route: self.detail_route(r),
                record: *r,
            })
            .collect();

        ListingPage {
            items,
            total: matches.len(),
            page,
            total_pages: paginator.page_count(),
            page_size: paginator.page_size(),
            tags: tag_counts(&section),
            categories: categories(&section),
        }
    }
}

/// Tags by descending frequency, ties broken by name.
pub fn tag_counts(records: &[&ContentRecord]) -> Vec<TagCount> {
    let mut tag_map: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let unique: HashSet<&str> = record.tags.iter().map(|t| t.as_str()).collect();
        for tag in unique {
            *tag_map.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tag_list: Vec<TagCount> = tag_map.into_iter()
        .map(|(tag, count)| TagCount { tag: tag.to_string(), count })
        .collect();
    tag_list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tag_list
}

pub fn categories(records: &[&ContentRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records.iter()
        .filter_map(|r| r.category.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    categories.sort();
    categories
}

/// Records sharing tags or the category with the record at `key`, best
/// overlap first, at most one per key and never the record itself.
pub fn related<'r>(records: &'r [ContentRecord], key: &RecordKey, limit: usize) -> Vec<&'r ContentRecord> {
    let Some(origin) = records.iter().find(|r| r.has_key(key)) else {
        return vec![];
    };

    let origin_tags: HashSet<&str> = origin.tags.iter().map(|t| t.as_str()).collect();
    let overlap = |r: &ContentRecord| {
        let shared_tags = r.tags.iter()
            .map(|t| t.as_str())
            .collect::<HashSet<_>>()
            .intersection(&origin_tags)
            .count();
        let same_category = origin.category.is_some() && r.category == origin.category;
        shared_tags + usize::from(same_category)
    };

    let mut candidates: Vec<(usize, &ContentRecord)> = records.iter()
        .filter(|r| !r.has_key(key))
        .map(|r| (overlap(r), r))
        .filter(|(score, _)| *score > 0)
        .collect();
    candidates.sort_by(|(a, _), (b, _)| b.cmp(a));

    let mut seen = HashSet::new();
    candidates.into_iter()
        .map(|(_, r)| r)
        .filter(|r| seen.insert(r.key()))
        .take(limit)
        .collect()
}
