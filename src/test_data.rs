use crate::record::ContentRecord;

pub const SCENARIO_RECORDS: &str = r#"[
  {"id": 1, "slug": "react-hooks-guide", "type": "blog", "title": "React Hooks Guide",
   "tags": ["react"], "category": "Dev", "date": "2023-05-01", "views": 100, "shares": 10},
  {"id": 2, "slug": "css-grid-basics", "type": "blog", "title": "CSS Grid Basics",
   "tags": ["css"], "category": "Design", "date": "2023-06-01", "views": 50, "shares": 5}
]"#;

pub const LIBRARY_RECORDS: &str = r#"[
  {"id": "b1", "slug": "rust-ownership", "type": "blog", "title": "Rust Ownership Explained",
   "excerpt": "Borrowing without tears", "content": "Lifetimes and the borrow checker.",
   "tags": ["rust", "memory"], "category": "Dev", "date": "2023-01-10 09:00:00",
   "author": "Ana", "readTime": "8 min read", "featured": true, "views": 300, "shares": 40},
  {"id": "b2", "slug": "grid-layouts", "type": "blog", "title": "Grid Layouts",
   "excerpt": "Two dimensional layouts", "content": "Using CSS grid in production.",
   "tags": ["css", "design"], "category": "Design", "date": "2023-03-02", "views": 120},
  {"id": "t1", "slug": "intro-to-tokio", "type": "tutorial", "title": "Intro to Tokio",
   "excerpt": "Async runtime basics", "content": "Spawning tasks and channels.",
   "tags": ["rust", "async"], "category": "Dev", "level": "beginner", "date": "2023-02-15",
   "views": 500, "shares": 2},
  {"id": "t2", "slug": "advanced-traits", "type": "tutorial", "title": "Advanced Traits",
   "excerpt": "Associated types and GATs", "content": "Generic associated types in practice.",
   "tags": ["rust"], "category": "Dev", "level": "Advanced", "date": "2023-03-02",
   "featured": false, "shares": 90},
  {"id": "l1", "slug": "color-tools", "type": "link", "title": "Color Tools",
   "excerpt": "Palettes for the web", "content": "A curated list of palette generators.",
   "tags": ["design"], "date": "2022-12-24"},
  {"id": "l2", "slug": "rust-ownership", "type": "link", "title": "Ownership in the Book",
   "excerpt": "Chapter four", "content": "The official chapter on ownership.",
   "tags": ["rust"], "category": "Reading", "date": "2023-04-01", "views": 10, "shares": 1}
]"#;

pub fn parse_records(json: &str) -> Vec<ContentRecord> {
    serde_json::from_str(json).unwrap()
}
