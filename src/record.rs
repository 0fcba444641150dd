use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::util::record_date::RecordDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Tutorial,
    Link,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Tutorial => "tutorial",
            ContentType::Link => "link",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(ContentType::Blog),
            "tutorial" => Ok(ContentType::Tutorial),
            "link" => Ok(ContentType::Link),
            _ => Err(format!("Unknown content type {}", s)),
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn parse(s: &str) -> Option<Level> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

/// Addressable key of a record: the slug is only unique within its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RecordKey {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub slug: String,
}

impl RecordKey {
    pub fn new(content_type: ContentType, slug: &str) -> Self {
        RecordKey {
            content_type,
            slug: slug.to_string(),
        }
    }
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content_type, self.slug)
    }
}

/// A blog post, tutorial or link as handed over by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: Option<Level>,
    pub date: RecordDate,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub shares: Option<u64>,
}

impl ContentRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.content_type, &self.slug)
    }

    pub fn has_key(&self, key: &RecordKey) -> bool {
        self.content_type == key.content_type && self.slug == key.slug
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(0)
    }

    pub fn share_count(&self) -> u64 {
        self.shares.unwrap_or(0)
    }
}

impl Display for ContentRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({}) tags={}",
               self.key(),
               self.title,
               self.date,
               self.tags.join(",")
        )
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// `null` tags are the same as no tags
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
{
    let tags: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default())
}

// Unknown levels are treated as absent
fn deserialize_level<'de, D>(deserializer: D) -> Result<Option<Level>, D::Error>
    where
        D: Deserializer<'de>,
{
    let level: Option<String> = Option::deserialize(deserializer)?;
    Ok(level.as_deref().and_then(Level::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r##"{
            "id": 42,
            "slug": "react-hooks-guide",
            "type": "tutorial",
            "title": "React Hooks Guide",
            "excerpt": "Learn hooks",
            "content": "# Hooks",
            "tags": ["react", "hooks"],
            "category": "Dev",
            "level": "Intermediate",
            "date": "2023-05-01",
            "author": "Ana",
            "readTime": "5 min read",
            "featured": true,
            "views": 100,
            "shares": 10
        }"##;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.content_type, ContentType::Tutorial);
        assert_eq!(record.level, Some(Level::Intermediate));
        assert_eq!(record.read_time.as_deref(), Some("5 min read"));
        assert!(record.is_featured());
        assert_eq!(record.key(), RecordKey::new(ContentType::Tutorial, "react-hooks-guide"));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "a1",
            "slug": "css-grid",
            "type": "blog",
            "title": "CSS Grid Basics",
            "tags": null,
            "level": "expert",
            "date": "2023-06-01 10:00:00"
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert_eq!(record.category, None);
        assert_eq!(record.level, None);
        assert!(!record.is_featured());
        assert_eq!(record.view_count(), 0);
        assert_eq!(record.share_count(), 0);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"id": 1, "slug": "x", "type": "video", "title": "X", "date": "2023-01-01"}"#;
        assert!(serde_json::from_str::<ContentRecord>(json).is_err());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("ADVANCED"), Some(Level::Advanced));
        assert_eq!(Level::parse(" beginner "), Some(Level::Beginner));
        assert_eq!(Level::parse("All Levels"), None);
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("link".parse::<ContentType>(), Ok(ContentType::Link));
        assert!("Blog".parse::<ContentType>().is_err());
    }
}
