use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use serde_json::Value;
use spdlog::{info, warn};

use crate::record::{ContentRecord, ContentType, RecordKey};

/// Read-only snapshot of the content collection, in file order.
#[derive(Debug, Default)]
pub struct ContentStore {
    records: Vec<ContentRecord>,
}

impl ContentStore {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        ContentStore {
            records,
        }
    }

    pub fn from_file(path: &Path) -> io::Result<ContentStore> {
        let buf = match fs::read_to_string(path) {
            Ok(buf) => buf,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening content file {}: {}", path.display(), e))),
        };

        let store = Self::from_json(&buf)?;
        info!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// A document that is not a JSON array is treated as an empty
    /// collection; records that do not fit the record shape are skipped.
    pub fn from_json(buf: &str) -> io::Result<ContentStore> {
        let doc: Value = match serde_json::from_str(buf) {
            Ok(doc) => doc,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData, format!("Error parsing content file: {}", e))),
        };

        let Value::Array(entries) = doc else {
            warn!("Content document is not an array, using an empty collection");
            return Ok(ContentStore::default());
        };

        let mut keys = HashSet::new();
        let mut records = Vec::with_capacity(entries.len());
        for (pos, entry) in entries.into_iter().enumerate() {
            let record: ContentRecord = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping content entry #{}: {}", pos, e);
                    continue;
                }
            };

            if !keys.insert(record.key()) {
                warn!("Skipping content entry #{}: duplicate key {}", pos, record.key());
                continue;
            }
            records.push(record);
        }

        Ok(ContentStore::new(records))
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn of_type(&self, content_type: ContentType) -> Vec<&ContentRecord> {
        self.records.iter()
            .filter(|r| r.content_type == content_type)
            .collect()
    }

    pub fn find(&self, key: &RecordKey) -> Option<&ContentRecord> {
        self.records.iter().find(|r| r.has_key(key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::LIBRARY_RECORDS;

    use super::*;

    #[test]
    fn test_load_library() {
        let store = ContentStore::from_json(LIBRARY_RECORDS).unwrap();
        assert_eq!(store.len(), 6);
        assert_eq!(store.of_type(ContentType::Tutorial).len(), 2);

        let link = store.find(&RecordKey::new(ContentType::Link, "rust-ownership")).unwrap();
        assert_eq!(link.id, "l2");
        let blog = store.find(&RecordKey::new(ContentType::Blog, "rust-ownership")).unwrap();
        assert_eq!(blog.id, "b1");
    }

    #[test]
    fn test_not_an_array() {
        let store = ContentStore::from_json(r#"{"posts": []}"#).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let res = ContentStore::from_json("[{");
        assert_eq!(res.unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_skips_bad_and_duplicate_entries() {
        let json = r#"[
          {"id": 1, "slug": "a", "type": "blog", "title": "A", "date": "2023-01-01"},
          {"id": 2, "slug": "b", "type": "blog", "title": "B", "date": "not a date"},
          {"id": 3, "slug": "a", "type": "blog", "title": "A again", "date": "2023-01-02"},
          "garbage",
          {"id": 4, "slug": "a", "type": "link", "title": "A link", "date": "2023-01-03"}
        ]"#;
        let store = ContentStore::from_json(json).unwrap();
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
    }

    #[test]
    fn test_missing_file() {
        let res = ContentStore::from_file(Path::new("does/not/exist.json"));
        assert_eq!(res.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
