use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::ranking::RankingWeights;

#[derive(Deserialize)]
pub struct Paths {
    pub content_file: PathBuf,
}

#[derive(Deserialize)]
pub struct Listing {
    #[serde(default = "default_blog_page_size")]
    pub blog_page_size: u32,
    #[serde(default = "default_resources_page_size")]
    pub resources_page_size: u32,
    #[serde(default = "default_tutorials_page_size")]
    pub tutorials_page_size: u32,
    #[serde(default = "default_trending_count")]
    pub trending_count: usize,
    #[serde(default = "default_related_count")]
    pub related_count: usize,
}

fn default_blog_page_size() -> u32 { 6 }

fn default_resources_page_size() -> u32 { 9 }

fn default_tutorials_page_size() -> u32 { 6 }

fn default_trending_count() -> usize { 3 }

fn default_related_count() -> usize { 3 }

impl Default for Listing {
    fn default() -> Self {
        Listing {
            blog_page_size: default_blog_page_size(),
            resources_page_size: default_resources_page_size(),
            tutorials_page_size: default_tutorials_page_size(),
            trending_count: default_trending_count(),
            related_count: default_related_count(),
        }
    }
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub listing: Listing,
    #[serde(default)]
    pub ranking: RankingWeights,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|p| p.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not resolve executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_file: parse_path(cfg.paths.content_file)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let toml_str = r##"
[paths]
content_file = "content/records.json"

[server]
address = "127.0.0.1"
port = 8001
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.paths.content_file, PathBuf::from("content/records.json"));
        assert_eq!(cfg.listing.blog_page_size, 6);
        assert_eq!(cfg.listing.resources_page_size, 9);
        assert_eq!(cfg.listing.trending_count, 3);
        assert_eq!(cfg.ranking, RankingWeights::default());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[paths]
content_file = "${exe_dir}/records.json"

[listing]
blog_page_size = 10
trending_count = 5

[ranking]
views_weight = 0.5

[server]
address = "0.0.0.0"
port = 9000

[log]
level = "Debug"
log_to_console = true
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert!(!cfg.paths.content_file.to_str().unwrap().contains("${exe_dir}"));
        assert!(cfg.paths.content_file.ends_with("records.json"));
        assert_eq!(cfg.listing.blog_page_size, 10);
        assert_eq!(cfg.listing.tutorials_page_size, 6);
        assert_eq!(cfg.listing.trending_count, 5);
        assert_eq!(cfg.ranking.views_weight, 0.5);
        assert_eq!(cfg.ranking.shares_weight, 0.3);
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let res = parse_config("[server]\nport = \"eighty\"");
        assert_eq!(res.err().unwrap().kind(), ErrorKind::InvalidData);
    }
}
