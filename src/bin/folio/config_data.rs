pub(crate) const SAMPLE_CFG: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_file = "content/records.json"

[listing]
blog_page_size = 6
resources_page_size = 9
tutorials_page_size = 6
trending_count = 3
related_count = 3

# popularity score = views * views_weight + shares * shares_weight
[ranking]
views_weight = 0.7
shares_weight = 0.3

[server]
address = "0.0.0.0"
port = 8001

[log]
level = "Info"
log_to_console = true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let cfg = folio::config::parse_config(SAMPLE_CFG).unwrap();
        assert_eq!(cfg.listing.resources_page_size, 9);
        assert_eq!(cfg.server.port, 8001);
    }
}
