use std::path::Path;

use journal_downloader::models::{load_catalog, parse_catalog};

const CATALOG: &str = r#"
[[journals]]
name = "Journal of Examples"
volume = "12"
issue = "3"
date = "2024-03"

[[journals.articles]]
title = "On Examples"
url = "https://example.org/article/1"

[[journals.articles]]
title = "More Examples"
url = "https://example.org/article/2"

[[journals]]
name = "Journal of Examples"
volume = "12"
issue = "4"
"#;

#[test]
fn parses_nested_journals_and_articles() {
    let batch = parse_catalog(CATALOG, Path::new("catalog.toml")).unwrap();

    assert_eq!(batch.journals.len(), 2);
    assert_eq!(batch.article_count(), 2);

    let first = &batch.journals[0];
    assert_eq!(first.articles[1].title, "More Examples");
    assert_eq!(first.folder_name(), "2024-03 Vol.12 No.3");

    let second = &batch.journals[1];
    assert!(second.articles.is_empty());
    assert_eq!(second.date, None);
}

#[test]
fn invalid_catalog_reports_path() {
    let err = parse_catalog("[[journals]]\nname = 1", Path::new("broken.toml")).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
}

#[tokio::test]
async fn loads_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(&path, CATALOG).unwrap();

    let batch = load_catalog(&path).await.unwrap();
    assert_eq!(batch.journals[0].name, "Journal of Examples");
}

#[tokio::test]
async fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_catalog(&dir.path().join("none.toml")).await.is_err());
}
