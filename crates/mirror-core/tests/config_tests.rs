//! Tests for loading, validating, and editing config.toml

use mirror_core::{Error, MirrorConfig, PrimaryBranches};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[settings]
upstream_base = "https://git.example.com/"
cache_dir = "/var/cache/leaf-mirror"
primary_branches = ["trunk", "main"]
credential_helper = "store --file=/etc/leaf-mirror/creds"

[[projects]]
id = "zeta"
destinations = ["gitlab-urz/group/zeta.git"]

[[projects]]
id = "alpha"
destinations = ["gitlab-urz/group/alpha.git", "mirror-host/group/alpha.git"]
"#;

fn problems(config: &MirrorConfig) -> Vec<String> {
    match config.validate() {
        Err(Error::InvalidConfig { problems }) => problems,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_parse_preserves_project_order() {
    let config = MirrorConfig::parse(SAMPLE).unwrap();
    let projects = config.projects().unwrap();

    let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    assert_eq!(projects[1].destinations.len(), 2);
}

#[test]
fn test_sync_options_from_settings() {
    let config = MirrorConfig::parse(SAMPLE).unwrap();
    let options = config.sync_options().unwrap();

    assert_eq!(options.upstream_base, "https://git.example.com/");
    assert_eq!(
        options.primary_branches,
        PrimaryBranches::new(vec!["trunk".into(), "main".into()]).unwrap()
    );
    assert_eq!(
        options.credential_helper.as_deref(),
        Some("store --file=/etc/leaf-mirror/creds")
    );
    assert_eq!(
        config.cache_dir(),
        Some(std::path::PathBuf::from("/var/cache/leaf-mirror"))
    );
}

#[test]
fn test_validation_reports_every_problem() {
    let config = MirrorConfig::parse(
        r#"
[settings]
primary_branches = []

[[projects]]
id = "../escape"
destinations = ["ok/ns/repo.git"]

[[projects]]
id = "dup"
destinations = ["a/b/c.git", "a/b/c.git", " "]

[[projects]]
id = "dup"
"#,
    )
    .unwrap();

    let found = problems(&config);

    assert_eq!(found.len(), 5, "{found:#?}");
    assert!(found.iter().any(|p| p.contains("primary_branches")));
    assert!(found.iter().any(|p| p.contains("../escape")));
    assert!(found.iter().any(|p| p.contains("'dup' is listed more than once")));
    assert!(found.iter().any(|p| p.contains("'a/b/c.git' is listed more than once")));
    assert!(found.iter().any(|p| p.contains("must not be empty")));
}

#[test]
fn test_empty_destination_list_is_valid() {
    let config = MirrorConfig::parse("[[projects]]\nid = \"lonely\"\n").unwrap();
    assert!(config.validate().is_ok());
    assert!(config.project("lonely").unwrap().destinations.is_empty());
}

#[test]
fn test_unknown_project() {
    let config = MirrorConfig::parse(SAMPLE).unwrap();
    assert!(matches!(
        config.project("nope"),
        Err(Error::UnknownProject { id }) if id == "nope"
    ));
}

#[test]
fn test_upsert_adds_then_replaces_in_place() {
    let mut config = MirrorConfig::parse(SAMPLE).unwrap();

    let replaced = config.upsert("new", vec!["h/n/new.git".into()]).unwrap();
    assert!(!replaced);
    let replaced = config.upsert("zeta", vec!["h/n/other.git".into()]).unwrap();
    assert!(replaced);

    assert_eq!(config.project_ids(), vec!["zeta", "alpha", "new"]);
    assert_eq!(config.find("zeta").unwrap().destinations, vec!["h/n/other.git"]);
}

#[rstest]
#[case("bad/id", vec!["h/n/r.git"])]
#[case("ok", vec![""])]
#[case("ok", vec!["h/n/r.git", "h/n/r.git"])]
fn test_upsert_rejects_invalid_entries(#[case] id: &str, #[case] destinations: Vec<&str>) {
    let mut config = MirrorConfig::default();
    let destinations = destinations.into_iter().map(String::from).collect();

    assert!(config.upsert(id, destinations).is_err());
    assert!(config.projects.is_empty());
}

#[test]
fn test_remove_project() {
    let mut config = MirrorConfig::parse(SAMPLE).unwrap();

    let removed = config.remove("zeta").unwrap();

    assert_eq!(removed.id, "zeta");
    assert_eq!(config.project_ids(), vec!["alpha"]);
    assert!(matches!(config.remove("zeta"), Err(Error::UnknownProject { .. })));
}

#[test]
fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let config = MirrorConfig::parse(SAMPLE).unwrap();

    config.save(&path).unwrap();
    let loaded = MirrorConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_loads_empty_config() {
    let temp = TempDir::new().unwrap();
    let config = MirrorConfig::load(&temp.path().join("absent.toml")).unwrap();
    assert_eq!(config, MirrorConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[[projects]\n").unwrap();

    assert!(matches!(MirrorConfig::load(&path), Err(Error::Fs(_))));
}
