use crate::{Config, ConfigError, Defaults, ResolvedInterval};

const POSTS: &str = r#"
[defaults]
include_start = true
include_end = false

[intervals.post_unpublished]
entity = "Post"
start = "created"
end = "publish"

[intervals.lease_active]
entity = "Lease"
start = "from"
end = "to"
include_end = true

[intervals.lease_not_expired]
entity = "Lease"
end = "to"
"#;

#[test]
fn parses_and_resolves_defaults() {
    let config = Config::from_toml_str(POSTS).unwrap();

    assert_eq!(config.intervals.len(), 3);
    assert_eq!(
        config.interval("post_unpublished"),
        Some(ResolvedInterval {
            name: "post_unpublished",
            entity: "Post",
            start: Some("created"),
            end: Some("publish"),
            include_start: true,
            include_end: false,
        })
    );

    let lease = config.interval("lease_active").unwrap();
    assert!(lease.include_end);

    let open = config.interval("lease_not_expired").unwrap();
    assert_eq!(open.start, None);
    assert_eq!(open.end, Some("to"));

    assert!(config.interval("missing").is_none());
}

#[test]
fn resolved_iterates_in_name_order() {
    let config = Config::from_toml_str(POSTS).unwrap();
    let names: Vec<_> = config.resolved().map(|r| r.name).collect();

    assert_eq!(names, ["lease_active", "lease_not_expired", "post_unpublished"]);
}

#[test]
fn defaults_close_both_ends() {
    let config = Config::from_toml_str(
        r#"
        [intervals.any]
        entity = "E"
        start = "a"
        "#,
    )
    .unwrap();

    assert_eq!(config.defaults, Defaults::default());
    let any = config.interval("any").unwrap();
    assert!(any.include_start && any.include_end);
}

#[test]
fn empty_document_is_valid() {
    let config = Config::from_toml_str("").unwrap();
    assert!(config.intervals.is_empty());
}

#[test]
fn rejects_definitions_without_bounds() {
    let err = Config::from_toml_str(
        r#"
        [intervals.nothing]
        entity = "Post"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("nothing")), "{err}");
}

#[test]
fn rejects_empty_names() {
    let cases = [
        r#"
        [intervals.x]
        entity = ""
        start = "a"
        "#,
        r#"
        [intervals.x]
        entity = "E"
        start = " "
        "#,
        r#"
        [intervals.""]
        entity = "E"
        start = "a"
        "#,
    ];

    for text in cases {
        assert!(
            matches!(Config::from_toml_str(text), Err(ConfigError::Invalid(_))),
            "{text}"
        );
    }
}

#[test]
fn unknown_keys_are_parse_errors() {
    let err = Config::from_toml_str(
        r#"
        [intervals.x]
        entity = "E"
        start = "a"
        inclusive = true
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn load_reports_the_missing_path() {
    let err = Config::load("/nonexistent/spanpred.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/spanpred.toml"));
}
