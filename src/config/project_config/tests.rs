use super::*;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.defaults, CliDefaults::default());
    assert!(config.bots.patterns.is_empty());

    let filter = config.bots.filter().expect("default filter");
    assert!(filter.is_bot("dependabot[bot]"));
    assert!(!filter.is_bot("Jane"));
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
[defaults]
output = "CONTRIBUTORS"
sort = "commits"
strategy = "email"
keep_bots = true

[bots]
patterns = ["^ci-runner$"]
keep = ["Robo-Bot"]
"#;

    let config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");

    assert_eq!(config.defaults.output.as_deref(), Some("CONTRIBUTORS"));
    assert_eq!(config.defaults.sort.as_deref(), Some("commits"));
    assert_eq!(config.defaults.strategy.as_deref(), Some("email"));
    assert_eq!(config.defaults.keep_bots, Some(true));
    assert_eq!(config.defaults.skip_mailmap, None);

    let filter = config.bots.filter().expect("valid patterns");
    assert!(filter.is_bot("ci-runner"));
    assert!(!filter.is_bot("robo-bot"));
}

#[test]
fn test_invalid_bot_pattern_is_reported() {
    let config: ProjectConfig =
        toml::from_str("[bots]\npatterns = [\"([\"]\n").expect("parse project config");
    assert!(config.bots.filter().is_err());
}

#[test]
fn test_defaults_merge_prefers_other() {
    let mut base = CliDefaults {
        output: Some("AUTHORS".into()),
        sort: Some("name".into()),
        keep_bots: Some(false),
        ..Default::default()
    };
    base.merge(CliDefaults {
        sort: Some("commits".into()),
        skip_mailmap: Some(true),
        ..Default::default()
    });

    assert_eq!(base.output.as_deref(), Some("AUTHORS"));
    assert_eq!(base.sort.as_deref(), Some("commits"));
    assert_eq!(base.keep_bots, Some(false));
    assert_eq!(base.skip_mailmap, Some(true));
}

#[test]
fn test_load_project_config_prefers_toml() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("authors.toml"),
        "[defaults]\nsort = \"email\"\n",
    )?;
    std::fs::write(
        dir.path().join(".authorsrc.json"),
        r#"{"defaults": {"sort": "name"}}"#,
    )?;

    let config = load_project_config(dir.path());
    assert_eq!(config.defaults.sort.as_deref(), Some("email"));
    Ok(())
}

#[test]
fn test_load_project_config_falls_back_to_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("authors.toml"), "this is [not toml")?;
    std::fs::write(
        dir.path().join(".authorsrc.json"),
        r#"{"defaults": {"format": "json"}, "bots": {"keep": ["x-bot"]}}"#,
    )?;

    let config = load_project_config(dir.path());
    assert_eq!(config.defaults.format.as_deref(), Some("json"));
    assert_eq!(config.bots.keep, ["x-bot"]);
    Ok(())
}

#[test]
fn test_missing_config_is_default() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = load_project_config(dir.path());
    assert_eq!(config.defaults, CliDefaults::default());
    Ok(())
}
