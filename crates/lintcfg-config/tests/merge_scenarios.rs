/*
 * merge_scenarios.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end merge scenarios over realistic base configurations.
 */

use indexmap::IndexMap;
use lintcfg_config::{NamesPaths, OverrideConfig, merge_config, merge_default_config, merge_exclude_matchers};
use lintcfg_patch::{Value, YamlPath, merge_into_mapping};

const DEFAULT_CONFIG: &str = r#"version: "2"

linters:
  default: none

  settings:
    custom:
      # Enable the custom "compiles" linter
      compiles:
        type: "module"
        description: A linter that verifies that the code compiles successfully.

  # Enable the default linters
  enable:
    - compiles
    - errcheck
    - govet
    - ineffassign
    - revive
    - unconvert
    - unused

run:
  relative-path-mode: gomod
"#;

/// Merge and check that the result is still a valid YAML mapping.
fn merge(base: &str, override_config: &str) -> String {
    let config = OverrideConfig::from_yaml_str(override_config).expect("override should parse");
    let merged = merge_config(base, Some(&config)).expect("merge should succeed");
    assert_reparses(&merged);
    merged
}

fn assert_reparses(merged: &str) {
    let parsed: serde_yaml::Value = serde_yaml::from_str(merged)
        .unwrap_or_else(|e| panic!("merged config is not valid YAML ({e}):\n{merged}"));
    assert!(parsed.is_mapping(), "merged config is not a mapping:\n{merged}");
}

fn generated_matchers() -> NamesPaths {
    NamesPaths::new(
        vec![r".*\.conjure.go".to_string()],
        vec!["internal/generated".to_string()],
    )
}

#[test]
fn enable_without_linters_key() {
    let merged = merge(
        "version: \"2\"\n",
        "linters:\n  # additive to default\n  enable:\n    - copyloopvar\n",
    );
    assert_eq!(merged, "version: \"2\"\nlinters:\n  enable:\n    - copyloopvar\n");
}

#[test]
fn enable_without_enable_key() {
    let merged = merge(
        "version: \"2\"\nlinters:\n  default: none\n",
        "linters:\n  enable:\n    - copyloopvar\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      enable:
        - copyloopvar
    "#);
}

#[test]
fn enable_appends_to_existing_list() {
    let merged = merge(
        "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n",
        "linters:\n  enable:\n    - copyloopvar\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      enable:
        - compiles
        - copyloopvar
    "#);
}

#[test]
fn disable_creates_list_after_enable() {
    let merged = merge(
        "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n",
        "linters:\n  disable:\n    - copyloopvar\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      enable:
        - compiles
      disable:
        - copyloopvar
    "#);
}

#[test]
fn exclusion_rule_creates_exclusions() {
    let merged = merge(
        "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n",
        r#"linters:
  exclusions:
    rules:
      - linters:
          - revive
        text: "should have comment or be unexported"
"#,
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      enable:
        - compiles
      exclusions:
        rules:
          - linters:
              - revive
            text: should have comment or be unexported
    "#);
}

#[test]
fn exclusion_rule_appends_after_existing_rules() {
    let base = r#"version: "2"
linters:
  default: none
  enable:
    - compiles
  exclusions:
    rules:
      - linters:
          - compiles
        text: test text for compiles
"#;
    let merged = merge(
        base,
        "linters:\n  exclusions:\n    rules:\n      - linters:\n          - revive\n        text: should have comment or be unexported\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      enable:
        - compiles
      exclusions:
        rules:
          - linters:
              - compiles
            text: test text for compiles
          - linters:
              - revive
            text: should have comment or be unexported
    "#);
}

#[test]
fn exclusion_paths_append_or_create() {
    let base = "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n";
    let config = "linters:\n  exclusions:\n    paths:\n      - lib/bad.go\n";
    assert_eq!(
        merge(base, config),
        "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n  exclusions:\n    paths:\n      - lib/bad.go\n"
    );

    let base = format!("{base}  exclusions:\n    paths:\n      - lib/original.go\n");
    assert_eq!(
        merge(&base, config),
        "version: \"2\"\nlinters:\n  default: none\n  enable:\n    - compiles\n  exclusions:\n    paths:\n      - lib/original.go\n      - lib/bad.go\n"
    );
}

#[test]
fn full_override_keeps_comments_and_blank_lines() {
    let base = r#"version: "2"

linters:
  default: none

  # Enable the default linters
  enable:
    - errcheck
    - govet
    - ineffassign
    - revive
    - unconvert
    - unused

  exclusions:
    rules:
      - linters:
          - compiles
        text: test text for compiles
    paths:
      - lib/base.go

run:
  relative-path-mode: gomod
"#;
    let config = r#"linters:
  enable:
    - copyloopvar
  disable:
    - asasalint
  exclusions:
    rules:
      - linters:
          - revive
        text: should have comment or be unexported
    paths:
      - lib/bad.go
"#;
    insta::assert_snapshot!(merge(base, config), @r#"
    version: "2"

    linters:
      default: none

      # Enable the default linters
      enable:
        - errcheck
        - govet
        - ineffassign
        - revive
        - unconvert
        - unused
        - copyloopvar

      exclusions:
        rules:
          - linters:
              - compiles
            text: test text for compiles
          - linters:
              - revive
            text: should have comment or be unexported
        paths:
          - lib/base.go
          - lib/bad.go
      disable:
        - asasalint

    run:
      relative-path-mode: gomod
    "#);
}

#[test]
fn missing_version_is_added() {
    let merged = merge("linters:\n  default: none\n", "");
    assert_eq!(merged, "linters:\n  default: none\nversion: \"2\"\n");
}

#[test]
fn exclude_matchers_become_exclusion_paths() {
    let merged = merge_exclude_matchers(DEFAULT_CONFIG, &generated_matchers()).unwrap();
    let expected = DEFAULT_CONFIG.replace(
        "    - unused\n",
        "    - unused\n  exclusions:\n    paths:\n      - \".+/.*\\\\.conjure.go$\"\n      - \"^.*\\\\.conjure.go$\"\n      - internal/generated/.*\n      - ^internal/generated$\n",
    );
    assert_eq!(merged, expected);
}

#[test]
fn empty_matchers_leave_config_unchanged() {
    let merged = merge_exclude_matchers(DEFAULT_CONFIG, &NamesPaths::default()).unwrap();
    assert_eq!(merged, DEFAULT_CONFIG);
    let merged = merge_default_config(DEFAULT_CONFIG, &NamesPaths::default(), None).unwrap();
    assert_eq!(merged, DEFAULT_CONFIG);
}

#[test]
fn matchers_with_empty_override() {
    let config = OverrideConfig::from_yaml_str("").unwrap();
    let merged = merge_default_config(DEFAULT_CONFIG, &generated_matchers(), Some(&config)).unwrap();
    assert_eq!(
        merged,
        merge_exclude_matchers(DEFAULT_CONFIG, &generated_matchers()).unwrap()
    );
}

#[test]
fn full_override_on_default_config() {
    let config = OverrideConfig::from_yaml_str(
        r#"
linters:
  enable:
    - copyloopvar
  disable:
    - compiles
  settings:
    errcheck:
      check-type-assertions: true
      check-blank: true
  exclusions:
    rules:
      - path: _test\.go
        linters:
          - errcheck
    paths:
      - ".*\\.my\\.go$"
    paths-except:
      - lib/bad.go
"#,
    )
    .unwrap();
    let merged = merge_default_config(DEFAULT_CONFIG, &NamesPaths::default(), Some(&config)).unwrap();
    insta::assert_snapshot!(merged, @r#"
    version: "2"

    linters:
      default: none

      settings:
        custom:
          # Enable the custom "compiles" linter
          compiles:
            type: "module"
            description: A linter that verifies that the code compiles successfully.
        errcheck:
          check-type-assertions: true
          check-blank: true

      # Enable the default linters
      enable:
        - compiles
        - errcheck
        - govet
        - ineffassign
        - revive
        - unconvert
        - unused
        - copyloopvar
      disable:
        - compiles
      exclusions:
        rules:
          - linters:
              - errcheck
            path: "_test\\.go"
        paths:
          - ".*\\.my\\.go$"
        paths-except:
          - lib/bad.go

    run:
      relative-path-mode: gomod
    "#);
}

#[test]
fn settings_add_sibling_and_keep_existing() {
    let config = OverrideConfig::from_yaml_str(
        "linters:\n  settings:\n    errcheck:\n      check-blank: true\n",
    )
    .unwrap();
    let merged = merge_config(DEFAULT_CONFIG, Some(&config)).unwrap();
    let expected = DEFAULT_CONFIG.replace(
        "compiles successfully.\n",
        "compiles successfully.\n    errcheck:\n      check-blank: true\n",
    );
    assert_eq!(merged, expected);
}

#[test]
fn settings_create_nested_path_in_empty_document() {
    let entries: IndexMap<String, Value> = [
        ("key-1".to_string(), Value::string("value-1")),
        ("key-2".to_string(), Value::from(2i64)),
        (
            "key-3".to_string(),
            Value::mapping([("inner-key-1", "inner-value-1")]),
        ),
    ]
    .into_iter()
    .collect();
    let path = YamlPath::parse("/path/to/map").unwrap();
    let merged = merge_into_mapping("", &path, &entries).unwrap();
    insta::assert_snapshot!(merged, @r"
    path:
      to:
        map:
          key-1: value-1
          key-2: 2
          key-3:
            inner-key-1: inner-value-1
    ");
}

#[test]
fn settings_replace_existing_key_wholesale() {
    let base = r#"linters:
  settings:
    custom:
      compiles:
        type: "module"
        description: A linter that verifies that the code compiles successfully.
"#;
    let entries: IndexMap<String, Value> = [(
        "compiles".to_string(),
        Value::mapping([
            ("type", "module"),
            ("description", "Custom description"),
            ("new-key", "new-value"),
        ]),
    )]
    .into_iter()
    .collect();
    let path = YamlPath::parse("/linters/settings/custom").unwrap();
    let merged = merge_into_mapping(base, &path, &entries).unwrap();
    insta::assert_snapshot!(merged, @r"
    linters:
      settings:
        custom:
          compiles:
            type: module
            description: Custom description
            new-key: new-value
    ");
}

#[test]
fn settings_add_mapping_with_sequence() {
    let base = "linters:\n  settings:\n    custom: {}\n";
    let entries: IndexMap<String, Value> = [(
        "errcheck".to_string(),
        Value::mapping([
            ("check-type-assertions", Value::from(true)),
            (
                "exclude-functions",
                Value::sequence(["io/ioutil.ReadFile", "io.Copy(*bytes.Buffer)"]),
            ),
        ]),
    )]
    .into_iter()
    .collect();
    let path = YamlPath::parse("/linters/settings").unwrap();
    let merged = merge_into_mapping(base, &path, &entries).unwrap();
    assert_eq!(
        merged,
        "linters:\n  settings:\n    custom: {}\n    errcheck:\n      check-type-assertions: true\n      exclude-functions:\n        - io/ioutil.ReadFile\n        - io.Copy(*bytes.Buffer)\n"
    );
}

#[test]
fn merging_twice_appends_twice() {
    let config = OverrideConfig::from_yaml_str("linters:\n  enable: [a]\n").unwrap();
    let once = merge_config("version: \"2\"\n", Some(&config)).unwrap();
    let twice = merge_config(&once, Some(&config)).unwrap();
    assert_eq!(twice, "version: \"2\"\nlinters:\n  enable:\n    - a\n    - a\n");
}

#[test]
fn settings_sibling_after_long_first_key() {
    let base = r#"version: "2"
linters:
  default-severity-level: warning
  settings:
    gocyclo-with-a-long-name:
      min-complexity: 10
"#;
    let merged = merge(
        base,
        "linters:\n  enable: [copyloopvar]\n  settings:\n    errcheck:\n      check-blank: true\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default-severity-level: warning
      settings:
        gocyclo-with-a-long-name:
          min-complexity: 10
        errcheck:
          check-blank: true
      enable:
        - copyloopvar
    "#);
}

#[test]
fn enable_key_with_only_a_comment() {
    let base = "version: \"2\"\nlinters:\n  enable: # filled in by overrides\n  default: none\n";
    let merged = merge(base, "linters:\n  enable: [copyloopvar, errorlint]\n");
    assert_eq!(
        merged,
        "version: \"2\"\nlinters:\n  enable: # filled in by overrides\n    - copyloopvar\n    - errorlint\n  default: none\n"
    );
    let parsed: serde_yaml::Value = serde_yaml::from_str(&merged).unwrap();
    assert_eq!(parsed["linters"]["default"].as_str(), Some("none"));
}

#[test]
fn block_scalar_as_last_value() {
    let base = r#"version: "2"
linters:
  default: none
  settings:
    custom:
      compiles:
        description: |
          Verifies that the code

          compiles successfully.
"#;
    let merged = merge(base, "linters:\n  enable: [copyloopvar]\n");
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
      default: none
      settings:
        custom:
          compiles:
            description: |
              Verifies that the code

              compiles successfully.
      enable:
        - copyloopvar
    "#);
    let parsed: serde_yaml::Value = serde_yaml::from_str(&merged).unwrap();
    assert_eq!(
        parsed["linters"]["settings"]["custom"]["compiles"]["description"].as_str(),
        Some("Verifies that the code\n\ncompiles successfully.\n")
    );

    let base = "version: \"2\"\nlinters:\n  note: >-\n    folded\n    text\n";
    assert_eq!(
        merge(base, "linters:\n  disable: [unused]\n"),
        "version: \"2\"\nlinters:\n  note: >-\n    folded\n    text\n  disable:\n    - unused\n"
    );
}

#[test]
fn four_space_indented_base() {
    let base = "version: \"2\"\nlinters:\n    default: none\n    enable:\n        - errcheck\n";
    let merged = merge(
        base,
        "linters:\n  enable: [copyloopvar]\n  settings:\n    errcheck:\n      check-blank: true\n",
    );
    insta::assert_snapshot!(merged, @r#"
    version: "2"
    linters:
        default: none
        enable:
            - errcheck
            - copyloopvar
        settings:
          errcheck:
            check-blank: true
    "#);
}

#[test]
fn unindented_sequences_of_mappings() {
    let base = r#"version: "2"
linters:
  exclusions:
    rules:
    - path: _test\.go
      linters:
      - errcheck
    paths:
    - vendor
"#;
    let config = r#"linters:
  exclusions:
    rules:
      - linters: [revive]
        text: should have comment
    paths:
      - lib/bad.go
"#;
    insta::assert_snapshot!(merge(base, config), @r#"
    version: "2"
    linters:
      exclusions:
        rules:
        - path: _test\.go
          linters:
          - errcheck
        - linters:
            - revive
          text: should have comment
        paths:
        - vendor
        - lib/bad.go
    "#);
}

#[test]
fn crlf_base_keeps_line_endings() {
    let merged = merge("linters:\r\n  default: none\r\n", "linters:\n  enable: [a]\n");
    assert_eq!(
        merged,
        "linters:\r\n  default: none\r\n  enable:\r\n    - a\r\nversion: \"2\"\r\n"
    );
}
