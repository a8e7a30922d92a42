/*
 * convert.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversion from override configuration types to patch values.

use crate::{ConfigError, ExclusionRule, Result};
use indexmap::IndexMap;
use lintcfg_patch::{Scalar, Value, YamlPath};

/// Convert a `serde_yaml` value into a patch value.
///
/// `path` is where the value will live in the document and is only used to
/// report invalid keys. Tags are dropped.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKey`] for any mapping key, at any depth,
/// that is not a string.
pub fn value_from_yaml(yaml: &serde_yaml::Value, path: &YamlPath) -> Result<Value> {
    let value = match yaml {
        serde_yaml::Value::Null => Value::null(),
        serde_yaml::Value::Bool(b) => Value::from(*b),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::from(i),
            (None, Some(u)) => Value::from(u),
            (None, None) => Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        serde_yaml::Value::String(s) => Value::string(s.as_str()),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| value_from_yaml(item, &path.child(index.to_string())))
                .collect::<Result<_>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => Value::Mapping(mapping_from_yaml(mapping, path)?),
        serde_yaml::Value::Tagged(tagged) => value_from_yaml(&tagged.value, path)?,
    };
    Ok(value)
}

/// Convert a `serde_yaml` mapping into an ordered string-keyed mapping.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKey`] as for [`value_from_yaml`].
pub fn mapping_from_yaml(
    mapping: &serde_yaml::Mapping,
    path: &YamlPath,
) -> Result<IndexMap<String, Value>> {
    let mut out = IndexMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let serde_yaml::Value::String(key) = key else {
            return Err(ConfigError::InvalidKey {
                path: path.clone(),
                key: key_text(key),
            });
        };
        let converted = value_from_yaml(value, &path.child(key.as_str()))?;
        out.insert(key.clone(), converted);
    }
    Ok(out)
}

fn key_text(key: &serde_yaml::Value) -> String {
    match serde_yaml::to_string(key) {
        Ok(text) => text.trim_end().to_string(),
        Err(_) => format!("{key:?}"),
    }
}

impl From<&ExclusionRule> for Value {
    fn from(rule: &ExclusionRule) -> Self {
        let mut map = IndexMap::new();
        if !rule.linters.is_empty() {
            map.insert("linters".to_string(), Value::sequence(rule.linters.iter().map(String::as_str)));
        }
        for (key, field) in [
            ("path", &rule.path),
            ("path-except", &rule.path_except),
            ("text", &rule.text),
            ("source", &rule.source),
        ] {
            if !field.is_empty() {
                map.insert(key.to_string(), Value::string(field.as_str()));
            }
        }
        Value::Mapping(map)
    }
}
