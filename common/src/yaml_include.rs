use std::fs;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader, yaml::Hash};

use crate::config::ConfigError;

const INCLUDE_DIRECTIVE: &str = "!include";
const MAX_INCLUDE_DEPTH: usize = 16;

/// Loads a YAML file, resolving `!include <path>` lines relative to the file.
///
/// Included documents are merged first, in order; the including file's own
/// content overrides them key by key.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, ConfigError> {
    let res = process_includes_recursive(path, 0)?;
    tracing::debug!(path = %path.display(), "Processed config includes");
    Ok(res)
}

fn process_includes_recursive(path: &Path, depth: usize) -> Result<Yaml, ConfigError> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(ConfigError::IncludeDepth {
            path: path.to_path_buf(),
            limit: MAX_INCLUDE_DEPTH,
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new(""));

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|&line| line.trim().starts_with(INCLUDE_DIRECTIVE));

    let mut merged_includes: Option<Yaml> = None;
    for line in includes {
        let include_path = line.trim()[INCLUDE_DIRECTIVE.len()..].trim();
        if include_path.is_empty() {
            return Err(ConfigError::EmptyInclude {
                path: path.to_path_buf(),
            });
        }

        let included = process_includes_recursive(&base_path.join(include_path), depth + 1)?;
        merged_includes = Some(match merged_includes {
            Some(acc) => merge_yaml(&acc, &included),
            None => included,
        });
    }

    let merged_rest = YamlLoader::load_from_str(&rest.join("\n"))?
        .into_iter()
        .reduce(|acc, doc| merge_yaml(&acc, &doc))
        .unwrap_or_else(|| Yaml::Hash(Hash::new()));

    match merged_includes {
        Some(merged_includes) => Ok(merge_yaml(&merged_includes, &merged_rest)),
        None => Ok(merged_rest),
    }
}

fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                match base_hash.get(key) {
                    Some(base_value) => {
                        result.insert(key.clone(), merge_yaml(base_value, value));
                    }
                    None => {
                        result.insert(key.clone(), value.clone());
                    }
                }
            }
            Yaml::Hash(result)
        }
        // An empty document must not wipe out what the includes provided.
        (base_value, Yaml::Null) => base_value.clone(),
        (_, override_value) => override_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Yaml {
        YamlLoader::load_from_str(source).unwrap().remove(0)
    }

    #[test]
    fn nested_keys_are_merged_not_replaced() {
        let base = parse("backend:\n  server_address: 0.0.0.0:80\n  log_level: info\n");
        let over = parse("backend:\n  log_level: debug\n");

        let merged = merge_yaml(&base, &over);

        assert_eq!(merged["backend"]["server_address"].as_str(), Some("0.0.0.0:80"));
        assert_eq!(merged["backend"]["log_level"].as_str(), Some("debug"));
    }

    #[test]
    fn scalar_override_wins() {
        let merged = merge_yaml(&parse("a: 1"), &parse("a: 2"));
        assert_eq!(merged["a"].as_i64(), Some(2));
    }

    #[test]
    fn null_override_keeps_base() {
        let merged = merge_yaml(&parse("a: 1"), &Yaml::Null);
        assert_eq!(merged["a"].as_i64(), Some(1));
    }
}
