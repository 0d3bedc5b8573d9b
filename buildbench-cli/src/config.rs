//! Configuration loading from buildbench.toml
//!
//! BuildBench configuration can be specified in a `buildbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use buildbench_core::{Dimension, Value};
use buildbench_logic::RuleSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "buildbench.toml";

/// BuildBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Default-inference settings
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Run settings handed to the execution engine
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for default inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Canonical tool versions kept when `tool-version` is not filtered.
    /// Entries ending in `*` match by prefix.
    #[serde(default = "default_tool_versions")]
    pub tool_versions: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tool_versions: default_tool_versions(),
        }
    }
}

fn default_tool_versions() -> Vec<String> {
    buildbench_logic::DEFAULT_TOOL_VERSIONS
        .iter()
        .map(|v| v.to_string())
        .collect()
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Measured iterations per variant
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Warm-up iterations per variant
    #[serde(default)]
    pub warmup: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup: 0,
        }
    }
}

fn default_iterations() -> u32 {
    1
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the plan to this file instead of stdout
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable configuration"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Compile the rule set, validating the configured tool versions
    pub fn rule_set(&self) -> anyhow::Result<RuleSet> {
        let tool_versions = self
            .selection
            .tool_versions
            .iter()
            .map(|raw| {
                Dimension::ToolVersion
                    .parse_value(raw)
                    .map_err(|e| anyhow::anyhow!("[selection] tool_versions: {}", e))
            })
            .collect::<anyhow::Result<Vec<Value>>>()?;
        Ok(RuleSet::standard(tool_versions))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# BuildBench Configuration

[selection]
# Tool versions kept when --parameters does not mention tool-version.
# A trailing '*' matches by prefix.
tool_versions = ["2.0.3", "2.1.*"]

[runner]
# Measured iterations per variant
iterations = 1
# Warm-up iterations per variant
warmup = 0

[output]
# Default output format: human or json
format = "human"
# Write the plan to a file instead of stdout (uncomment to enable)
# path = "target/buildbench/plan.json"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.selection.tool_versions, vec!["2.0.3", "2.1.*"]);
        assert_eq!(config.runner.iterations, 1);
        assert_eq!(config.runner.warmup, 0);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [selection]
            tool_versions = ["2.1.4"]

            [runner]
            warmup = 2
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.selection.tool_versions, vec!["2.1.4"]);
        assert_eq!(config.runner.warmup, 2);
        // Defaults should still apply
        assert_eq!(config.runner.iterations, 1);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = BenchConfig::default_toml();
        let config: BenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.selection.tool_versions, vec!["2.0.3", "2.1.*"]);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_rule_set_rejects_empty_tool_version() {
        let mut config = BenchConfig::default();
        config.selection.tool_versions.push(String::new());
        assert!(config.rule_set().is_err());
    }

    #[test]
    fn test_rule_set_compiles() {
        let rules = BenchConfig::default().rule_set().unwrap();
        assert_eq!(rules.hard().len(), 3);
        assert_eq!(rules.defaults().len(), 7);
    }
}
