//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render a serializable value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => {
                let mut value = serde_json::to_value(value)?;
                prune_nulls(&mut value);
                toml::to_string_pretty(&value)?
            }
        })
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print a message to stderr if not in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

// TOML has no null; drop null entries so absent values are simply omitted.
fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(prune_nulls);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        counts: BTreeMap<String, usize>,
    }

    fn sample() -> Sample {
        Sample {
            name: "vault".to_string(),
            counts: [("a".to_string(), 1)].into_iter().collect(),
        }
    }

    #[test]
    fn test_render_formats() {
        let json = Output::new(OutputFormat::Json, false).render(&sample()).unwrap();
        assert!(json.contains("\"name\": \"vault\""));

        let yaml = Output::new(OutputFormat::Yaml, false).render(&sample()).unwrap();
        assert!(yaml.contains("name: vault"));

        let toml = Output::new(OutputFormat::Toml, true).render(&sample()).unwrap();
        assert!(toml.contains("name = \"vault\""));
        assert!(toml.contains("[counts]"));
    }

    #[test]
    fn test_toml_omits_null_values() {
        use crate::types::FrontmatterValue;

        #[derive(Serialize)]
        struct Group {
            value: FrontmatterValue,
            items: Vec<FrontmatterValue>,
            count: usize,
        }

        let group = Group {
            value: FrontmatterValue::Null,
            items: vec![FrontmatterValue::Null, FrontmatterValue::String("x".to_string())],
            count: 2,
        };
        let toml = Output::new(OutputFormat::Toml, false).render(&group).unwrap();
        assert!(toml.contains("count = 2"));
        assert!(toml.contains("\"x\""));
        assert!(!toml.contains("value"));

        let json = Output::new(OutputFormat::Json, false).render(&group).unwrap();
        assert!(json.contains("\"value\": null"));
    }
}
