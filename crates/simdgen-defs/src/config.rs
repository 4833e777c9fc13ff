//! Parsed metric specifications.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{DefinitionError, Result};
use crate::section::Section;

/// A complete metric definition: a name and all three code fragments.
///
/// Construction goes through [`MetricSpec::new`], which validates the name;
/// a value of this type therefore always has every section present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSpec {
    name: String,
    setup: String,
    body: String,
    remainder: String,
}

impl MetricSpec {
    /// Build a specification from its parts.
    pub fn new(
        name: impl Into<String>,
        setup: impl Into<String>,
        body: impl Into<String>,
        remainder: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if !is_c_identifier(&name) {
            return Err(DefinitionError::InvalidMetricName { name });
        }
        Ok(Self {
            name,
            setup: setup.into(),
            body: body.into(),
            remainder: remainder.into(),
        })
    }

    /// Metric name (the definition file's stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text of one section, exactly as it appeared between the labels.
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Setup => &self.setup,
            Section::Body => &self.body,
            Section::Remainder => &self.remainder,
        }
    }

    pub fn setup(&self) -> &str {
        &self.setup
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn remainder(&self) -> &str {
        &self.remainder
    }
}

/// Whether `name` is usable as a C/C++ identifier.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// All metrics discovered in one generation run, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricConfig {
    metrics: BTreeMap<String, MetricSpec>,
}

impl MetricConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric, returning any previous specification with the same name.
    pub fn insert(&mut self, spec: MetricSpec) -> Option<MetricSpec> {
        self.metrics.insert(spec.name.clone(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&MetricSpec> {
        self.metrics.get(name)
    }

    /// Metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricSpec> {
        self.metrics.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.metrics.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl FromIterator<MetricSpec> for MetricConfig {
    fn from_iter<I: IntoIterator<Item = MetricSpec>>(iter: I) -> Self {
        let mut config = Self::new();
        for spec in iter {
            config.insert(spec);
        }
        config
    }
}

impl fmt::Display for MetricConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in self.iter() {
            writeln!(f, "For function {}:", spec.name())?;
            writeln!(f)?;
            for section in Section::ALL {
                writeln!(f, "Showing section: {section}:")?;
                writeln!(f)?;
                writeln!(f, "{}", spec.section(section))?;
            }
            writeln!(f, "{}", "=".repeat(80))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_c_identifier("manhattan"));
        assert!(is_c_identifier("_l2_sq"));
        assert!(is_c_identifier("cos2"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("2norm"));
        assert!(!is_c_identifier("my-metric"));
        assert!(!is_c_identifier("dist.v2"));
    }

    #[test]
    fn spec_rejects_bad_name() {
        let err = MetricSpec::new("my metric", "", "", "").unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidMetricName { .. }));
    }

    #[test]
    fn config_is_name_ordered() {
        let config: MetricConfig = ["minkowski", "euclidean", "manhattan"]
            .into_iter()
            .map(|n| MetricSpec::new(n, "", "", "").unwrap())
            .collect();
        assert_eq!(config.names(), vec!["euclidean", "manhattan", "minkowski"]);
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn display_shows_every_section() {
        let mut config = MetricConfig::new();
        config.insert(MetricSpec::new("foo", "x += 1;\n", "y += x;\n", "return y;\n").unwrap());
        let out = config.to_string();
        assert!(out.starts_with("For function foo:\n"));
        assert!(out.contains("Showing section: SETUP:\n\nx += 1;\n"));
        assert!(out.contains("Showing section: REMAINDER:\n\nreturn y;\n"));
        assert!(out.trim_end().ends_with(&"=".repeat(80)));
    }
}
