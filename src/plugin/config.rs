//! Plugin configuration.
//!
//! A [`SearchPluginConfiguration`] names a plugin type and declares the
//! search context fields its search form offers. Configurations are plain
//! JSON documents so they can be exported and imported.

use crate::error::{Result, SearchError};
use crate::plugin::SearchContext;
use crate::plugin::metrics::MetricConfiguration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `{{ name }}` placeholders in a query template
static TEMPLATE_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("template variable pattern is valid")
});

/// A typed parameter of a plugin's search context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchContextField {
    String {
        name: String,
        #[serde(default)]
        help: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default)]
        placeholder: String,
    },
    Int {
        name: String,
        #[serde(default)]
        help: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<i64>,
        #[serde(default)]
        placeholder: String,
    },
    Double {
        name: String,
        #[serde(default)]
        help: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<f64>,
        #[serde(default)]
        placeholder: String,
    },
    Bool {
        name: String,
        #[serde(default)]
        help: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<bool>,
    },
}

impl SearchContextField {
    /// Optional string field without default
    pub fn string(name: impl Into<String>) -> Self {
        SearchContextField::String {
            name: name.into(),
            help: String::new(),
            required: false,
            default_value: None,
            placeholder: String::new(),
        }
    }

    /// Optional int field
    pub fn int(name: impl Into<String>, default_value: Option<i64>) -> Self {
        SearchContextField::Int {
            name: name.into(),
            help: String::new(),
            required: false,
            default_value,
            placeholder: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchContextField::String { name, .. }
            | SearchContextField::Int { name, .. }
            | SearchContextField::Double { name, .. }
            | SearchContextField::Bool { name, .. } => name,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            SearchContextField::String { required, .. }
            | SearchContextField::Int { required, .. }
            | SearchContextField::Double { required, .. }
            | SearchContextField::Bool { required, .. } => *required,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        match &mut self {
            SearchContextField::String { required, .. }
            | SearchContextField::Int { required, .. }
            | SearchContextField::Double { required, .. }
            | SearchContextField::Bool { required, .. } => *required = true,
        }
        self
    }

    /// Default value rendered the way it appears in a search context
    pub fn default_string(&self) -> Option<String> {
        match self {
            SearchContextField::String { default_value, .. } => default_value.clone(),
            SearchContextField::Int { default_value, .. } => default_value.map(|v| v.to_string()),
            SearchContextField::Double { default_value, .. } => {
                default_value.map(|v| v.to_string())
            }
            SearchContextField::Bool { default_value, .. } => default_value.map(|v| v.to_string()),
        }
    }

    /// Check that a context value parses as this field's type
    pub fn validate(&self, value: &str) -> Result<()> {
        let trimmed = value.trim();
        let (ok, expected) = match self {
            SearchContextField::String { .. } => (true, "string"),
            SearchContextField::Int { .. } => (trimmed.parse::<i64>().is_ok(), "integer"),
            SearchContextField::Double { .. } => (
                trimmed.parse::<f64>().is_ok_and(|v| v.is_finite()),
                "number",
            ),
            SearchContextField::Bool { .. } => (trimmed.parse::<bool>().is_ok(), "boolean"),
        };

        if ok {
            Ok(())
        } else {
            Err(SearchError::InvalidContextValue {
                field: self.name().to_string(),
                expected,
                value: value.to_string(),
            })
        }
    }
}

/// Configuration of one search plugin instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPluginConfiguration {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    /// Key of the [`PluginFactory`](crate::plugin::PluginFactory) that builds the plugin
    pub plugin_type: String,
    #[serde(default)]
    pub field_config: Vec<SearchContextField>,
    /// Relevance metrics to evaluate this plugin with
    #[serde(default)]
    pub metrics: Vec<MetricConfiguration>,
    /// Plugin specific settings, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_settings: Option<serde_json::Value>,
}

impl SearchPluginConfiguration {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        plugin_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            plugin_type: plugin_type.into(),
            field_config: Vec::new(),
            metrics: Vec::new(),
            plugin_settings: None,
        }
    }

    pub fn with_field(mut self, field: SearchContextField) -> Self {
        self.field_config.push(field);
        self
    }

    pub fn with_metric(mut self, metric: MetricConfiguration) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn metric(&self, name: &str) -> Option<&MetricConfiguration> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.plugin_settings = Some(settings);
        self
    }

    pub fn field(&self, name: &str) -> Option<&SearchContextField> {
        self.field_config.iter().find(|f| f.name() == name)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural constraints: a plugin type plus unique, non-blank
    /// field and metric names
    pub fn validate(&self) -> Result<()> {
        if self.plugin_type.trim().is_empty() {
            return Err(SearchError::config("plugin_type must not be blank"));
        }

        let mut seen = HashSet::new();
        for field in &self.field_config {
            let name = field.name();
            if name.trim().is_empty() {
                return Err(SearchError::config("search context field name must not be blank"));
            }
            if !seen.insert(name) {
                return Err(SearchError::config(format!(
                    "duplicate search context field: {name}"
                )));
            }
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if metric.name.trim().is_empty() {
                return Err(SearchError::config("metric name must not be blank"));
            }
            if !seen.insert(metric.name.as_str()) {
                return Err(SearchError::config(format!(
                    "duplicate metric: {}",
                    metric.name
                )));
            }
        }
        Ok(())
    }

    /// Build the effective search context for a raw one.
    ///
    /// Blank or missing values take the field's default. A required field
    /// that still has no value is an error, as is a value that does not
    /// parse as its field's type. Keys without a declared field are kept.
    pub fn resolve_context(&self, raw: &SearchContext) -> Result<SearchContext> {
        let mut resolved = raw.clone();

        for field in &self.field_config {
            let name = field.name();
            let supplied = raw.get(name).filter(|v| !v.trim().is_empty());

            match supplied {
                Some(value) => field.validate(value)?,
                None => match field.default_string() {
                    Some(default) => {
                        resolved.insert(name.to_string(), default);
                    }
                    None if field.is_required() => {
                        return Err(SearchError::MissingContextField(name.to_string()));
                    }
                    None => {}
                },
            }
        }

        Ok(resolved)
    }

    /// Add a string field for every template variable not declared yet
    pub fn with_template_fields(mut self, template: &str) -> Self {
        for variable in template_variables(template) {
            if self.field(&variable).is_none() {
                self.field_config.push(SearchContextField::string(variable));
            }
        }
        self
    }
}

/// Variables referenced as `{{ name }}` in a query template, sorted and distinct
pub fn template_variables(template: &str) -> Vec<String> {
    let mut variables: Vec<String> = TEMPLATE_VAR_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    variables.sort();
    variables.dedup();
    variables
}
