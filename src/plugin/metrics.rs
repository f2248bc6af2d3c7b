//! Relevance metric configuration carried by a plugin configuration.
//!
//! rankdex does not compute metrics; it keeps their configuration so a
//! configuration file survives a load and save unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relevance metrics a plugin configuration can ask an evaluator for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    PrecisionAtK,
    RecallAtK,
    MeanReciprocalRank,
    ExpectedMeanReciprocalRank,
    DiscountedCumulativeGain,
    NormalizedDiscountedCumulativeGain,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::PrecisionAtK,
        Metric::RecallAtK,
        Metric::MeanReciprocalRank,
        Metric::ExpectedMeanReciprocalRank,
        Metric::DiscountedCumulativeGain,
        Metric::NormalizedDiscountedCumulativeGain,
    ];

    /// Name as it appears in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Metric::PrecisionAtK => "PrecisionAtK",
            Metric::RecallAtK => "RecallAtK",
            Metric::MeanReciprocalRank => "MeanReciprocalRank",
            Metric::ExpectedMeanReciprocalRank => "ExpectedMeanReciprocalRank",
            Metric::DiscountedCumulativeGain => "DiscountedCumulativeGain",
            Metric::NormalizedDiscountedCumulativeGain => "NormalizedDiscountedCumulativeGain",
        }
    }

    /// Parameters the metric understands, with their defaults
    pub fn supported_params(self) -> Vec<MetricParam> {
        let k = MetricParam::new("k", 5);
        let threshold = MetricParam::new("relevant_rating_threshold", 1);
        match self {
            Metric::PrecisionAtK | Metric::RecallAtK | Metric::MeanReciprocalRank => {
                vec![k, threshold]
            }
            Metric::ExpectedMeanReciprocalRank => vec![k, MetricParam::new("max_relevance", 5)],
            Metric::DiscountedCumulativeGain | Metric::NormalizedDiscountedCumulativeGain => {
                vec![k, MetricParam::new("use_linear_gains", false)]
            }
        }
    }
}

/// A named metric parameter; values are JSON scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricParam {
    pub name: String,
    pub value: Value,
}

impl MetricParam {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a value typed into a form: integers and booleans are
    /// recognized, anything else stays a string.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let trimmed = text.trim();
        let value = if let Ok(int) = trimmed.parse::<i64>() {
            Value::from(int)
        } else if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
            Value::from(trimmed.eq_ignore_ascii_case("true"))
        } else {
            Value::from(text)
        };
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One configured metric: a unique name, the metric kind and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfiguration {
    pub name: String,
    pub metric: Metric,
    #[serde(default)]
    pub params: Vec<MetricParam>,
}

impl MetricConfiguration {
    /// Configuration without parameters, named after the metric
    pub fn new(metric: Metric) -> Self {
        Self {
            name: metric.name().to_string(),
            metric,
            params: Vec::new(),
        }
    }

    /// Configuration using the metric's default parameters
    pub fn with_defaults(name: impl Into<String>, metric: Metric) -> Self {
        Self {
            name: name.into(),
            metric,
            params: metric.supported_params(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Set a parameter, replacing an existing one with the same name
    pub fn set_param(&mut self, param: MetricParam) {
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => existing.value = param.value,
            None => self.params.push(param),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_match_serde() {
        for metric in Metric::ALL {
            let json = serde_json::to_value(metric).unwrap();
            assert_eq!(json, Value::from(metric.name()));
        }
    }

    #[test]
    fn test_param_from_text() {
        assert_eq!(MetricParam::from_text("k", " 10 ").value, Value::from(10));
        assert_eq!(MetricParam::from_text("linear", "TRUE").value, Value::from(true));
        assert_eq!(MetricParam::from_text("label", "top ten").value, Value::from("top ten"));
    }

    #[test]
    fn test_defaults_and_set_param() {
        let mut config = MetricConfiguration::with_defaults("p@5", Metric::PrecisionAtK);
        assert_eq!(config.param("k"), Some(&Value::from(5)));

        config.set_param(MetricParam::new("k", 10));
        config.set_param(MetricParam::new("extra", "x"));
        assert_eq!(config.param("k"), Some(&Value::from(10)));
        assert_eq!(config.params.len(), 3);
    }

    #[test]
    fn test_json_shape() {
        let config = MetricConfiguration::new(Metric::NormalizedDiscountedCumulativeGain);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["name"], "NormalizedDiscountedCumulativeGain");
        assert_eq!(json["metric"], "NormalizedDiscountedCumulativeGain");
        assert_eq!(json["params"], serde_json::json!([]));

        let parsed: MetricConfiguration =
            serde_json::from_str(r#"{"name": "mrr", "metric": "MeanReciprocalRank"}"#).unwrap();
        assert!(parsed.params.is_empty());
        assert_eq!(parsed.metric, Metric::MeanReciprocalRank);
    }
}
