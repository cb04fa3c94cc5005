use std::path::PathBuf;

use ctet_evaluator::{
    placement_evaluator::{HeuristicPlacementEvaluator, HeuristicWeights},
    turn_evaluator::TurnEvaluator,
};
use serde::{Deserialize, Serialize};

/// A named set of heuristic weights, loaded from JSON.
///
/// ```json
/// {
///   "name": "default",
///   "weights": { "height_differential": 0.0, "holes": 3.0, "rows_cleared": 2.0, "roughness": 0.5 },
///   "log_path": "debug/log.txt"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    pub name: String,
    #[serde(default)]
    pub weights: HeuristicWeights,
    /// Debug log written during `decide` and `simulate` unless overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            weights: HeuristicWeights::default(),
            log_path: None,
        }
    }
}

impl BotConfig {
    pub fn turn_evaluator(&self) -> TurnEvaluator<'static> {
        TurnEvaluator::new(Box::new(HeuristicPlacementEvaluator::new(self.weights)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_json() {
        let json = serde_json::to_value(BotConfig::default()).unwrap();
        assert_eq!(json["name"], "default");
        assert_eq!(json["weights"]["holes"], 3.0);
        assert!(json.get("log_path").is_none());

        let parsed: BotConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, BotConfig::default());
    }

    #[test]
    fn test_weights_default_when_omitted() {
        let config: BotConfig =
            serde_json::from_str(r#"{"name": "logging", "log_path": "debug/log.txt"}"#).unwrap();
        assert_eq!(config.weights, HeuristicWeights::default());
        assert_eq!(config.log_path, Some(PathBuf::from("debug/log.txt")));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = serde_json::from_str::<BotConfig>(r#"{"name": "x", "wieghts": {}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
