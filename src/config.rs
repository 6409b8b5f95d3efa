//! Settings shared by every check in a run.
//!
//! `CheckerConfig` derives `Deserialize`, so callers can embed it in their
//! own configuration files:
//!
//! ```
//! use inheritance_models::config::CheckerConfig;
//! use inheritance_models::models::Model;
//!
//! let config: CheckerConfig = serde_json::from_str(r#"{"strict": true, "models": ["XD"]}"#).unwrap();
//! assert!(config.strict);
//! assert_eq!(config.models, vec![Model::XLinkedDominant]);
//! ```

use crate::models::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Treat a missing call for any family member as a violation.
    pub strict: bool,
    /// Models tried by [`Checker::passing_models`](crate::checker::Checker::passing_models).
    pub models: Vec<Model>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            strict: false,
            models: Model::ALL.to_vec(),
        }
    }
}
