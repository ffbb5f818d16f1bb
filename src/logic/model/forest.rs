//! Isolation Forest - Artifact format and path-length scoring
//!
//! The artifact is a JSON export of a fitted isolation forest, one set of
//! parallel node arrays per tree. A sample's raw score is
//! `-2^(-mean_path / c(max_samples)) - offset`; negative means outlier.

use serde::{Deserialize, Serialize};

use crate::models::FEATURE_COUNT;
use super::handle::{Classification, Classifier, Label, ModelError};

/// Format tag every artifact must carry
pub const ARTIFACT_FORMAT: &str = "isolation-forest/v1";

/// Child index marking a leaf
const LEAF: i64 = -1;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// One isolation tree stored as parallel node arrays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub n_node_samples: Vec<u64>,

    /// Tree-local feature index -> input column. Identity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<usize>>,
}

/// Fitted isolation forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    pub format: String,
    pub n_features: usize,
    pub max_samples: u64,
    pub offset: f64,
    pub trees: Vec<IsolationTree>,
}

/// Average path length of an unsuccessful BST search over `n` samples
pub fn average_path_length(n: u64) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

impl IsolationTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn column(&self, local: usize) -> usize {
        match &self.features {
            Some(map) => map[local],
            None => local,
        }
    }

    /// Edges to the reached leaf plus the expected remaining depth of its samples
    pub fn path_length(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = 0usize;
        let mut depth = 0.0;

        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return depth + average_path_length(self.n_node_samples[node]);
            }

            // Trees were fitted on float32 inputs, so compare at that precision
            let value = x[self.column(self.feature[node] as usize)] as f32 as f64;
            node = if value <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
            depth += 1.0;
        }
    }

    fn validate(&self, index: usize, n_features: usize) -> Result<(), ModelError> {
        let n = self.node_count();
        let invalid = |msg: String| ModelError::Invalid(format!("tree {}: {}", index, msg));

        if n == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.n_node_samples.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        let columns = match &self.features {
            Some(map) => {
                if let Some(bad) = map.iter().find(|&&c| c >= n_features) {
                    return Err(invalid(format!("feature column {} out of range", bad)));
                }
                map.len()
            }
            None => n_features,
        };

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(invalid(format!("node {} has a single child", node)));
                }
                continue;
            }

            // Children always come after their parent, which also rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(invalid(format!("node {} has bad child index {}", node, child)));
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature as usize >= columns {
                return Err(invalid(format!("node {} splits on unknown feature {}", node, feature)));
            }
            if !self.threshold[node].is_finite() {
                return Err(invalid(format!("node {} has non-finite threshold", node)));
            }
        }

        Ok(())
    }
}

impl IsolationForest {
    /// Parse and validate an artifact
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let forest: IsolationForest = serde_json::from_slice(bytes)?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(ModelError::UnsupportedFormat(self.format.clone()));
        }
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::Invalid(format!(
                "expected {} features, artifact has {}",
                FEATURE_COUNT, self.n_features
            )));
        }
        if self.max_samples < 2 {
            return Err(ModelError::Invalid("max_samples must be at least 2".to_string()));
        }
        if !self.offset.is_finite() {
            return Err(ModelError::Invalid("offset is not finite".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".to_string()));
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features)?;
        }

        Ok(())
    }

    /// Mean path length over all trees
    pub fn mean_path_length(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.path_length(x)).sum();
        total / self.trees.len() as f64
    }

    /// Anomaly score in (-1, 0); closer to -1 is more anomalous
    pub fn score_samples(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let normalizer = average_path_length(self.max_samples);
        -(2f64.powf(-self.mean_path_length(x) / normalizer))
    }

    /// Shifted score; negative values are outliers
    pub fn decision_function(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        self.score_samples(x) - self.offset
    }
}

impl Classifier for IsolationForest {
    fn classify(&self, features: &[f64; FEATURE_COUNT]) -> Classification {
        let raw_score = self.decision_function(features);
        let label = if raw_score < 0.0 { Label::Outlier } else { Label::Inlier };

        Classification { label, raw_score }
    }
}
