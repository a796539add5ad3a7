//! Fitted probabilistic classifiers
//!
//! Two artifact kinds are understood:
//!
//! 1. **Logistic regression**: `p = sigmoid(w·x + b)`
//! 2. **Tree ensemble**: a forest of binary decision trees whose positive
//!    probability is the mean of the normalized leaf class weights
//!    (random-forest style soft voting)

use super::{check_dimension, check_finite, ProbabilisticClassifier};
use crate::error::ScreeningError;
use serde::{Deserialize, Serialize};

/// Numerically stable logistic function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary logistic regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per scaled input column
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
    /// Column names at fit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LogisticRegression {
    /// Build and validate a logistic regression
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ScreeningError> {
        let model = Self {
            coefficients,
            intercept,
            feature_names: None,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check that parameters are present and finite
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.coefficients.is_empty() {
            return Err(ScreeningError::StartupFailure(
                "logistic regression has no coefficients".to_string(),
            ));
        }
        check_finite("classifier coefficients", &self.coefficients)?;
        check_finite("classifier intercept", &[self.intercept])?;
        Ok(())
    }

    /// Linear score `w·x + b`
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ScreeningError> {
        check_dimension(self.coefficients.len(), features)?;
        Ok(self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept)
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ScreeningError> {
        let positive = sigmoid(self.decision_function(features)?);
        Ok([1.0 - positive, positive])
    }
}

/// Node of a binary decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node: go `left` when `x[feature] <= threshold`, else `right`
    Split {
        /// Input column tested
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node with class weights `[negative, positive]`
    Leaf {
        /// Class weights (counts or fractions)
        value: [f64; 2],
    },
}

/// A single decision tree stored as a flat node list, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Nodes; children always have a larger index than their parent
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, tree_index: usize) -> Result<(), ScreeningError> {
        let fail = |msg: String| {
            Err(ScreeningError::StartupFailure(format!(
                "tree {}: {}",
                tree_index, msg
            )))
        };

        if self.nodes.is_empty() {
            return fail("no nodes".to_string());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return fail(format!(
                            "node {} tests column {} of {}",
                            i, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return fail(format!("node {} has a non-finite threshold", i));
                    }
                    // Forward-only child links guarantee traversal terminates.
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return fail(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0)
                        || !total.is_finite()
                        || total <= 0.0
                    {
                        return fail(format!("leaf {} has invalid class weights {:?}", i, value));
                    }
                }
            }
        }
        Ok(())
    }

    /// Positive-class probability of the leaf reached by `features`
    ///
    /// Trees built without [`TreeEnsemble::validate`] are walked defensively:
    /// a dangling reference, a cycle, or unusable leaf weights is an error.
    fn leaf_probability(&self, features: &[f64]) -> Result<f64, ScreeningError> {
        let broken = |msg: String| ScreeningError::NumericalError(format!("decision tree {}", msg));

        let mut index = 0;
        // A path never visits more nodes than the tree holds.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(&TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(feature).ok_or_else(|| {
                        broken(format!(
                            "node {} tests column {} of a {}-column row",
                            index,
                            feature,
                            features.len()
                        ))
                    })?;
                    index = if *x <= threshold { left } else { right };
                }
                Some(&TreeNode::Leaf { value }) => {
                    let total = value[0] + value[1];
                    if !total.is_finite() || total <= 0.0 {
                        return Err(broken(format!(
                            "leaf {} has unusable class weights {:?}",
                            index, value
                        )));
                    }
                    return Ok(value[1] / total);
                }
                None => return Err(broken(format!("references missing node {}", index))),
            }
        }
        Err(broken("path does not reach a leaf".to_string()))
    }
}

/// Forest of decision trees with soft voting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Input dimension the forest was fitted on
    pub n_features: usize,
    /// Member trees
    pub trees: Vec<DecisionTree>,
    /// Column names at fit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl TreeEnsemble {
    /// Build and validate a tree ensemble
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ScreeningError> {
        let ensemble = Self {
            n_features,
            trees,
            feature_names: None,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Check every tree's structure
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.n_features == 0 || self.trees.is_empty() {
            return Err(ScreeningError::StartupFailure(format!(
                "tree ensemble with {} features and {} trees",
                self.n_features,
                self.trees.len()
            )));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, i)?;
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ScreeningError> {
        check_dimension(self.n_features, features)?;
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.leaf_probability(features)?;
        }
        let positive = total / self.trees.len() as f64;
        Ok([1.0 - positive, positive])
    }
}

/// On-disk classifier document, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// Logistic regression
    LogisticRegression(LogisticRegression),
    /// Decision-tree forest
    TreeEnsemble(TreeEnsemble),
}

impl ClassifierArtifact {
    /// Parse a classifier document
    pub fn from_json(json: &str) -> Result<Self, ScreeningError> {
        serde_json::from_str(json).map_err(|e| {
            ScreeningError::StartupFailure(format!("unreadable classifier artifact: {}", e))
        })
    }

    /// Validate and turn into a capability object
    pub fn into_classifier(self) -> Result<Box<dyn ProbabilisticClassifier>, ScreeningError> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
            ClassifierArtifact::TreeEnsemble(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: [f64; 2], high: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0 && sigmoid(800.0) > 0.999);
        assert!(sigmoid(-800.0) >= 0.0 && sigmoid(-800.0) < 0.001);
        assert!(sigmoid(-800.0).is_finite());
    }

    #[test]
    fn test_logistic_probabilities() {
        let model = LogisticRegression::new(vec![1.0, -2.0], 0.5).unwrap();
        assert_eq!(model.decision_function(&[1.5, 1.0]).unwrap(), 0.0);

        let [neg, pos] = model.predict_proba(&[1.5, 1.0]).unwrap();
        assert_eq!(pos, 0.5);
        assert_eq!(neg + pos, 1.0);

        let [_, high] = model.predict_proba(&[10.0, 0.0]).unwrap();
        assert!(high > 0.99);
    }

    #[test]
    fn test_logistic_dimension_check() {
        let model = LogisticRegression::new(vec![1.0; 4], 0.0).unwrap();
        assert_eq!(
            model.predict_proba(&[0.0; 3]),
            Err(ScreeningError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_tree_ensemble_soft_vote() {
        let forest = TreeEnsemble::new(
            2,
            vec![
                stump(0, 0.5, [9.0, 1.0], [1.0, 3.0]),
                stump(1, 0.0, [1.0, 1.0], [0.0, 4.0]),
            ],
        )
        .unwrap();

        // tree 0 -> right leaf (0.75), tree 1 -> left leaf (0.5)
        let [_, pos] = forest.predict_proba(&[1.0, -1.0]).unwrap();
        assert!((pos - 0.625).abs() < 1e-12, "got {}", pos);

        // threshold is inclusive on the left branch
        let [_, pos] = forest.predict_proba(&[0.5, 0.0]).unwrap();
        assert!((pos - 0.3).abs() < 1e-12, "got {}", pos);
    }

    #[test]
    fn test_tree_validation() {
        let cyclic = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: [1.0, 1.0] },
            ],
        };
        assert!(TreeEnsemble::new(1, vec![cyclic]).is_err());

        let out_of_range = stump(3, 0.0, [1.0, 0.0], [0.0, 1.0]);
        assert!(TreeEnsemble::new(2, vec![out_of_range]).is_err());

        let empty_leaf = stump(0, 0.0, [0.0, 0.0], [0.0, 1.0]);
        assert!(TreeEnsemble::new(1, vec![empty_leaf]).is_err());

        assert!(TreeEnsemble::new(1, vec![]).is_err());
    }

    #[test]
    fn test_leaf_weights_must_not_overflow() {
        let huge = stump(0, 0.0, [1e308, 1e308], [0.0, 1.0]);
        assert!(TreeEnsemble::new(1, vec![huge]).is_err());
    }

    #[test]
    fn test_unvalidated_tree_out_of_range_column() {
        let forest = TreeEnsemble {
            n_features: 14,
            trees: vec![stump(40, 0.0, [1.0, 0.0], [0.0, 1.0])],
            feature_names: None,
        };
        match forest.predict_proba(&[0.0; 14]) {
            Err(ScreeningError::NumericalError(msg)) => assert!(msg.contains("column 40"), "{}", msg),
            other => panic!("expected NumericalError, got {:?}", other),
        }
    }

    #[test]
    fn test_unvalidated_tree_cycle_terminates() {
        let cyclic = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                },
                TreeNode::Leaf { value: [1.0, 1.0] },
            ],
        };
        let forest = TreeEnsemble {
            n_features: 1,
            trees: vec![cyclic],
            feature_names: None,
        };
        assert!(matches!(
            forest.predict_proba(&[0.0]),
            Err(ScreeningError::NumericalError(_))
        ));
    }

    #[test]
    fn test_unvalidated_tree_dangling_child_and_bad_leaf() {
        let dangling = TreeEnsemble {
            n_features: 1,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 7,
                    right: 8,
                }],
            }],
            feature_names: None,
        };
        assert!(dangling.predict_proba(&[0.0]).is_err());

        let overflow = TreeEnsemble {
            n_features: 1,
            trees: vec![stump(0, 0.0, [1e308, 1e308], [0.0, 1.0])],
            feature_names: None,
        };
        assert!(overflow.predict_proba(&[0.0]).is_err());
    }

    #[test]
    fn test_artifact_parsing() {
        let json = r#"{
            "kind": "tree_ensemble",
            "n_features": 1,
            "trees": [{"nodes": [
                {"split": {"feature": 0, "threshold": 2.0, "left": 1, "right": 2}},
                {"leaf": {"value": [3.0, 1.0]}},
                {"leaf": {"value": [1.0, 3.0]}}
            ]}]
        }"#;
        let model = ClassifierArtifact::from_json(json)
            .unwrap()
            .into_classifier()
            .unwrap();
        assert_eq!(model.n_features(), 1);
        assert_eq!(model.predict_proba(&[5.0]).unwrap(), [0.25, 0.75]);

        assert!(ClassifierArtifact::from_json("not json").is_err());
    }
}
