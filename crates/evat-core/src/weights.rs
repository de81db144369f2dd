//! Readiness Index weight configuration.
//!
//! The index is a policy choice, not an algorithmic necessity, so the
//! weights are runtime configuration rather than constants baked into the
//! scorer. Two documented presets match the published dashboards: 0.6/0.4
//! when only penetration and momentum participate, and 0.4/0.3/0.3 when
//! state policy incentives are available as a third factor.

use serde::{Deserialize, Serialize};

use crate::error::{EvatError, EvatResult};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights applied to the normalized scoring terms. Always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub penetration: f64,
    pub momentum: f64,
    pub policy: f64,
}

impl ScoreWeights {
    /// Two-factor weights (penetration + momentum).
    pub fn new(penetration: f64, momentum: f64) -> EvatResult<Self> {
        Self::validate(penetration, momentum, 0.0)
    }

    /// Three-factor weights including policy incentive support.
    pub fn with_policy(penetration: f64, momentum: f64, policy: f64) -> EvatResult<Self> {
        Self::validate(penetration, momentum, policy)
    }

    fn validate(penetration: f64, momentum: f64, policy: f64) -> EvatResult<Self> {
        if penetration < 0.0 || momentum < 0.0 || policy < 0.0 {
            return Err(EvatError::Config(format!(
                "score weights must be non-negative, got {penetration}/{momentum}/{policy}"
            )));
        }
        let sum = penetration + momentum + policy;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EvatError::Config(format!(
                "score weights must sum to 1, got {sum}"
            )));
        }
        Ok(Self {
            penetration,
            momentum,
            policy,
        })
    }

    /// Default three-factor preset used when policy data is present.
    pub fn default_with_policy() -> Self {
        Self {
            penetration: 0.4,
            momentum: 0.3,
            policy: 0.3,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            penetration: 0.6,
            momentum: 0.4,
            policy: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!((weights.penetration + weights.momentum + weights.policy - 1.0).abs() < 1e-12);
        assert_eq!(weights.penetration, 0.6);
        assert_eq!(weights.momentum, 0.4);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        assert!(ScoreWeights::new(0.7, 0.4).is_err());
        assert!(ScoreWeights::with_policy(0.5, 0.3, 0.3).is_err());
    }

    #[test]
    fn rejects_negative_weights() {
        assert!(ScoreWeights::new(1.4, -0.4).is_err());
    }

    #[test]
    fn accepts_custom_split() {
        let weights = ScoreWeights::new(0.5, 0.5).unwrap();
        assert_eq!(weights.policy, 0.0);
    }
}
