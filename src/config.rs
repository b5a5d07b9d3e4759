use crate::math::TOLERANCE;

/// What to do when two non-adjacent segments meet without crossing
/// transversally (collinear overlap, or a vertex lying on another segment).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Record the pair as a degeneracy, log it, and treat it as no crossing.
    #[default]
    Skip,
    /// Refuse any diagram or edit whose result contains a degeneracy.
    Reject,
}

/// Parameters controlling crossing detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Tolerance for the "strictly inside (0, 1)" parameter test and the
    /// (length-scaled) parallel test.
    pub epsilon: f64,
    /// Handling of non-transversal contacts between segments.
    pub degeneracy: DegeneracyPolicy,
}

impl DiagramConfig {
    /// Returns this config with a different tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns this config with a different degeneracy policy.
    #[must_use]
    pub fn with_degeneracy(mut self, degeneracy: DegeneracyPolicy) -> Self {
        self.degeneracy = degeneracy;
        self
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            epsilon: TOLERANCE,
            degeneracy: DegeneracyPolicy::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiagramConfig::default();
        assert!((config.epsilon - TOLERANCE).abs() < f64::EPSILON);
        assert_eq!(config.degeneracy, DegeneracyPolicy::Skip);
    }

    #[test]
    fn builder_overrides() {
        let config = DiagramConfig::default()
            .with_epsilon(1e-6)
            .with_degeneracy(DegeneracyPolicy::Reject);
        assert!((config.epsilon - 1e-6).abs() < f64::EPSILON);
        assert_eq!(config.degeneracy, DegeneracyPolicy::Reject);
    }
}
