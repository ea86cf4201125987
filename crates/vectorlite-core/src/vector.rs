//! Vector primitives: magnitude, similarity, distance, and the unified
//! "smaller is closer" score both index implementations share.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An immutable, fixed-length sequence of double-precision reals.
///
/// Two vectors combined in a scoring operation must share a dimension; the
/// core does not validate this — dimension validation is a caller
/// responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector(Vec<f64>);

impl Vector {
    /// Creates a vector from the given components.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self(values.into())
    }

    /// Returns the component values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Euclidean magnitude, `sqrt(Σ vᵢ²)`.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with another vector.
    #[must_use]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Cosine similarity in `[-1, 1]`. Non-finite when either vector has
    /// zero magnitude; callers on the HNSW path must avoid or tolerate that.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Vector) -> f64 {
        self.dot(other) / (self.magnitude() * other.magnitude())
    }

    /// Euclidean (L2) distance to another vector.
    #[must_use]
    pub fn euclidean_distance(&self, other: &Vector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// itself rather than producing non-finite components.
    #[must_use]
    pub fn normalize(&self) -> Vector {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Vector(vec![0.0; self.0.len()]);
        }
        Vector(self.0.iter().map(|v| v / magnitude).collect())
    }

    /// The unified "smaller is closer" score used by both index
    /// implementations.
    #[must_use]
    pub fn distance_score(&self, other: &Vector, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => 1.0 - (1.0 + self.cosine_similarity(other)) / 2.0,
            Metric::DotProduct => {
                1.0 - (1.0 + self.normalize().cosine_similarity(&other.normalize())) / 2.0
            }
            Metric::Euclidean => self.euclidean_distance(other),
        }
    }
}

/// A recognized distance/similarity metric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cosine,
    DotProduct,
    Euclidean,
}

impl Metric {
    /// The canonical lowercase string used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::DotProduct => "dot_product",
            Self::Euclidean => "euclidean",
        }
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosine" => Ok(Self::Cosine),
            "dot_product" => Ok(Self::DotProduct),
            "euclidean" => Ok(Self::Euclidean),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// An unrecognized metric string. Not a hard error in the core:
/// `distance_score` for an unknown metric returns `+∞` and the query still
/// answers, deliberately permissively. Callers that want strictness parse
/// the metric themselves before calling in and can surface this as a 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

/// `distance_score` for a metric string straight off the wire, folding an
/// unrecognized metric into `+∞` rather than an error.
#[must_use]
pub fn distance_score_by_name(a: &Vector, b: &Vector, metric: &str) -> f64 {
    match metric.parse::<Metric>() {
        Ok(metric) => a.distance_score(b, metric),
        Err(_) => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> Vector {
        Vector::new(values.to_vec())
    }

    #[test]
    fn magnitude_of_unit_vector() {
        assert!((v(&[1.0, 0.0]).magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn magnitude_of_3_4_5_triangle() {
        assert!((v(&[3.0, 4.0]).magnitude() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn dot_product_orthogonal_is_zero() {
        assert!((v(&[1.0, 0.0]).dot(&v(&[0.0, 1.0]))).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_identical_is_one() {
        let a = v(&[1.0, 2.0, 3.0]);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_orthogonal_is_zero() {
        assert!((v(&[1.0, 0.0]).cosine_similarity(&v(&[0.0, 1.0]))).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_zero_vector_is_non_finite() {
        let sim = v(&[0.0, 0.0]).cosine_similarity(&v(&[1.0, 0.0]));
        assert!(!sim.is_finite());
    }

    #[test]
    fn euclidean_distance_to_self_is_zero() {
        let a = v(&[1.0, 2.0, 3.0]);
        assert_eq!(a.euclidean_distance(&a), 0.0);
    }

    #[test]
    fn normalize_unit_magnitude() {
        let n = v(&[3.0, 4.0]).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let n = v(&[0.0, 0.0]).normalize();
        assert_eq!(n.values(), &[0.0, 0.0]);
    }

    #[test]
    fn distance_score_cosine_identical_is_zero() {
        let a = v(&[1.0, 0.0]);
        assert!(a.distance_score(&a, Metric::Cosine).abs() < 1e-9);
    }

    #[test]
    fn distance_score_cosine_opposite_is_one() {
        let a = v(&[1.0, 0.0]);
        let b = v(&[-1.0, 0.0]);
        assert!((a.distance_score(&b, Metric::Cosine) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn distance_score_euclidean_is_raw_distance() {
        let a = v(&[0.0, 0.0]);
        let b = v(&[3.0, 4.0]);
        assert!((a.distance_score(&b, Metric::Euclidean) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn distance_score_dot_product_equals_cosine_for_nonzero_vectors() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, -1.0]);
        let cosine = a.distance_score(&b, Metric::Cosine);
        let dot = a.distance_score(&b, Metric::DotProduct);
        assert!((cosine - dot).abs() < 1e-9);
    }

    #[test]
    fn unknown_metric_scores_as_infinite() {
        let a = v(&[1.0, 0.0]);
        assert_eq!(distance_score_by_name(&a, &a, "manhattan"), f64::INFINITY);
    }

    #[test]
    fn metric_from_str_round_trips() {
        for metric in [Metric::Cosine, Metric::DotProduct, Metric::Euclidean] {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
    }
}
