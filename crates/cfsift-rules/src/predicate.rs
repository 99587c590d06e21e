//! Predicates over continuous deltas.

use std::fmt;
use std::sync::Arc;

/// Shared predicate closure over `new - old`.
pub type DeltaFn = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// A labelled predicate that marks a continuous delta as forbidden.
///
/// The predicate returns `true` when the delta is tabu.
///
/// # Example
///
/// ```
/// use cfsift_rules::DeltaPredicate;
///
/// let too_old = DeltaPredicate::greater_than(5.0);
/// assert!(too_old.matches(6.0));
/// assert!(!too_old.matches(5.0));
/// assert_eq!(too_old.label(), "delta > 5");
/// ```
#[derive(Clone)]
pub struct DeltaPredicate {
    label: String,
    test: DeltaFn,
}

impl DeltaPredicate {
    /// Wraps an arbitrary closure.
    pub fn custom<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    /// Forbids deltas strictly above `threshold`.
    pub fn greater_than(threshold: f64) -> Self {
        Self::custom(format!("delta > {threshold}"), move |d| d > threshold)
    }

    /// Forbids deltas at or above `threshold`.
    pub fn at_least(threshold: f64) -> Self {
        Self::custom(format!("delta >= {threshold}"), move |d| d >= threshold)
    }

    /// Forbids deltas strictly below `threshold`.
    pub fn less_than(threshold: f64) -> Self {
        Self::custom(format!("delta < {threshold}"), move |d| d < threshold)
    }

    /// Forbids deltas at or below `threshold`.
    pub fn at_most(threshold: f64) -> Self {
        Self::custom(format!("delta <= {threshold}"), move |d| d <= threshold)
    }

    /// Forbids deltas outside the closed interval `[min, max]`.
    pub fn outside(min: f64, max: f64) -> Self {
        Self::custom(format!("delta outside [{min}, {max}]"), move |d| {
            d < min || d > max
        })
    }

    /// Forbids any movement at all.
    pub fn any_change() -> Self {
        Self::custom("delta != 0", |d| d != 0.0)
    }

    /// Returns true if `delta` is forbidden.
    #[inline]
    pub fn matches(&self, delta: f64) -> bool {
        (self.test)(delta)
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for DeltaPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeltaPredicate").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater_than_boundary_is_exclusive() {
        let p = DeltaPredicate::greater_than(5.0);
        assert!(!p.matches(4.0));
        assert!(!p.matches(5.0));
        assert!(p.matches(6.0));
    }

    #[test]
    fn test_inclusive_bounds() {
        assert!(DeltaPredicate::at_least(5.0).matches(5.0));
        assert!(DeltaPredicate::at_most(0.0).matches(0.0));
        assert!(!DeltaPredicate::less_than(0.0).matches(0.0));
    }

    #[test]
    fn test_outside() {
        let p = DeltaPredicate::outside(-1.0, 1.0);
        assert!(!p.matches(-1.0));
        assert!(!p.matches(0.5));
        assert!(p.matches(1.5));
        assert!(p.matches(-2.0));
    }

    #[test]
    fn test_custom_and_debug() {
        let even = DeltaPredicate::custom("even delta", |d| d % 2.0 == 0.0);
        assert!(even.matches(4.0));
        assert!(!even.matches(3.0));
        assert_eq!(format!("{even:?}"), "DeltaPredicate(\"even delta\")");
        assert!(DeltaPredicate::any_change().matches(-0.1));
    }
}
