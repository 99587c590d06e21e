use std::collections::HashMap;

/// Returns the `n` most important features, highest score first.
///
/// Ties are broken by feature name so the order is stable across runs.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use cfsift_reason::top_features;
///
/// let importance = HashMap::from([
///     ("age".to_string(), 0.2),
///     ("income".to_string(), 0.7),
///     ("color".to_string(), 0.1),
/// ]);
///
/// let top = top_features(&importance, 2);
/// assert_eq!(top, vec![("income".to_string(), 0.7), ("age".to_string(), 0.2)]);
/// ```
pub fn top_features(importance: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = importance
        .iter()
        .map(|(name, score)| (name.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
