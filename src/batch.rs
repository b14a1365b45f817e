//! Parallel validation of many values against one schema.

use rayon::prelude::*;
use serde_json::Value;

use crate::schema::SchemaLike;
use crate::validation::ValidationOptions;
use crate::ValidationResult;

/// Validates every value in `values` against `schema` in parallel.
///
/// Results come back in input order. Validation is pure, so the outcome is
/// the same as validating each value on its own.
///
/// # Example
///
/// ```rust
/// use yop::{validate_batch, ValidationOptions, Yop};
/// use serde_json::json;
///
/// let schema = Yop::number().min(0.0);
/// let values = vec![json!(1), json!(-1), json!(2)];
///
/// let results = validate_batch(&schema, &values, &ValidationOptions::default());
/// let ok: Vec<bool> = results.iter().map(|r| r.is_success()).collect();
/// assert_eq!(ok, vec![true, false, true]);
/// ```
pub fn validate_batch<S>(
    schema: &S,
    values: &[Value],
    options: &ValidationOptions<'_>,
) -> Vec<ValidationResult<()>>
where
    S: SchemaLike + ?Sized,
{
    let results: Vec<_> = values
        .par_iter()
        .map(|value| schema.validate_with(Some(value), options))
        .collect();

    tracing::debug!(
        values = values.len(),
        failures = results.iter().filter(|r| r.is_failure()).count(),
        "validated batch"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Yop;
    use serde_json::json;

    #[test]
    fn test_batch_matches_sequential() {
        let schema = Yop::object().field("n", Yop::number().required().max(10.0));
        let values: Vec<Value> = (0..64).map(|n| json!({"n": n})).collect();
        let options = ValidationOptions::default();

        let summarize = |result: ValidationResult<()>| result.into_result().err().map(|e| e.len());
        let batch: Vec<_> = validate_batch(&schema, &values, &options)
            .into_iter()
            .map(summarize)
            .collect();
        let sequential: Vec<_> = values
            .iter()
            .map(|v| summarize(schema.validate_with(Some(v), &options)))
            .collect();
        assert_eq!(batch, sequential);
        assert_eq!(batch.iter().filter(|r| r.is_some()).count(), 53);
    }

    #[test]
    fn test_empty_batch() {
        let schema = Yop::string();
        assert!(validate_batch(&schema, &[], &ValidationOptions::default()).is_empty());
    }
}
