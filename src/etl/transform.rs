//! Transformer trait for per-item transformation

use eyre::Result;

/// Transform items between extraction and loading
///
/// # Example
/// ```
/// use n8n_builder::etl::Transformer;
/// use eyre::Result;
///
/// struct Deactivate;
///
/// impl Transformer for Deactivate {
///     type Input = serde_json::Value;
///     type Output = serde_json::Value;
///
///     fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
///         input["active"] = false.into();
///         Ok(input)
///     }
/// }
///
/// let out = Deactivate.transform(serde_json::json!({"active": true})).unwrap();
/// assert_eq!(out["active"], false);
/// ```
pub trait Transformer: Send + Sync {
    type Input: Send;
    type Output: Send;

    /// Transform a single item
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform a batch, stopping at the first failure
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}

/// Passes items through unchanged
pub struct IdentityTransformer<T> {
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for IdentityTransformer<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> IdentityTransformer<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Send> Transformer for IdentityTransformer<T> {
    type Input = T;
    type Output = T;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailOnOdd;

    impl Transformer for FailOnOdd {
        type Input = i32;
        type Output = i32;

        fn transform(&self, input: i32) -> Result<i32> {
            if input % 2 == 1 {
                eyre::bail!("odd input {}", input);
            }
            Ok(input)
        }
    }

    #[test]
    fn test_identity_transformer() {
        let transformer = IdentityTransformer::<i32>::new();
        let input = vec![1, 2, 3];
        let output = transformer.transform_many(input.clone()).unwrap();
        assert_eq!(input, output);
    }

    #[test]
    fn test_transform_many_stops_at_first_failure() {
        let err = FailOnOdd.transform_many(vec![2, 3, 5]).unwrap_err();
        assert_eq!(err.to_string(), "odd input 3");
    }
}
