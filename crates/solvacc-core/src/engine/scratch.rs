use super::error::SasaError;

/// An empty vector with room for exactly `capacity` elements.
pub(crate) fn with_capacity<T>(
    capacity: usize,
    operation: &'static str,
) -> Result<Vec<T>, SasaError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|source| SasaError::Allocation { operation, source })?;
    Ok(buffer)
}

/// A vector of `len` copies of `value`.
pub(crate) fn filled<T: Clone>(
    len: usize,
    value: T,
    operation: &'static str,
) -> Result<Vec<T>, SasaError> {
    let mut buffer = with_capacity(len, operation)?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Grows `buffer` so that `additional` more elements fit without reallocating.
pub(crate) fn reserve<T>(
    buffer: &mut Vec<T>,
    additional: usize,
    operation: &'static str,
) -> Result<(), SasaError> {
    buffer
        .try_reserve(additional)
        .map_err(|source| SasaError::Allocation { operation, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_allocates_requested_length() {
        let buffer = filled(5, 0.0_f64, "test").unwrap();
        assert_eq!(buffer, vec![0.0; 5]);
    }

    #[test]
    fn impossible_request_is_an_allocation_error() {
        let result = with_capacity::<u64>(usize::MAX, "huge buffer");
        assert!(matches!(
            result,
            Err(SasaError::Allocation {
                operation: "huge buffer",
                ..
            })
        ));
    }
}
