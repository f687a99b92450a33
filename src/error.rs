use thiserror::Error;

/// Top-level error type for the circulinear kernel.
#[derive(Debug, Error)]
pub enum CirculinearError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric primitives and their construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    /// A bounded representation was requested from an unbounded shape.
    #[error("{shape} is unbounded")]
    Unbounded { shape: &'static str },
}

/// Errors related to offset, buffer and intersection operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CirculinearError`].
pub type Result<T> = std::result::Result<T, CirculinearError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_message_names_shape() {
        let err: CirculinearError = GeometryError::Unbounded {
            shape: "straight line",
        }
        .into();
        assert_eq!(err.to_string(), "straight line is unbounded");
    }

    #[test]
    fn operation_error_is_transparent() {
        let err: CirculinearError = OperationError::Failed("gap".to_owned()).into();
        assert_eq!(err.to_string(), "operation failed: gap");
    }
}
