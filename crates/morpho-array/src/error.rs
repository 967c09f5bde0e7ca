use thiserror::Error;

/// An error type for array construction and element access.
#[derive(Error, Debug, PartialEq)]
pub enum ArrayError {
    /// The data length does not match the number of elements the shape implies.
    #[error("data length ({actual}) does not match the shape product ({expected})")]
    InvalidShape {
        /// Number of elements implied by the shape.
        expected: usize,
        /// Number of elements in the provided data.
        actual: usize,
    },

    /// An element could not be converted to the requested type.
    #[error("cast failed: source value cannot be represented in the target type")]
    CastError,
}
