/// Convenience result type used across episcene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by the scene builder.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Input tables that cannot form a consistent dataset (ragged rows, length mismatch
    /// between categories).
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    /// A date index outside `[0, num_dates)`.
    #[error("date index {index} is out of range (dataset has {num_dates} dates)")]
    DateOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of dates held by the dataset.
        num_dates: usize,
    },

    /// A flow row referenced a country with no known centroid.
    ///
    /// Builders recover from this by dropping the row; it never escapes a public
    /// build operation.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Invalid configuration or caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::MalformedDataset`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDataset(msg.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::UnknownLocation`] value.
    pub fn unknown_location(name: impl Into<String>) -> Self {
        Self::UnknownLocation(name.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
