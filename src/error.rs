use thiserror::Error;

/// Top-level error type for the routis routing engine.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("width profile queried at arclength {arclength}, outside domain [0, {total_length}]")]
    ProfileDomainViolation { arclength: f64, total_length: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to routing operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to multi-profile composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(
        "ground buffer outer at tuple {index} (layer {layer}) has no prior \
         inner buffer in this composer call"
    )]
    MissingInnerBuffer { index: usize, layer: u32 },

    #[error("unknown route role \"{0}\"")]
    UnknownRouteRole(String),
}

/// Convenience type alias for results using [`RouteError`].
pub type Result<T> = std::result::Result<T, RouteError>;
