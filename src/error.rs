use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),

    #[error("Interpolation error: {0}")]
    Interpolation(String),

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Invalid locator: {0}")]
    Locator(String),

    #[error("Invalid grid reference: {0}")]
    GridReference(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),
}
