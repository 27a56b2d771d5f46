use thiserror::Error;

#[derive(Debug, Error)]
pub enum WingError {
    /// The airfoil outline is malformed or degenerate
    #[error("invalid profile: {0}")]
    Profile(String),

    /// The requested section normal is not orthogonal to the chord
    #[error("normal vector is not normal to the chord (|n.c| = {dot:.3e})")]
    Orientation { dot: f64 },

    /// Degenerate vector algebra, such as a zero-length chord
    #[error("degenerate geometry: {0}")]
    Geometry(String),

    /// A slice of the guide surface did not produce a two point chordline
    #[error("invalid section geometry: {0}")]
    SectionGeometry(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
