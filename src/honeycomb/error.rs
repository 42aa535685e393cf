use thiserror::Error;

/// Failures recognised while setting up a honeycomb surface.
///
/// None of these are fatal to the app: the affected surface is skipped and
/// every other surface keeps drawing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Container with id {container} not found")]
    MissingSurface { container: String },

    #[error("Degenerate grid config: {0}")]
    DegenerateConfig(String),

    #[error("Invalid color {value:?}: expected #rrggbb or #rgb")]
    InvalidColor { value: String },
}
