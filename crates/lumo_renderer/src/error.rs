use thiserror::Error;

/// Errors that abort a render.
///
/// Everything except `WorkerPanicked` and `Incomplete` is detected before
/// the first pixel is traced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing render resource: {0}")]
    MissingResource(&'static str),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render worker panicked: {0}")]
    WorkerPanicked(String),

    #[error("Render incomplete: {rendered} of {total} pixels")]
    Incomplete { rendered: u64, total: u64 },
}

pub type RenderResult<T> = Result<T, RenderError>;
