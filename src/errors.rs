use std::{error, fmt};

use backtrace::Backtrace;

/// Describes an error which occurred during triangulation
#[derive(Debug)]
#[non_exhaustive]
pub enum TriangulationError {
    /// Fewer points were provided than are needed to form a triangle
    NotEnoughPoints(usize),
    /// The input cannot be triangulated (non-finite coordinates, all points collinear,
    /// an out of range boundary index, ...)
    InvalidInput(String),
    /// The point at index `point` coincides exactly with the already inserted vertex `existing`
    DuplicatePoint { point: usize, existing: usize },
    /// A triangulation precondition was violated, or a triangulation bug was encountered.
    InternalError(InternalError),
}

impl TriangulationError {
    #[cold]
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        TriangulationError::InvalidInput(msg.into())
    }

    #[cold]
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        TriangulationError::InternalError(InternalError::new(msg))
    }
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughPoints(points) => write!(f, "Point set only contains {} points", points),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::DuplicatePoint { point, existing } => write!(f, "Point v{} coincides with vertex v{}", point, existing),
            Self::InternalError(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl error::Error for TriangulationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InternalError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<InternalError> for TriangulationError {
    fn from(error: InternalError) -> Self {
        TriangulationError::InternalError(error)
    }
}

#[derive(Debug)]
pub struct InternalError {
    pub msg: String,
    pub backtrace: Backtrace,
}

impl InternalError {
    #[cold]
    #[inline(always)]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{:?}", self.msg, self.backtrace)
    }
}

impl error::Error for InternalError { }
