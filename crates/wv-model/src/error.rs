use thiserror::Error;

use crate::point::{PointId, PointRole};

pub type Result<T> = std::result::Result<T, FrustumError>;

/// Fatal configuration errors raised while resolving frustum control handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrustumError {
    #[error("control handle missing: {}", role.label())]
    MissingHandle { role: PointRole },

    #[error("control handle defined twice: {} ({first} and {second})", role.label())]
    DuplicateHandle {
        role: PointRole,
        first: PointId,
        second: PointId,
    },
}
