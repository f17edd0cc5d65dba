//! Error types for workbench operations
//!
//! Every failing operation on the workbench reports one of these variants
//! synchronously to its caller. A module vetoing its own closure is not an
//! error; `close_module` reports it as `Ok(false)`.

use crate::overlay::OverlayId;

/// Result type for workbench operations
pub type WorkbenchResult<T> = std::result::Result<T, WorkbenchError>;

/// Workbench-specific error types
#[derive(Debug, thiserror::Error)]
pub enum WorkbenchError {
    #[error("Module '{0}' is not known to the workbench")]
    UnknownModule(String),

    #[error("Module '{0}' is already registered")]
    DuplicateModule(String),

    #[error("Module '{0}' is open and must be closed first")]
    ModuleOpen(String),

    #[error("Overlay '{0}' is not registered")]
    NotRegistered(OverlayId),

    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No dialog is currently being shown")]
    NoDialog,

    #[error("Dialog has no button '{0}'")]
    UnknownButton(String),

    #[error("Invalid workbench configuration: {0}")]
    InvalidConfig(String),
}
