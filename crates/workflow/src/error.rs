use helpdesk_core::error::CoreError;
use helpdesk_store::StoreError;

/// Failure of a workflow operation.
///
/// `Core` covers rejections made before or after talking to the store
/// (validation, disallowed transitions, version conflicts); `Store`
/// carries the remote failure as-is.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
