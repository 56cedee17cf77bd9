use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Host call {op} failed: {reason}")]
    Call { op: &'static str, reason: String },
}

impl HostError {
    pub fn call(op: &'static str, reason: impl Into<String>) -> Self {
        HostError::Call {
            op,
            reason: reason.into(),
        }
    }
}
