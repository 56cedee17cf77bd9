use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown union id {0} in event header")]
    UnknownUnionId(u8),
}
