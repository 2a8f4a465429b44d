use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParleyError {
    #[error("Unknown room type: {0:?}")]
    UnknownRoomType(String),
}

pub type Result<T> = std::result::Result<T, ParleyError>;
