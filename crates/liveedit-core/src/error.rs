use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid project: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
