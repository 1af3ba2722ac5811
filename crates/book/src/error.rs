use thiserror::Error;

/// Domain-level errors for book queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("the book holds no orders")]
    EmptyBook,

    #[error("price query over an empty selection")]
    EmptySelection,
}
