use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected a JSON array of orders, got {found}")]
    ExpectedArray { found: &'static str },
}
