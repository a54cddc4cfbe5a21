use thiserror::Error;

pub type TxyResult<T> = Result<T, TxyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxyError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
