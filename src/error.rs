use std::{
    error::Error,
    fmt::{self, Display},
};

/// Тип результата для всех операций сети.
pub type Result<T> = std::result::Result<T, NetError>;

/// Ошибки сети.
///
/// Все проверки выполняются до изменения состояния: после ошибки сеть
/// остается в том же виде, что и до вызова.
#[derive(Debug, Clone, PartialEq)]
pub enum NetError {
    /// Длина вектора не совпадает с шириной слоя (входы, цели, список весов).
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Во входных данных вызывающей стороны есть NaN или бесконечность.
    NonFinite {
        what: &'static str,
        index: usize,
    },
    /// Топология непригодна для построения сети.
    InvalidTopology(String),
    /// Недопустимые гиперпараметры.
    InvalidConfig(String),
}

impl Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::SizeMismatch { what, got, expected } => {
                write!(f, "size mismatch for {what}: got {got}, expected {expected}")
            }
            NetError::NonFinite { what, index } => {
                write!(f, "non-finite value in {what} at index {index}")
            }
            NetError::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            NetError::InvalidConfig(msg) => write!(f, "invalid hyperparameters: {msg}"),
        }
    }
}

impl Error for NetError {}

/// Проверка длины вектора вызывающей стороны
pub(crate) fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(NetError::SizeMismatch {
            what,
            got: values.len(),
            expected,
        });
    }
    Ok(())
}

/// Проверка, что все значения конечны
pub(crate) fn check_finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(NetError::NonFinite { what, index }),
        None => Ok(()),
    }
}
