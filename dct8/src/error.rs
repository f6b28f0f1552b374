use thiserror::Error;

pub type Result<T> = std::result::Result<T, Dct8Error>;

#[derive(Debug, Error)]
pub enum Dct8Error {
    /// Input does not have the fixed 8 or 8x8 dimensionality.
    #[error("shape mismatch: expected {expected} {what}, got {got}")]
    Shape {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Dct8Error {
    pub(crate) fn shape(what: &'static str, expected: usize, got: usize) -> Self {
        Dct8Error::Shape {
            what,
            expected,
            got,
        }
    }

    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Dct8Error::InvalidParameter(msg.into())
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Dct8Error::Shape { .. })
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Dct8Error::InvalidParameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_message_names_dimension() {
        let err = Dct8Error::shape("samples", 8, 7);
        assert_eq!(err.to_string(), "shape mismatch: expected 8 samples, got 7");
        assert!(err.is_shape());
        assert!(!err.is_invalid_parameter());
    }

    #[test]
    fn invalid_parameter_message() {
        let err = Dct8Error::invalid("bits must be >= 1, got 0");
        assert_eq!(err.to_string(), "invalid parameter: bits must be >= 1, got 0");
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: Dct8Error = io.into();
        assert!(matches!(err, Dct8Error::Io(_)));
    }
}
