use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Engine column disagrees with the wire field declaration (element type,
    /// signedness or nullability).
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                column: column.into(),
                expected: expected.into(),
                actual: actual.into(),
            }
            .into(),
        )
    }

    /// Wire field type outside the supported closed set.
    pub fn not_implemented(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotImplemented {
                message: message.into(),
            }
            .into(),
        )
    }

    /// Post-dispatch invariant broken.
    pub fn logical(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Logical {
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(
        "type un-matched for column '{column}': target wire type requires {expected}, \
         source column type is {actual}"
    )]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("not supported yet: {message}")]
    NotImplemented { message: String },

    #[error("logical error: {message}")]
    Logical { message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = Error::type_mismatch("col_a", "integer", "Nullable(Float64)");
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
        let message = err.to_string();
        assert!(message.contains("col_a"));
        assert!(message.contains("Nullable(Float64)"));
    }

    #[test]
    fn test_into_kind() {
        let err = Error::not_implemented("field tp = 255");
        match err.into_kind() {
            ErrorKind::NotImplemented { message } => assert_eq!(message, "field tp = 255"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
