//! Errors raised while gating a GeneClust run.

/// Coarse classification of a [`MixerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// wrong type, or a required value left unset
    Type,
    /// right type, but an invalid value, range or combination
    Value,
    /// the output of a run contradicts its input
    Runtime,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MixerError {
    #[error("Expected `{name}` to be {expected}, got {got}.")]
    WrongType {
        name: &'static str,
        expected: &'static str,
        got: Box<str>,
    },

    #[error("Expected `{name}` {expected}, got {got}.")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        got: Box<str>,
    },

    #[error("Worker limit exceeded. Maximum {max}, got {got}.")]
    WorkerLimitExceeded { max: usize, got: i64 },

    #[error(
        "GeneClust-fast does not support spatial transcriptomics. Please set `version` to `ps`."
    )]
    FastSpatialUnsupported,

    #[error("Unknown parameter `{0}`.")]
    UnknownParameter(Box<str>),

    #[error("Found only {found} selected genes in `var_names`, not {expected}.")]
    SelectionMismatch { found: usize, expected: usize },
}

impl MixerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MixerError::WrongType { .. } => ErrorKind::Type,
            MixerError::InvalidValue { .. }
            | MixerError::WorkerLimitExceeded { .. }
            | MixerError::FastSpatialUnsupported
            | MixerError::UnknownParameter(_) => ErrorKind::Value,
            MixerError::SelectionMismatch { .. } => ErrorKind::Runtime,
        }
    }

    pub(crate) fn wrong_type(
        name: &'static str,
        expected: &'static str,
        got: impl std::fmt::Display,
    ) -> Self {
        MixerError::WrongType {
            name,
            expected,
            got: got.to_string().into_boxed_str(),
        }
    }

    pub(crate) fn invalid_value(
        name: &'static str,
        expected: &'static str,
        got: impl std::fmt::Display,
    ) -> Self {
        MixerError::InvalidValue {
            name,
            expected,
            got: got.to_string().into_boxed_str(),
        }
    }
}
