use std::borrow::Cow;

/// Everything that can go wrong while building, mutating or showing a widget.
///
/// Rendering itself never fails: its preconditions are the caller's responsibility (see [`Widget`][crate::Widget]).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An `io::Error` occurred, usually while talking to the terminal in a [`Host`][crate::Host].
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A constructor or mutator was handed something it can't work with, e.g. an empty field list.
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),
    /// A value is outside the domain of a computation, e.g. a progress maximum of zero.
    #[error("domain error: {0}")]
    Domain(Cow<'static, str>),
    /// Just directly contains an error message.
    #[error("{0}")]
    Bare(Cow<'static, str>),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Domain(msg.into())
    }
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Self::Bare(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Bare(Cow::Owned(value))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
