use std::fmt::Display;

use thiserror::Error;

use crate::SourcePosition;

/// A failure raised during lexing, parsing or lowering. Carries the
/// position of the offending token or node; lowering aborts at the first
/// error, there is no recovery.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: SourcePosition,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: SourcePosition) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &SourcePosition {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ParseError { .. } => "ParseError",
            ErrorImpl::UnsupportedConstructError { .. } => "UnsupportedConstructError",
            ErrorImpl::MalformedTreeError { .. } => "MalformedTreeError",
            ErrorImpl::MalformedMethodBodyError { .. } => "MalformedMethodBodyError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a brace or operator?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ParseError { .. } => ErrorTip::None,
            ErrorImpl::UnsupportedConstructError { construct } => ErrorTip::Suggestion(format!(
                "`{}` is not supported by this language revision",
                construct
            )),
            ErrorImpl::MalformedTreeError { .. } => ErrorTip::Suggestion(String::from(
                "The parse tree violated a grammar invariant, this is a bug in the frontend",
            )),
            ErrorImpl::MalformedMethodBodyError { method } => ErrorTip::Suggestion(format!(
                "Method `{}` needs an expression body, a block body or an explicit `defer`",
                method
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in \"{}\" at line {} character {}: {}",
            self.get_error_name(),
            self.position.file,
            self.position.line,
            self.position.column,
            self.internal_error
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unable to interpret node: {node}")]
    ParseError { node: String },
    #[error("unsupported construct: {construct}")]
    UnsupportedConstructError { construct: String },
    #[error("malformed parse tree at node: {node}")]
    MalformedTreeError { node: String },
    #[error("malformed body for method: {method}")]
    MalformedMethodBodyError { method: String },
}
