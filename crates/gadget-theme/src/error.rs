use std::fmt;

/// A syntax error in a `.gtheme` source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based source column number where the error occurred.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theme parse error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Error raised while turning a parsed document into a [`Theme`](crate::Theme).
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// The source is not syntactically valid.
    Parse(ParseError),
    /// No `Theme "<group>"` node exists in the document.
    GroupNotFound(String),
    /// A node is well-formed but semantically wrong (missing field, bad value, ...).
    Invalid { node: String, message: String },
}

impl ThemeError {
    pub(crate) fn invalid(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid { node: node.into(), message: message.into() }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Parse(e) => e.fmt(f),
            ThemeError::GroupNotFound(group) => write!(f, "theme group {group:?} not found"),
            ThemeError::Invalid { node, message } => write!(f, "invalid {node}: {message}"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for ThemeError {
    fn from(e: ParseError) -> Self {
        ThemeError::Parse(e)
    }
}
