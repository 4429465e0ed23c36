//! Error types for markdown conversion.

/// Inline markup that cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A delimiter appears an odd number of times in a span of text.
    #[error("unbalanced delimiter `{delimiter}` in: {text}")]
    UnbalancedDelimiter {
        delimiter: &'static str,
        text: String,
    },
}

/// Structurally malformed block or node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Heading markers with no text after them.
    #[error("heading has no text: {0}")]
    EmptyHeading(String),

    /// Code block missing its opening or closing fence.
    #[error("code block is not fenced: {0}")]
    UnclosedCodeFence(String),

    #[error("quote line does not start with `>`: {0}")]
    InvalidQuoteLine(String),

    #[error("list line has no marker: {0}")]
    InvalidListLine(String),

    /// Parent node rendered without a tag.
    #[error("parent node requires a tag")]
    MissingTag,

    /// Parent node rendered without a children sequence.
    #[error("parent node `{0}` requires children")]
    MissingChildren(String),
}

/// Any failure while turning markdown into a document tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
