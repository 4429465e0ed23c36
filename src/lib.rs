mod block;
mod config;
mod error;
pub mod html;
mod inline;
mod node;
mod parser;
pub mod site;

use std::sync::LazyLock;

use regex::Regex;

pub use block::{Block, BlockKind, Span};
pub use config::{Config, ConfigError, PathsConfig, TemplateConfig};
pub use error::{Error, SyntaxError, ValidationError};
pub use inline::tokenize;
pub use node::{Attributes, Leaf, Node, Parent};
pub use parser::{classify, split_blocks};

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

/// Parse markdown text into a vector of classified blocks.
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    parser::parse(markdown)
}

/// Convert markdown to a document tree rooted at a single `div`.
///
/// Conversion is all-or-nothing: the first inline or block error aborts it.
pub fn markdown_to_document(markdown: &str) -> Result<Node, Error> {
    let blocks = parse(markdown);
    tracing::debug!(block_count = blocks.len(), "converting markdown document");
    html::blocks_to_document(&blocks)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String, Error> {
    Ok(markdown_to_document(markdown)?.render()?)
}

/// Text of the first level-1 heading line, if any.
pub fn extract_title(markdown: &str) -> Option<String> {
    TITLE_PATTERN
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|title| title.as_str().trim())
        .find(|title| !title.is_empty())
        .map(str::to_string)
}
