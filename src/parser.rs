use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind};

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s").unwrap());

const CODE_FENCE: &str = "```";

/// Split markdown into trimmed blocks on blank-line boundaries.
///
/// Blocks left empty by runs of blank lines are skipped.
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    BLANK_LINE
        .split(markdown)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a single trimmed block. The first matching rule wins.
pub fn classify(block: &str) -> BlockKind {
    // Matches anywhere in the block, not only at its start.
    if HEADING_PATTERN.is_match(block) {
        BlockKind::Heading
    } else if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        BlockKind::Code
    } else if block.starts_with("> ") {
        if block.lines().all(|line| line.starts_with("> ")) {
            BlockKind::Quote
        } else {
            BlockKind::Paragraph
        }
    } else if is_bullet(block) {
        if block.lines().all(|line| is_bullet(line.trim())) {
            BlockKind::UnorderedList
        } else {
            BlockKind::Paragraph
        }
    } else if block.starts_with("1. ") {
        if is_numbered_sequence(block) {
            BlockKind::OrderedList
        } else {
            BlockKind::Paragraph
        }
    } else {
        BlockKind::Paragraph
    }
}

/// Parse markdown text into a list of classified blocks
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    split_blocks(markdown)
        .into_iter()
        .map(|text| Block {
            kind: classify(text),
            text,
        })
        .collect()
}

pub(crate) fn is_bullet(line: &str) -> bool {
    line.starts_with("* ") || line.starts_with("- ")
}

/// Every line `n` (1-based) starts with `"n. "`.
fn is_numbered_sequence(block: &str) -> bool {
    block
        .lines()
        .enumerate()
        .all(|(idx, line)| line.starts_with(&format!("{}. ", idx + 1)))
}
