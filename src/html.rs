use crate::block::{Block, BlockKind, Span};
use crate::error::{Error, ValidationError};
use crate::inline::tokenize;
use crate::node::{Attributes, Leaf, Node, Parent};
use crate::parser::is_bullet;

/// HTML tags and attribute names used by the generated tree.
pub mod tag {
    pub const DOCUMENT: &str = "div";
    pub const PARAGRAPH: &str = "p";
    pub const HEADING_PREFIX: &str = "h";
    pub const PREFORMATTED: &str = "pre";
    pub const CODE: &str = "code";
    pub const QUOTE: &str = "blockquote";
    pub const UNORDERED_LIST: &str = "ul";
    pub const ORDERED_LIST: &str = "ol";
    pub const LIST_ITEM: &str = "li";
    pub const BOLD: &str = "b";
    pub const ITALIC: &str = "i";
    pub const LINK: &str = "a";
    pub const IMAGE: &str = "img";

    pub const LINK_TARGET: &str = "href";
    pub const IMAGE_SOURCE: &str = "src";
    pub const IMAGE_ALT: &str = "alt";
}

const CODE_FENCE: &str = "```";

/// Convert classified blocks into a single document root.
pub fn blocks_to_document(blocks: &[Block]) -> Result<Node, Error> {
    let children = blocks
        .iter()
        .map(block_to_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Parent::new(tag::DOCUMENT, children).into())
}

/// Convert one classified block into its node subtree.
pub fn block_to_node(block: &Block) -> Result<Node, Error> {
    let text = block.text;
    let node = match block.kind {
        BlockKind::Paragraph => paragraph(text)?,
        BlockKind::Heading => heading(text)?,
        BlockKind::Code => code(text)?,
        BlockKind::Quote => quote(text)?,
        BlockKind::UnorderedList => unordered_list(text)?,
        BlockKind::OrderedList => ordered_list(text)?,
    };
    Ok(node.into())
}

/// Convert one inline span into a leaf node.
pub fn span_to_leaf(span: Span) -> Leaf {
    match span {
        Span::Text(text) => Leaf::text(text),
        Span::Bold(text) => Leaf::new(tag::BOLD, text),
        Span::Italic(text) => Leaf::new(tag::ITALIC, text),
        Span::Code(text) => Leaf::new(tag::CODE, text),
        Span::Link { text, url } => Leaf::new(tag::LINK, text)
            .with_attributes(Attributes::new().with(tag::LINK_TARGET, url)),
        Span::Image { alt, url } => Leaf::new(tag::IMAGE, "").with_attributes(
            Attributes::new()
                .with(tag::IMAGE_SOURCE, url)
                .with(tag::IMAGE_ALT, alt),
        ),
    }
}

/// Tokenize `text` into leaf nodes, dropping empty plain text.
fn inline_children(text: &str) -> Result<Vec<Node>, Error> {
    Ok(tokenize(text)?
        .into_iter()
        .filter(|span| !(span.is_plain() && span.text().is_empty()))
        .map(|span| span_to_leaf(span).into())
        .collect())
}

fn paragraph(block: &str) -> Result<Parent, Error> {
    let joined = block.lines().collect::<Vec<_>>().join(" ");
    Ok(Parent::new(tag::PARAGRAPH, inline_children(&joined)?))
}

fn heading(block: &str) -> Result<Parent, Error> {
    let level = block.chars().take_while(|&c| c == '#').count();
    let rest = &block[level..];

    // Classification only saw a `# ` somewhere in the block.
    if !(1..=6).contains(&level) || !rest.starts_with(char::is_whitespace) {
        return paragraph(block);
    }

    // Drop the single separator after the markers.
    let separator = rest.chars().next().map_or(0, char::len_utf8);
    let text = &rest[separator..];
    if text.is_empty() {
        return Err(ValidationError::EmptyHeading(block.to_string()).into());
    }

    let heading_tag = format!("{}{level}", tag::HEADING_PREFIX);
    Ok(Parent::new(heading_tag, inline_children(text)?))
}

fn code(block: &str) -> Result<Parent, Error> {
    if !block.starts_with(CODE_FENCE) || !block.ends_with(CODE_FENCE) {
        return Err(ValidationError::UnclosedCodeFence(block.to_string()).into());
    }

    // A lone fence opens and closes on the same backticks.
    let interior = if block.len() >= 2 * CODE_FENCE.len() {
        &block[CODE_FENCE.len()..block.len() - CODE_FENCE.len()]
    } else {
        ""
    };

    let code = Parent::new(tag::CODE, inline_children(interior)?);
    Ok(Parent::new(tag::PREFORMATTED, vec![code.into()]))
}

fn quote(block: &str) -> Result<Parent, Error> {
    let mut lines = Vec::new();
    for line in block.lines() {
        let stripped = line
            .strip_prefix('>')
            .ok_or_else(|| ValidationError::InvalidQuoteLine(line.to_string()))?;
        lines.push(stripped.strip_prefix(' ').unwrap_or(stripped));
    }

    Ok(Parent::new(tag::QUOTE, inline_children(&lines.join(" "))?))
}

fn unordered_list(block: &str) -> Result<Parent, Error> {
    let mut items = Vec::new();
    for line in block.lines() {
        let line = line.trim();
        if !is_bullet(line) {
            return Err(ValidationError::InvalidListLine(line.to_string()).into());
        }
        items.push(list_item(&line[2..])?);
    }

    Ok(Parent::new(tag::UNORDERED_LIST, items))
}

fn ordered_list(block: &str) -> Result<Parent, Error> {
    let mut items = Vec::new();
    for (idx, line) in block.lines().enumerate() {
        let line = line.trim();
        let marker = format!("{}. ", idx + 1);
        let content = line
            .strip_prefix(marker.as_str())
            .ok_or_else(|| ValidationError::InvalidListLine(line.to_string()))?;
        items.push(list_item(content)?);
    }

    Ok(Parent::new(tag::ORDERED_LIST, items))
}

fn list_item(text: &str) -> Result<Node, Error> {
    Ok(Parent::new(tag::LIST_ITEM, inline_children(text)?).into())
}
