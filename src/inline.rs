use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;
use crate::error::SyntaxError;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Split a line of block text into typed inline spans.
///
/// Passes run in a fixed order (code, bold, italic, images, links) and each
/// only re-splits spans still tagged [`Span::Text`]. The result contains no
/// empty text spans.
pub fn tokenize(text: &str) -> Result<Vec<Span>, SyntaxError> {
    let spans = vec![Span::Text(text.to_string())];
    let spans = split_delimiter(spans, "`", Span::Code)?;
    let spans = split_delimiter(spans, "**", Span::Bold)?;
    let spans = split_delimiter(spans, "*", Span::Italic)?;
    let spans = split_images(spans);
    let spans = split_links(spans);
    Ok(spans)
}

/// Split text spans on `delimiter`, styling the fragment at index 1.
///
/// Only the first delimited pair is styled; later pairs stay plain text.
/// Empty fragments are kept so the concatenated text is unchanged.
fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    style: fn(String) -> Span,
) -> Result<Vec<Span>, SyntaxError> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        if text.matches(delimiter).count() % 2 != 0 {
            return Err(SyntaxError::UnbalancedDelimiter { delimiter, text });
        }

        for (idx, fragment) in text.split(delimiter).enumerate() {
            if idx == 1 {
                out.push(style(fragment.to_string()));
            } else {
                out.push(Span::Text(fragment.to_string()));
            }
        }
    }

    Ok(out)
}

fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_pattern(spans, &IMAGE_PATTERN, |alt, url| Span::Image { alt, url })
}

fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_pattern(spans, &LINK_PATTERN, |text, url| Span::Link { text, url })
}

/// Pull every `pattern` match out of text spans, left to right.
///
/// Text around matches becomes plain spans; empty text spans are dropped.
fn split_pattern(
    spans: Vec<Span>,
    pattern: &Regex,
    build: impl Fn(String, String) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = 0;
        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            push_text(&mut out, &text[rest..whole.start()]);
            out.push(build(label.as_str().to_string(), url.as_str().to_string()));
            rest = whole.end();
        }
        push_text(&mut out, &text[rest..]);
    }

    out
}

fn push_text(out: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        out.push(Span::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn plain(spans: &[Span]) -> String {
        spans.iter().map(Span::text).collect()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(tokenize("just words").unwrap(), vec![text("just words")]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_eq!(tokenize("").unwrap(), Vec::<Span>::new());
    }

    #[test]
    fn code_span() {
        assert_eq!(
            tokenize("This is text with a `code block` word").unwrap(),
            vec![
                text("This is text with a "),
                Span::Code("code block".to_string()),
                text(" word"),
            ]
        );
    }

    #[test]
    fn bold_span() {
        assert_eq!(
            tokenize("This is text with a **bolded** word").unwrap(),
            vec![
                text("This is text with a "),
                Span::Bold("bolded".to_string()),
                text(" word"),
            ]
        );
    }

    #[test]
    fn italic_span() {
        assert_eq!(
            tokenize("an *italic* word").unwrap(),
            vec![text("an "), Span::Italic("italic".to_string()), text(" word")]
        );
    }

    #[test]
    fn bold_then_italic() {
        assert_eq!(
            tokenize("Hello **world** and *friend*.").unwrap(),
            vec![
                text("Hello "),
                Span::Bold("world".to_string()),
                text(" and "),
                Span::Italic("friend".to_string()),
                text("."),
            ]
        );
    }

    #[test]
    fn styled_span_at_start_leaves_no_empty_text() {
        assert_eq!(
            tokenize("**bold** tail").unwrap(),
            vec![Span::Bold("bold".to_string()), text(" tail")]
        );
    }

    #[test]
    fn delimiters_inside_code_are_literal() {
        assert_eq!(
            tokenize("run `a * b` now").unwrap(),
            vec![text("run "), Span::Code("a * b".to_string()), text(" now")]
        );
    }

    #[test]
    fn unbalanced_delimiters_fail() {
        assert_eq!(
            tokenize("a `broken code span"),
            Err(SyntaxError::UnbalancedDelimiter {
                delimiter: "`",
                text: "a `broken code span".to_string(),
            })
        );
        assert!(tokenize("**bold* text").is_err());
        assert!(tokenize("3 * 4 = 12").is_err());
    }

    #[test]
    fn only_first_delimited_pair_is_styled() {
        // Known limitation: the second pair is emitted as plain text.
        let spans = tokenize("**one** and **two**").unwrap();
        assert_eq!(
            spans,
            vec![
                Span::Bold("one".to_string()),
                text(" and "),
                text("two"),
            ]
        );
    }

    #[test]
    fn balanced_text_is_reconstructed_without_delimiters() {
        let source = "A `c` then **b** and *i* with ![x](u) and [l](v)!";
        let spans = tokenize(source).unwrap();
        assert_eq!(plain(&spans), "A c then b and i with x and l!");
    }

    #[test]
    fn image_extraction() {
        assert_eq!(
            tokenize("See ![cat](http://x/c.png) now").unwrap(),
            vec![
                text("See "),
                Span::Image {
                    alt: "cat".to_string(),
                    url: "http://x/c.png".to_string(),
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn only_links_and_images_carry_urls() {
        let spans = tokenize("`c` **b** *i* [l](/x) ![a](/y.png)").unwrap();
        let urls: Vec<Option<&str>> = spans
            .iter()
            .filter(|span| !span.is_plain())
            .map(Span::url)
            .collect();
        assert_eq!(urls, vec![None, None, None, Some("/x"), Some("/y.png")]);
    }

    #[test]
    fn image_is_not_also_a_link() {
        assert_eq!(
            tokenize("![alt](u)").unwrap(),
            vec![Span::Image {
                alt: "alt".to_string(),
                url: "u".to_string(),
            }]
        );
    }

    #[test]
    fn multiple_images() {
        assert_eq!(
            tokenize("This is ![image](https://i.imgur.com/zjjcJKZ.png) and ![another](https://i.imgur.com/dfsdkjfd.png)").unwrap(),
            vec![
                text("This is "),
                Span::Image {
                    alt: "image".to_string(),
                    url: "https://i.imgur.com/zjjcJKZ.png".to_string(),
                },
                text(" and "),
                Span::Image {
                    alt: "another".to_string(),
                    url: "https://i.imgur.com/dfsdkjfd.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn links_and_images_together() {
        assert_eq!(
            tokenize("a [link](https://boot.dev) and ![pic](p.png) end").unwrap(),
            vec![
                text("a "),
                Span::Link {
                    text: "link".to_string(),
                    url: "https://boot.dev".to_string(),
                },
                text(" and "),
                Span::Image {
                    alt: "pic".to_string(),
                    url: "p.png".to_string(),
                },
                text(" end"),
            ]
        );
    }

    #[test]
    fn link_matching_is_non_greedy() {
        assert_eq!(
            tokenize("[a](x) [b](y)").unwrap(),
            vec![
                Span::Link {
                    text: "a".to_string(),
                    url: "x".to_string(),
                },
                text(" "),
                Span::Link {
                    text: "b".to_string(),
                    url: "y".to_string(),
                },
            ]
        );
    }

    #[test]
    fn bracket_without_target_is_text() {
        assert_eq!(tokenize("[not a link]").unwrap(), vec![text("[not a link]")]);
    }

    #[test]
    fn tokenize_is_deterministic() {
        let source = "x **y** [z](w)";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }
}
