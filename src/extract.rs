//! Flattens a chat result into a display string.

use crate::proto::ChatResult;

/// Concatenate the raw text of every node in the first bubble, in order.
///
/// Returns `None` when the result carries fewer than two bubbles: answers
/// observed from the service always arrive with at least two, and anything
/// shorter has no usable content. Only bubble 0 is ever read. Paragraphs
/// without a text run contribute nothing, so an all-empty first bubble
/// yields `Some("")`, not `None`.
pub fn extract_answer(result: &ChatResult) -> Option<String> {
    if result.bubble.len() < 2 {
        return None;
    }
    let mut answer = String::new();
    for paragraph in &result.bubble[0].paragraphs {
        if let Some(text) = &paragraph.text {
            for node in &text.nodes {
                answer.push_str(&node.raw_text);
            }
        }
    }
    Some(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Bubble, Paragraph, Text, TextNode};

    fn bubble(paragraphs: Vec<Paragraph>) -> Bubble {
        Bubble { paragraphs }
    }

    fn text_paragraph(fragments: &[&str]) -> Paragraph {
        Paragraph {
            text: Some(Text {
                nodes: fragments
                    .iter()
                    .map(|f| TextNode {
                        raw_text: f.to_string(),
                    })
                    .collect(),
            }),
        }
    }

    #[test]
    fn fewer_than_two_bubbles_is_unusable() {
        let empty = ChatResult { bubble: vec![] };
        assert_eq!(extract_answer(&empty), None);

        let single = ChatResult {
            bubble: vec![bubble(vec![text_paragraph(&["hello"])])],
        };
        assert_eq!(extract_answer(&single), None);
    }

    #[test]
    fn empty_first_bubble_yields_empty_string() {
        let result = ChatResult {
            bubble: vec![bubble(vec![]), bubble(vec![])],
        };
        assert_eq!(extract_answer(&result), Some(String::new()));
    }

    #[test]
    fn nodes_concatenate_in_order_across_paragraphs() {
        let result = ChatResult {
            bubble: vec![
                bubble(vec![text_paragraph(&["A", "B"]), text_paragraph(&["C"])]),
                bubble(vec![]),
            ],
        };
        assert_eq!(extract_answer(&result).as_deref(), Some("ABC"));
    }

    #[test]
    fn paragraphs_without_text_contribute_nothing() {
        let result = ChatResult {
            bubble: vec![
                bubble(vec![
                    text_paragraph(&["start"]),
                    Paragraph { text: None },
                    text_paragraph(&["end"]),
                ]),
                bubble(vec![]),
            ],
        };
        assert_eq!(extract_answer(&result).as_deref(), Some("startend"));
    }

    #[test]
    fn only_the_first_bubble_is_read() {
        let result = ChatResult {
            bubble: vec![
                bubble(vec![text_paragraph(&["first"])]),
                bubble(vec![text_paragraph(&["second"])]),
            ],
        };
        assert_eq!(extract_answer(&result).as_deref(), Some("first"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let result = ChatResult {
            bubble: vec![
                bubble(vec![text_paragraph(&["same ", "answer"])]),
                bubble(vec![]),
            ],
        };
        assert_eq!(extract_answer(&result), extract_answer(&result));
    }
}
