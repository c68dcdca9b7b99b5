//! Response formatter: turns raw model text into an insertable block comment.
//!
//! Wrapping is greedy and measured in `char`s (not bytes, not display width).
//! Line breaks already present in the model output are kept as hard breaks.
//! A word is never split: one longer than the width gets a line of its own.

use crate::constants::{COMMENT_CLOSE, COMMENT_OPEN, MAX_LINE_WIDTH};

/// Greedy word-wrap of every `\n`-separated line of `text` to `max_width`.
///
/// Lines are packed up to exactly `max_width` chars, so text that already
/// fits comes back unchanged. Runs of whitespace between words collapse to a
/// single space. Blank input lines come out as blank output lines.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    text.split('\n')
        .map(|line| wrap_line(line, max_width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, max_width: usize) -> String {
    let mut wrapped: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        // An empty line accepts any word, however long.
        if current_len > 0 && current_len + 1 + word_len > max_width {
            wrapped.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    wrapped.push(current);
    wrapped.join("\n")
}

/// Leading whitespace of the selection's first non-blank line.
///
/// Blank lines at the head of the selection are skipped so the prefix never
/// contains a line break.
pub fn indent_prefix(selected: &str) -> &str {
    let leading = &selected[..selected.len() - selected.trim_start().len()];
    match leading.rfind('\n') {
        Some(idx) => &leading[idx + 1..],
        None => leading,
    }
}

/// Prefix every line of `body` with `prefix`.
pub fn indent_lines(body: &str, prefix: &str) -> String {
    body.split('\n')
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the block comment inserted ahead of the selection.
pub fn format_block(raw: &str, prefix: &str, header: &str) -> String {
    format_block_with_width(raw, prefix, header, MAX_LINE_WIDTH)
}

pub fn format_block_with_width(raw: &str, prefix: &str, header: &str, max_width: usize) -> String {
    let body = indent_lines(&wrap_text(raw, max_width), prefix);
    format!(
        "{p}{open}\n{p}{header}\n\n{body}\n{p}{close}\n\n",
        p = prefix,
        open = COMMENT_OPEN,
        header = header,
        body = body.trim_end(),
        close = COMMENT_CLOSE,
    )
}
