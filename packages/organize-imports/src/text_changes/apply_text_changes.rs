//! Applies a set of sparse text changes to a buffer in one linear pass.

use ts::TextChange;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextChangeError {
    #[error(
        "overlapping text changes: [{first_start}, {first_end}) and [{second_start}, {second_end})"
    )]
    Overlapping {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    #[error("text change [{start}, {end}) is out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("text change [{start}, {end}) does not fall on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

/// Check that every change fits `text` and that no two changes overlap.
///
/// Returns the changes sorted by start offset, an insertion ahead of a
/// replacement starting at the same offset. Insertions sharing an offset keep
/// their list order.
pub fn validate_text_changes<'c>(
    text: &str,
    changes: &'c [TextChange],
) -> Result<Vec<&'c TextChange>, TextChangeError> {
    for change in changes {
        let (start, end) = (change.start(), change.end());
        if end > text.len() {
            return Err(TextChangeError::OutOfBounds {
                start,
                end,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Err(TextChangeError::NotCharBoundary { start, end });
        }
    }

    let mut sorted: Vec<&TextChange> = changes.iter().collect();
    sorted.sort_by_key(|change| (change.start(), change.end()));

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.span.overlaps(&second.span) {
            return Err(TextChangeError::Overlapping {
                first_start: first.start(),
                first_end: first.end(),
                second_start: second.start(),
                second_end: second.end(),
            });
        }
    }

    Ok(sorted)
}

/// Produce the text that results from applying `changes` to `text`.
///
/// Unedited spans are copied verbatim. Fails without producing output if any
/// change is out of range or two changes overlap.
pub fn apply_text_changes(text: &str, changes: &[TextChange]) -> Result<String, TextChangeError> {
    if changes.is_empty() {
        return Ok(text.to_string());
    }

    let sorted = validate_text_changes(text, changes)?;

    let added: usize = sorted.iter().map(|change| change.new_text.len()).sum();
    let mut result = String::with_capacity(text.len() + added);
    let mut cursor = 0;

    for change in sorted {
        result.push_str(&text[cursor..change.start()]);
        result.push_str(&change.new_text);
        cursor = change.end();
    }
    result.push_str(&text[cursor..]);

    Ok(result)
}
