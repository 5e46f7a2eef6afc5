//! tsconfig files are JSON with comments and trailing commas. These helpers
//! reduce such input to plain JSON before it reaches `serde_json`.

/// Strip `//` line and `/* */` block comments, leaving string contents alone.
///
/// Line breaks inside comments are kept so error positions reported by
/// `serde_json` still point at the right line.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push(ch);
                copy_string_tail(&mut chars, &mut out);
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Drop commas that directly precede a closing `}` or `]`.
///
/// Expects comment-free input.
pub fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    // Index in `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                pending_comma = None;
                out.push(ch);
                copy_string_tail(&mut chars, &mut out);
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(ch);
            }
            '}' | ']' => {
                if let Some(index) = pending_comma.take() {
                    out.remove(index);
                }
                out.push(ch);
            }
            c if c.is_whitespace() => out.push(c),
            c => {
                pending_comma = None;
                out.push(c);
            }
        }
    }

    out
}

/// Reduce JSONC to JSON.
pub fn to_json(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

/// Copy the rest of a string literal whose opening quote was already copied.
fn copy_string_tail(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => break,
            _ => {}
        }
    }
}
