//! Comment and outer whitespace removal for matched rule bodies.
//!
//! Everything except comments is copied through untouched, so two bodies
//! compare equal only when their tokens and the spacing between them agree.
//! A `#` inside a literal, a character class or an action block is data, which
//! makes this stricter than a plain search for the comment marker.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    #[error("unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },
}

pub fn strip(text: &str) -> Result<String, StripError> {
    if !text.contains('#') {
        return Ok(text.trim().to_string());
    }

    let bytes = text.as_bytes();
    let mut stripped = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let Some(next_line) = skip_end_of_line(bytes, i) else {
                    return Err(StripError::UnterminatedComment { offset: i });
                };
                stripped.push_str(&text[copied..i]);
                i = next_line;
                copied = next_line;
            }
            quote @ (b'\'' | b'"') => i = skip_delimited(bytes, i + 1, quote),
            b'[' => i = skip_delimited(bytes, i + 1, b']'),
            b'{' => i = skip_block(bytes, i),
            _ => i += 1,
        }
    }
    stripped.push_str(&text[copied..]);

    Ok(stripped.trim().to_string())
}

/// Position right after the end-of-line that terminates the comment at `from`.
fn skip_end_of_line(bytes: &[u8], from: usize) -> Option<usize> {
    let eol = from + bytes[from..].iter().position(|&b| b == b'\n' || b == b'\r')?;

    if bytes[eol] == b'\r' && bytes.get(eol + 1) == Some(&b'\n') {
        Some(eol + 2)
    } else {
        Some(eol + 1)
    }
}

fn skip_delimited(bytes: &[u8], mut i: usize, close: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == close => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_block(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}
