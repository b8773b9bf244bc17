use crate::error::LexError;
use statik_ir::Span;

/// Unescape a string literal's content (the text between the quotes).
///
/// Valid escapes: `\\ \" \' \n \t \r \0`. Fast path: if there is no
/// backslash, returns `None` so the caller can intern the source slice
/// directly without an extra allocation (mirrors `ori_lexer::cook_escape`'s
/// fast path).
pub(crate) fn unescape(content: &str, base_offset: u32, errors: &mut Vec<LexError>) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\\')) => result.push('\\'),
            Some((_, '"')) => result.push('"'),
            Some((_, '\'')) => result.push('\''),
            Some((_, 'n')) => result.push('\n'),
            Some((_, 't')) => result.push('\t'),
            Some((_, 'r')) => result.push('\r'),
            Some((_, '0')) => result.push('\0'),
            Some((j, other)) => {
                let start = base_offset + j as u32 - 1;
                errors.push(LexError::InvalidEscape {
                    span: Span::new(start, start + other.len_utf8() as u32 + 1),
                    ch: other,
                });
            }
            None => {
                let start = base_offset + i as u32;
                errors.push(LexError::UnterminatedString {
                    span: Span::new(start, start + 1),
                });
            }
        }
    }

    Some(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn fast_path_skips_allocation_marker() {
        let mut errors = Vec::new();
        assert_eq!(unescape("plain", 0, &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn resolves_known_escapes() {
        let mut errors = Vec::new();
        let cooked = unescape(r"a\nb\tc", 0, &mut errors).unwrap();
        assert_eq!(cooked, "a\nb\tc");
        assert!(errors.is_empty());
    }

    #[test]
    fn reports_unknown_escape() {
        let mut errors = Vec::new();
        let cooked = unescape(r"a\qb", 0, &mut errors).unwrap();
        assert_eq!(cooked, "ab");
        assert_eq!(errors.len(), 1);
    }
}
