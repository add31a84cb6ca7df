//! Long-bracket selection and document emission.
//!
//! The closing sequence `]` + n x `=` + `]` must not occur anywhere in
//! the emitted document, including across the boundary where the body
//! meets the closer. The scan below collects every colliding `=` count:
//! each complete `]=*]` run in the body (a closing `]` immediately starts
//! the next candidate, so overlapping runs are all seen) and a trailing
//! unclosed `]=*` run, which would fuse with the first byte of the
//! emitted closer.

use std::io::{self, Write};

use rustc_hash::FxHashSet;

/// Writes the document with its chosen brackets.
///
/// Inline form (no newlines around the body) is used only when the level
/// is below 5, the body has no newline, and the body is shorter than 30
/// bytes. A wrapped body ending in a bare CR gets a CRLF instead of the
/// plain LF so that re-lexing trims only synthetic bytes.
pub(crate) fn write_document<W: Write>(out: &mut W, body: &str) -> io::Result<()> {
    let (level, line_count) = closing_level(body);
    let equals = "=".repeat(level);

    write!(out, "[{}[", equals)?;

    if level < 5 && line_count == 1 && body.len() < 30 {
        out.write_all(body.as_bytes())?;
    } else {
        out.write_all(b"\n")?;
        out.write_all(body.as_bytes())?;
        if body.as_bytes().last() == Some(&b'\r') {
            out.write_all(b"\r\n")?;
        } else {
            out.write_all(b"\n")?;
        }
    }

    write!(out, "]{}]", equals)
}

/// Returns the smallest non-colliding `=` count and the body's line count.
fn closing_level(body: &str) -> (usize, usize) {
    let mut used: FxHashSet<usize> = FxHashSet::default();
    let mut run: Option<usize> = None;
    let mut line_count = 1;

    for &b in body.as_bytes() {
        match b {
            b']' => {
                if let Some(count) = run {
                    used.insert(count);
                }
                run = Some(0);
            },
            b'=' => {
                if let Some(count) = run.as_mut() {
                    *count += 1;
                }
            },
            _ => {
                if b == b'\n' {
                    line_count += 1;
                }
                run = None;
            },
        }
    }
    if let Some(count) = run {
        used.insert(count);
    }

    let mut level = 0;
    while used.contains(&level) {
        level += 1;
    }
    (level, line_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(body: &str) -> String {
        let mut out = Vec::new();
        write_document(&mut out, body).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_body_level_zero() {
        assert_eq!(emit("hello"), "[[hello]]");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(emit(""), "[[]]");
    }

    #[test]
    fn test_body_with_level_zero_closer() {
        assert_eq!(emit("a]]b"), "[=[a]]b]=]");
    }

    #[test]
    fn test_overlapping_runs_are_all_counted() {
        // "]]=]" contains both "]]" (0) and the overlapping "]=]" (1).
        assert_eq!(emit("]]=]"), "[==[]]=]]==]");
    }

    #[test]
    fn test_trailing_partial_run_collides() {
        // " ]]=" ends in "]=", which would fuse with the closer's first
        // "]" into "]=]"; level 1 is therefore unsafe.
        assert_eq!(emit(" ]]="), "[==[ ]]=]==]");
    }

    #[test]
    fn test_trailing_bracket_collides_with_level_zero() {
        assert_eq!(emit("x]"), "[=[x]]=]");
    }

    #[test]
    fn test_multiline_wraps() {
        assert_eq!(emit("one\ntwo"), "[[\none\ntwo\n]]");
    }

    #[test]
    fn test_long_body_wraps() {
        let body = "x".repeat(30);
        assert_eq!(emit(&body), format!("[[\n{}\n]]", body));
    }

    #[test]
    fn test_29_bytes_stays_inline() {
        let body = "x".repeat(29);
        assert_eq!(emit(&body), format!("[[{}]]", body));
    }

    #[test]
    fn test_level_five_wraps_even_short_bodies() {
        // All levels 0..=4 collide, forcing level 5 and the wrapped form.
        let body = "]]]=]]==]]===]]====]";
        let emitted = emit(body);
        assert_eq!(emitted, format!("[=====[\n{}\n]=====]", body));
    }

    #[test]
    fn test_wrapped_body_ending_in_cr() {
        let body = "line\nend\r";
        assert_eq!(emit(body), format!("[[\n{}\r\n]]", body));
    }

    #[test]
    fn test_chosen_closer_absent_from_body() {
        let bodies = [" ]]=", "]]=]", "x]", "]=]=]", "a]==]b", "]=", "="];
        for body in bodies {
            let (level, _) = closing_level(body);
            let closer = format!("]{}]", "=".repeat(level));
            assert!(
                !body.contains(&closer),
                "closer {:?} appears in body {:?}",
                closer,
                body
            );
        }
    }
}
