//! Lightweight lexical helpers shared by the declaration scanners.
//!
//! None of these build a syntax tree. They only know enough about comments,
//! string literals and bracket nesting to keep pattern matching honest.

/// Splits `s` on commas that are not nested inside `<...>` or `(...)`.
///
/// Entries are trimmed. A trailing empty entry is not produced, but empty
/// entries in the middle (`a,,b`) are kept so callers can decide.
pub fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut depth = 0usize;
    let mut prev = '\0';
    for ch in s.chars() {
        match ch {
            '<' | '(' => depth += 1,
            // `->` of a function type is not a closing bracket
            '>' if prev == '-' => {}
            '>' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(buf.trim().to_string());
                buf.clear();
                prev = ch;
                continue;
            }
            _ => {}
        }
        buf.push(ch);
        prev = ch;
    }
    if !buf.trim().is_empty() {
        out.push(buf.trim().to_string());
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    LineComment,
    BlockComment(u32),
    Str,
    RawStr,
    Char,
}

/// Blanks out `//` and `/* */` comments, keeping byte offsets and line breaks.
///
/// String and char literals are copied verbatim so annotation arguments such
/// as `@RpcService("a//b")` survive. Block comments nest.
pub fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = Lex::Code;
    let mut i = 0;

    let blank = |b: u8| if b == b'\n' || b == b'\r' { b } else { b' ' };

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            Lex::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = Lex::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = Lex::BlockComment(1);
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'"', _) if bytes[i..].starts_with(b"\"\"\"") => {
                    state = Lex::RawStr;
                    out.extend_from_slice(b"\"\"\"");
                    i += 3;
                    continue;
                }
                (b'"', _) => {
                    state = Lex::Str;
                    out.push(b);
                }
                (b'\'', _) => {
                    state = Lex::Char;
                    out.push(b);
                }
                _ => out.push(b),
            },
            Lex::LineComment => {
                if b == b'\n' {
                    state = Lex::Code;
                }
                out.push(blank(b));
            }
            Lex::BlockComment(depth) => match (b, next) {
                (b'*', Some(b'/')) => {
                    state = if depth == 1 {
                        Lex::Code
                    } else {
                        Lex::BlockComment(depth - 1)
                    };
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = Lex::BlockComment(depth + 1);
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                _ => out.push(blank(b)),
            },
            Lex::Str | Lex::Char => {
                out.push(b);
                let close = if state == Lex::Str { b'"' } else { b'\'' };
                if b == b'\\' {
                    if let Some(n) = next {
                        out.push(n);
                        i += 2;
                        continue;
                    }
                } else if b == close || b == b'\n' {
                    state = Lex::Code;
                }
            }
            Lex::RawStr => {
                if bytes[i..].starts_with(b"\"\"\"") {
                    state = Lex::Code;
                    out.extend_from_slice(b"\"\"\"");
                    i += 3;
                    continue;
                }
                out.push(b);
            }
        }
        i += 1;
    }

    // Only whole comment spans are replaced, and always with ASCII.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Tracks `{}` nesting over comment-free text, skipping string literals.
///
/// Offsets must be queried in ascending order.
pub struct DepthTracker<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    state: Lex,
}

impl<'a> DepthTracker<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            state: Lex::Code,
        }
    }

    /// Brace depth just before byte `offset`.
    pub fn depth_at(&mut self, offset: usize) -> usize {
        let end = offset.min(self.bytes.len());
        while self.pos < end {
            let b = self.bytes[self.pos];
            match self.state {
                Lex::Code => match b {
                    b'{' => self.depth += 1,
                    b'}' => self.depth = self.depth.saturating_sub(1),
                    b'"' if self.bytes[self.pos..].starts_with(b"\"\"\"") => {
                        self.state = Lex::RawStr;
                        self.pos += 3;
                        continue;
                    }
                    b'"' => self.state = Lex::Str,
                    b'\'' => self.state = Lex::Char,
                    _ => {}
                },
                Lex::Str | Lex::Char => {
                    let close = if self.state == Lex::Str { b'"' } else { b'\'' };
                    if b == b'\\' {
                        self.pos += 2;
                        continue;
                    }
                    if b == close || b == b'\n' {
                        self.state = Lex::Code;
                    }
                }
                Lex::RawStr => {
                    if self.bytes[self.pos..].starts_with(b"\"\"\"") {
                        self.state = Lex::Code;
                        self.pos += 3;
                        continue;
                    }
                }
                Lex::LineComment | Lex::BlockComment(_) => self.state = Lex::Code,
            }
            self.pos += 1;
        }
        self.depth
    }
}

/// Cuts `s` at the first top-level occurrence of `needle`, ignoring
/// occurrences nested in `<>` or `()`.
pub fn cut_top_level(s: &str, needle: char) -> &str {
    let mut depth = 0usize;
    let mut prev = '\0';
    for (i, ch) in s.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' if prev == '-' => {}
            '>' | ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return &s[..i],
            _ => {}
        }
        prev = ch;
    }
    s
}

/// Byte offset of the `)` closing the `(` at `open`.
///
/// Nested parentheses and string or char literals are skipped. Returns
/// `None` when `open` is not a `(` or the list never closes.
pub fn closing_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_nested_generics() {
        assert_eq!(
            split_top_level_commas("id: String, filter: Map<String, List<Int>>, limit: Int"),
            vec!["id: String", "filter: Map<String, List<Int>>", "limit: Int"]
        );
        assert_eq!(split_top_level_commas("a: Int,"), vec!["a: Int"]);
        assert!(split_top_level_commas("   ").is_empty());
    }

    #[test]
    fn test_split_respects_calls_and_function_types() {
        assert_eq!(
            split_top_level_commas("limit: Int = maxOf(1, 2), cb: (Int, String) -> Unit, x: Int"),
            vec!["limit: Int = maxOf(1, 2)", "cb: (Int, String) -> Unit", "x: Int"]
        );
        assert_eq!(
            split_top_level_commas("m: Map<String, (Int) -> Unit>, y: Int"),
            vec!["m: Map<String, (Int) -> Unit>", "y: Int"]
        );
    }

    #[test]
    fn test_closing_paren() {
        let text = r#"fun f(a: Int = max(1, 2), s: String = ")"): Int"#;
        let open = text.find('(').unwrap();
        let close = closing_paren(text, open).unwrap();
        assert_eq!(&text[close..], "): Int");
        assert_eq!(closing_paren("f(a: Int", 1), None);
        assert_eq!(closing_paren("f(a)", 0), None);
    }

    #[test]
    fn test_strip_comments_keeps_offsets_and_strings() {
        let src = "package a // trailing\n/* block\n /* nested */ still */ val s = \"//not\"\n";
        let out = strip_comments(src);
        assert_eq!(out.len(), src.len());
        assert_eq!(out.lines().count(), src.lines().count());
        assert!(out.starts_with("package a "));
        assert!(!out.contains("trailing"));
        assert!(!out.contains("block"));
        assert!(!out.contains("still"));
        assert!(out.contains("\"//not\""));
    }

    #[test]
    fn test_strip_comments_multibyte() {
        let src = "// héllo\nval x = 1";
        let out = strip_comments(src);
        assert_eq!(out.len(), src.len());
        assert!(out.ends_with("val x = 1"));
    }

    #[test]
    fn test_depth_tracker() {
        let text = "class A {\n  val s = \"{\"\n  class B\n}\nclass C";
        let mut tracker = DepthTracker::new(text);
        let b = text.find("class B").unwrap();
        let c = text.find("class C").unwrap();
        assert_eq!(tracker.depth_at(0), 0);
        assert_eq!(tracker.depth_at(b), 1);
        assert_eq!(tracker.depth_at(c), 0);
    }

    #[test]
    fn test_cut_top_level() {
        assert_eq!(cut_top_level("Map<String, Int> = mapOf()", '='), "Map<String, Int> ");
        assert_eq!(cut_top_level("Int", '='), "Int");
        assert_eq!(
            cut_top_level(" () -> Unit = {}", '='),
            " () -> Unit "
        );
    }
}
