use std::ffi::{OsStr, OsString};
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use regex::bytes::Regex;

use crate::{PatternRule, debug_filter::trace_pattern_fallback};

/// A [`PatternRule`] together with its compiled matcher.
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    pub(crate) rule: PatternRule,
    matcher: Matcher,
}

#[derive(Clone, Debug)]
enum Matcher {
    Glob(GlobMatcher),
    /// Patterns that are not valid UTF-8, matched over raw path bytes.
    Bytes(Regex),
    /// Exact comparison for patterns neither engine can express.
    Literal(OsString),
}

impl CompiledRule {
    pub(crate) fn new(rule: PatternRule) -> Self {
        let matcher = compile(&rule.pattern);
        Self { rule, matcher }
    }

    pub(crate) fn matches(&self, path: &Path) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(path),
            Matcher::Bytes(regex) => regex.is_match(path.as_os_str().as_encoded_bytes()),
            Matcher::Literal(text) => path.as_os_str() == text.as_os_str(),
        }
    }
}

fn compile(pattern: &OsStr) -> Matcher {
    let built = match pattern.to_str() {
        Some(text) => GlobBuilder::new(&translate(text))
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map(|glob| Matcher::Glob(glob.compile_matcher()))
            .map_err(|error| error.to_string()),
        None => Regex::new(&translate_bytes(pattern.as_encoded_bytes()))
            .map(Matcher::Bytes)
            .map_err(|error| error.to_string()),
    };
    built.unwrap_or_else(|reason| {
        trace_pattern_fallback(&pattern.to_string_lossy(), &reason);
        Matcher::Literal(pattern.to_os_string())
    })
}

/// Rewrites an `fnmatch` pattern into equivalent globset syntax.
///
/// globset gives `{`, `}`, `**` and `[^` meanings that `fnmatch` does not
/// have, and rejects unterminated classes that `fnmatch` reads literally.
pub(crate) fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];
        index += 1;
        match ch {
            '*' => {
                while chars.get(index) == Some(&'*') {
                    index += 1;
                }
                out.push('*');
            }
            '{' | '}' => {
                out.push('[');
                out.push(ch);
                out.push(']');
            }
            '[' => match class_end(chars.as_slice(), index) {
                Some(end) => {
                    push_class(&mut out, &chars[index..end]);
                    index = end + 1;
                }
                None => out.push_str("[[]"),
            },
            _ => out.push(ch),
        }
    }

    out
}

/// Rewrites an `fnmatch` pattern over raw bytes into an anchored byte regex.
///
/// Every byte other than an ASCII letter or digit is emitted as a `\xHH`
/// escape.
pub(crate) fn translate_bytes(pattern: &[u8]) -> String {
    let mut out = String::from("(?s-u)\\A");
    let mut index = 0;

    while index < pattern.len() {
        let byte = pattern[index];
        index += 1;
        match byte {
            b'*' => {
                while pattern.get(index) == Some(&b'*') {
                    index += 1;
                }
                out.push_str(".*");
            }
            b'?' => out.push('.'),
            b'[' => match class_end(pattern, index) {
                Some(end) => {
                    push_byte_class(&mut out, &pattern[index..end]);
                    index = end + 1;
                }
                None => push_byte(&mut out, byte),
            },
            _ => push_byte(&mut out, byte),
        }
    }

    out.push_str("\\z");
    out
}

/// Finds the `]` closing a class whose body starts at `start`.
///
/// A `]` directly after `[` or `[!` belongs to the body.
fn class_end<T>(items: &[T], start: usize) -> Option<usize>
where
    T: Copy + PartialEq + From<u8>,
{
    let bang = T::from(b'!');
    let close = T::from(b']');
    let mut end = start;
    if items.get(end) == Some(&bang) {
        end += 1;
    }
    if items.get(end) == Some(&close) {
        end += 1;
    }
    while end < items.len() && items[end] != close {
        end += 1;
    }
    (end < items.len()).then_some(end)
}

fn push_byte_class(out: &mut String, body: &[u8]) {
    out.push('[');
    let members = match body.split_first() {
        Some((b'!', rest)) => {
            out.push('^');
            rest
        }
        _ => body,
    };

    let mut index = 0;
    while index < members.len() {
        push_byte(out, members[index]);
        if members.get(index + 1) == Some(&b'-') && index + 2 < members.len() {
            out.push('-');
            push_byte(out, members[index + 2]);
            index += 3;
        } else {
            index += 1;
        }
    }
    out.push(']');
}

fn push_byte(out: &mut String, byte: u8) {
    if byte.is_ascii_alphanumeric() {
        out.push(char::from(byte));
    } else {
        out.push_str(&format!("\\x{byte:02X}"));
    }
}

fn push_class(out: &mut String, body: &[char]) {
    match body.split_first() {
        // fnmatch only negates with `!`; a leading `^` is a member.
        Some(('^', [])) => out.push('^'),
        Some(('^', rest)) => push_caret_class(out, rest),
        _ => {
            out.push('[');
            out.extend(body);
            out.push(']');
        }
    }
}

/// Emits a class whose first member is a literal `^`.
///
/// globset negates on a leading `^` or `!`, so neither may come first.
fn push_caret_class(out: &mut String, rest: &[char]) {
    let mut members: Vec<char> = match rest.split_last() {
        Some(('-', head)) => std::iter::once('-').chain(head.iter().copied()).collect(),
        _ => rest.to_vec(),
    };

    if members.first() != Some(&'!') {
        out.push('[');
        out.extend(&members);
        out.push_str("^]");
        return;
    }

    out.push_str("{^,!");
    while members.first() == Some(&'!') {
        members.remove(0);
    }
    if members.len() > 1 && members[0] == '-' {
        // `!-x`: the range now starts just past `!`
        members.insert(0, '"');
    }
    if !members.is_empty() {
        out.push_str(",[");
        out.extend(&members);
        out.push(']');
    }
    out.push('}');
}
