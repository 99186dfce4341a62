//! Parsing of `dpkg.cfg` style rule sources.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{
    PatternRule, RuleKind, RuleSourceError,
    debug_filter::{trace_fragment_loaded, trace_line_skipped, trace_rule_loaded},
    rule::os_str_from_bytes,
};

/// Whitespace recognised when splitting a configuration line.
const fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn trim_separators(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&byte| !is_separator(byte))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&byte| !is_separator(byte))
        .map_or(start, |last| last + 1);
    &bytes[start..end]
}

/// Parses a single configuration line into a rule anchored on `root`.
///
/// The line is split on the first run of whitespace into an option and a
/// value; the value keeps any interior whitespace. Lines without a value and
/// lines whose option is neither `path-exclude` nor `path-include` yield
/// `None`.
///
/// # Examples
///
/// ```
/// use filters::{parse_line, RuleKind};
/// use std::path::Path;
///
/// let rule = parse_line("path-include /usr/share/doc/*/copyright", Path::new("/target"))
///     .expect("recognised option");
/// assert_eq!(rule.kind(), RuleKind::Include);
/// assert_eq!(rule.pattern(), "/target/usr/share/doc/*/copyright");
///
/// assert!(parse_line("# path-exclude /usr/share/doc/*", Path::new("/target")).is_none());
/// assert!(parse_line("path-exclude", Path::new("/target")).is_none());
/// ```
#[must_use]
pub fn parse_line(line: &str, root: &Path) -> Option<PatternRule> {
    parse_line_bytes(line.as_bytes(), root)
}

/// Byte-level form of [`parse_line`]; the value is never decoded.
fn parse_line_bytes(line: &[u8], root: &Path) -> Option<PatternRule> {
    let line = trim_separators(line);
    let split = line.iter().position(|&byte| is_separator(byte))?;
    let (option, value) = line.split_at(split);
    let kind = RuleKind::from_option(std::str::from_utf8(option).ok()?)?;
    let value = trim_separators(value);
    Some(PatternRule::anchored(kind, root, os_str_from_bytes(value)))
}

/// Parses every line of `reader` into rules anchored on `root`, in order.
///
/// Values are taken as raw bytes, so patterns that are not valid UTF-8 match
/// file names with the same bytes.
pub fn parse_rules<R: BufRead>(
    reader: R,
    root: &Path,
) -> Result<Vec<PatternRule>, RuleSourceError> {
    parse_lines(reader, root).map_err(|source| RuleSourceError::Stream { source })
}

/// Reads and parses a single rule file.
pub fn read_rules(path: &Path, root: &Path) -> Result<Vec<PatternRule>, RuleSourceError> {
    let read_error = |source| RuleSourceError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    parse_lines(BufReader::new(file), root).map_err(read_error)
}

/// Reads every fragment of a `dpkg.cfg.d` style directory.
///
/// Fragments are read in lexical order of their file names and their rules are
/// concatenated. Names failing [`is_fragment_name`] and entries that are not
/// regular files (after following symlinks) are ignored.
pub fn read_rules_dir(dir: &Path, root: &Path) -> Result<Vec<PatternRule>, RuleSourceError> {
    let list_error = |source| RuleSourceError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut fragments: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let name = entry.file_name();
        if name.to_str().is_some_and(is_fragment_name) {
            fragments.push(entry.path());
        }
    }
    fragments.sort();

    let mut rules = Vec::new();
    for fragment in fragments {
        let metadata = fs::metadata(&fragment).map_err(|source| RuleSourceError::Read {
            path: fragment.clone(),
            source,
        })?;
        if !metadata.is_file() {
            continue;
        }
        let loaded = read_rules(&fragment, root)?;
        trace_fragment_loaded(&fragment.to_string_lossy(), loaded.len());
        rules.extend(loaded);
    }
    Ok(rules)
}

/// Returns whether `name` is read as a fragment of a rules directory.
///
/// Only ASCII letters, digits, `_` and `-` are accepted, which skips dotfiles,
/// `*.dpkg-old` leftovers and editor backups.
///
/// # Examples
/// ```
/// use filters::is_fragment_name;
/// assert!(is_fragment_name("01_nodoc"));
/// assert!(!is_fragment_name("01_nodoc.dpkg-old"));
/// assert!(!is_fragment_name("01_nodoc~"));
/// ```
#[must_use]
pub fn is_fragment_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}

fn parse_lines<R: BufRead>(mut reader: R, root: &Path) -> io::Result<Vec<PatternRule>> {
    let mut rules = Vec::new();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;
        match parse_line_bytes(&buffer, root) {
            Some(rule) => {
                trace_rule_loaded(rule.kind().option(), &rule.pattern().to_string_lossy());
                rules.push(rule);
            }
            None => trace_line_skipped(line_number, String::from_utf8_lossy(&buffer).trim_end()),
        }
    }

    Ok(rules)
}
