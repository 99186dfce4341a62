use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::RuleKind;

/// A single rule: a [`RuleKind`] and the absolute glob pattern it applies.
///
/// Patterns are kept as platform strings, so bytes that are not valid UTF-8
/// reach the matcher unchanged.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PatternRule {
    pub(crate) kind: RuleKind,
    pub(crate) pattern: OsString,
}

impl PatternRule {
    /// Creates a rule from an already anchored pattern.
    #[must_use]
    pub fn new(kind: RuleKind, pattern: impl Into<OsString>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }

    /// Creates an exclude rule for an already anchored `pattern`.
    #[must_use]
    pub fn exclude(pattern: impl Into<OsString>) -> Self {
        Self::new(RuleKind::Exclude, pattern)
    }

    /// Creates an include rule for an already anchored `pattern`.
    #[must_use]
    pub fn include(pattern: impl Into<OsString>) -> Self {
        Self::new(RuleKind::Include, pattern)
    }

    /// Anchors a raw configuration value onto `root`.
    ///
    /// The first byte of `value` (conventionally `/`) is dropped and the
    /// remainder is joined onto `root` with [`Path::join`]. An absolute
    /// remainder therefore replaces `root` entirely.
    ///
    /// # Examples
    /// ```
    /// use filters::{PatternRule, RuleKind};
    /// use std::path::Path;
    ///
    /// let rule = PatternRule::anchored(RuleKind::Exclude, Path::new("/pkgroot"), "/usr/share/man/*");
    /// assert_eq!(rule.pattern(), "/pkgroot/usr/share/man/*");
    /// ```
    #[must_use]
    pub fn anchored(kind: RuleKind, root: &Path, value: impl AsRef<OsStr>) -> Self {
        let bytes = value.as_ref().as_encoded_bytes();
        let remainder = os_str_from_bytes(bytes.get(1..).unwrap_or_default());
        Self::new(kind, root.join(remainder))
    }

    /// Shorthand for [`anchored`](Self::anchored) with [`RuleKind::Exclude`].
    #[must_use]
    pub fn exclude_anchored(root: &Path, value: impl AsRef<OsStr>) -> Self {
        Self::anchored(RuleKind::Exclude, root, value)
    }

    /// Shorthand for [`anchored`](Self::anchored) with [`RuleKind::Include`].
    #[must_use]
    pub fn include_anchored(root: &Path, value: impl AsRef<OsStr>) -> Self {
        Self::anchored(RuleKind::Include, root, value)
    }

    /// Returns the rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns the anchored pattern.
    #[must_use]
    pub fn pattern(&self) -> &OsStr {
        &self.pattern
    }
}

/// Views raw configuration bytes as a platform string.
#[cfg(unix)]
pub(crate) fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(OsStr::from_bytes(bytes))
}

/// Views raw configuration bytes as a platform string.
///
/// Non-Unix paths are not byte strings, so invalid UTF-8 is replaced.
#[cfg(not(unix))]
pub(crate) fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => Cow::Borrowed(OsStr::new(text)),
        Cow::Owned(text) => Cow::Owned(OsString::from(text)),
    }
}
