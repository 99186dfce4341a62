/// Record terminator used by [`PathSink`](crate::PathSink) when writing paths.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Terminate each path with `\n`.
    #[default]
    Newline,
    /// Terminate each path with a NUL byte, for consumers such as `xargs -0`.
    Nul,
}

impl LineMode {
    /// Returns the byte appended after each record.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::LineMode;
    ///
    /// assert_eq!(LineMode::Newline.terminator(), b'\n');
    /// assert_eq!(LineMode::Nul.terminator(), b'\0');
    /// ```
    #[must_use]
    pub const fn terminator(self) -> u8 {
        match self {
            Self::Newline => b'\n',
            Self::Nul => b'\0',
        }
    }
}

impl From<bool> for LineMode {
    /// Converts a `--null` flag into a [`LineMode`].
    ///
    /// `true` selects [`LineMode::Nul`] while `false` keeps the default
    /// newline-terminated records.
    fn from(null_terminated: bool) -> Self {
        if null_terminated {
            Self::Nul
        } else {
            Self::Newline
        }
    }
}
