//! crates/logging/src/sink.rs
//! Record-oriented writer for the computed exclusion list.

use std::io::{self, Write};
use std::path::Path;

use crate::LineMode;

/// Streaming sink that writes paths into an [`io::Write`] target.
///
/// Each call to [`write`](Self::write) emits the path followed by the
/// terminator selected through [`LineMode`]. Paths are written as raw bytes on
/// Unix so names that are not valid UTF-8 survive unchanged.
///
/// # Examples
///
/// ```
/// use logging::PathSink;
/// use std::path::Path;
///
/// let mut sink = PathSink::new(Vec::new());
/// sink.write(Path::new("/root/a"))?;
/// sink.write(Path::new("/root/b"))?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output.lines().count(), 2);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct PathSink<W> {
    writer: W,
    line_mode: LineMode,
    written: usize,
}

impl<W> PathSink<W> {
    /// Creates a sink that terminates every path with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::Newline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer,
            line_mode,
            written: 0,
        }
    }

    /// Number of records written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> PathSink<W>
where
    W: Write,
{
    /// Writes a single path record.
    pub fn write(&mut self, path: &Path) -> io::Result<()> {
        self.writer.write_all(&path_bytes(path))?;
        self.writer.write_all(&[self.line_mode.terminator()])?;
        self.written += 1;
        Ok(())
    }

    /// Writes every path from the iterator in order.
    pub fn write_all<I, P>(&mut self, paths: I) -> io::Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.write(path.as_ref())?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> std::borrow::Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    std::borrow::Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> std::borrow::Cow<'_, [u8]> {
    match path.to_string_lossy() {
        std::borrow::Cow::Borrowed(text) => std::borrow::Cow::Borrowed(text.as_bytes()),
        std::borrow::Cow::Owned(text) => std::borrow::Cow::Owned(text.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn sink_appends_newlines_by_default() {
        let mut sink = PathSink::new(Vec::new());
        sink.write(Path::new("/pkgroot/usr/share/doc/foo"))
            .expect("write succeeds");
        sink.write(Path::new("/pkgroot/usr/share/man"))
            .expect("write succeeds");

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("/pkgroot/usr/share/doc/foo"));
        assert_eq!(lines.next(), Some("/pkgroot/usr/share/man"));
        assert!(lines.next().is_none());
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn nul_mode_terminates_with_zero_bytes() {
        let mut sink = PathSink::with_line_mode(Vec::new(), LineMode::Nul);
        sink.write_all(["a b", "c"]).expect("write succeeds");

        assert_eq!(sink.into_inner(), b"a b\0c\0".to_vec());
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut sink = PathSink::new(Vec::new());
        sink.write_all(Vec::<PathBuf>::new()).expect("write succeeds");

        assert_eq!(sink.written(), 0);
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn written_counts_records() {
        let mut sink = PathSink::new(Vec::new());
        let paths = vec![PathBuf::from("x"), PathBuf::from("y"), PathBuf::from("z")];
        sink.write_all(&paths).expect("write succeeds");

        assert_eq!(sink.written(), paths.len());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_written_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9");
        let mut sink = PathSink::new(Vec::new());
        sink.write(Path::new(name)).expect("write succeeds");

        assert_eq!(sink.into_inner(), b"caf\xe9\n".to_vec());
    }
}
