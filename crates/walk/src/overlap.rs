use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Removes every path that has a proper ancestor elsewhere in `paths`.
///
/// Survivors keep their relative order. Ancestry is purely lexical, by path
/// components, so `doc/foo` covers `doc/foo/readme.txt` but not
/// `doc/foobar`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use walk::drop_covered;
///
/// let paths = vec![
///     PathBuf::from("/p/usr/share/doc/foo/readme.txt"),
///     PathBuf::from("/p/usr/share/doc/foo"),
///     PathBuf::from("/p/usr/share/doc/foobar"),
/// ];
/// assert_eq!(
///     drop_covered(paths),
///     vec![
///         PathBuf::from("/p/usr/share/doc/foo"),
///         PathBuf::from("/p/usr/share/doc/foobar"),
///     ],
/// );
/// ```
#[must_use]
pub fn drop_covered(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let keep: Vec<bool> = {
        let emitted: HashSet<&Path> = paths.iter().map(PathBuf::as_path).collect();
        paths
            .iter()
            .map(|path| {
                !path
                    .ancestors()
                    .skip(1)
                    .any(|ancestor| emitted.contains(ancestor))
            })
            .collect()
    };

    paths
        .into_iter()
        .zip(keep)
        .filter_map(|(path, keep)| keep.then_some(path))
        .collect()
}
