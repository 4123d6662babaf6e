//! Helpers for DataPower filestore paths such as `local:/dir/file.xsl`.
//!
//! The filestore (`local:`, `cert:`, ...) is the first component; below it
//! components are separated by `/`.

/// Splits at the first occurrence of `sep`. Without a match the whole string
/// is the prefix and the suffix is empty.
pub fn split_on_first<'a>(whole: &'a str, sep: &str) -> (&'a str, &'a str) {
    match whole.find(sep) {
        Some(idx) => (&whole[..idx], &whole[idx + sep.len()..]),
        None => (whole, ""),
    }
}

/// Splits at the last occurrence of `sep`. Without a match the whole string
/// is the prefix and the suffix is empty.
pub fn split_on_last<'a>(whole: &'a str, sep: &str) -> (&'a str, &'a str) {
    match whole.rfind(sep) {
        Some(idx) => (&whole[..idx], &whole[idx + sep.len()..]),
        None => (whole, ""),
    }
}

/// Resolves `name` relative to the DataPower directory `parent`.
///
/// `..` climbs one level but never above the filestore; `.` is identity.
pub fn dp_path(parent: &str, name: &str) -> String {
    match name {
        "." => parent.to_owned(),
        ".." => {
            let (prefix, _) = split_on_last(parent, "/");
            prefix.to_owned()
        }
        _ => format!("{parent}/{name}"),
    }
}

/// Splits a DataPower path into its components, filestore first.
pub fn split_dp_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// Filestore component of a DataPower path (`local:` for `local:/a/b`).
pub fn filestore_of(path: &str) -> &str {
    split_on_first(path, "/").0
}

/// True when `path` names the filestore itself rather than something inside it.
pub fn is_filestore_root(path: &str) -> bool {
    !path.contains('/')
}

/// Last component of a DataPower path.
pub fn dp_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_path_joins_and_climbs() {
        let cases = [
            ("local:/dir1/dir2", "myfile", "local:/dir1/dir2/myfile"),
            ("local:", "myfile", "local:/myfile"),
            ("local:/dir1/dir2", "..", "local:/dir1"),
            ("local:/dir1/dir2", ".", "local:/dir1/dir2"),
            ("local:/dir1", "..", "local:"),
            ("local:", "..", "local:"),
            ("local:", ".", "local:"),
        ];
        for (parent, name, want) in cases {
            assert_eq!(dp_path(parent, name), want, "dp_path({parent:?}, {name:?})");
        }
    }

    #[test]
    fn split_dp_path_components() {
        assert!(split_dp_path("").is_empty());
        assert_eq!(split_dp_path("local:"), ["local:"]);
        assert_eq!(split_dp_path("local:/dir1/dir2"), ["local:", "dir1", "dir2"]);
    }

    #[test]
    fn split_on_first_and_last() {
        assert_eq!(split_on_first("/usr/bin/share", "/"), ("", "usr/bin/share"));
        assert_eq!(split_on_first("usr/bin/share", "/"), ("usr", "bin/share"));
        assert_eq!(split_on_first("share", "/"), ("share", ""));
        assert_eq!(split_on_first("my big testing task", " "), ("my", "big testing task"));

        assert_eq!(split_on_last("/usr/bin/share", "/"), ("/usr/bin", "share"));
        assert_eq!(split_on_last("local:/test1", "/"), ("local:", "test1"));
        assert_eq!(split_on_last("local:", "/"), ("local:", ""));
    }

    #[test]
    fn filestore_helpers() {
        assert_eq!(filestore_of("local:/a/b"), "local:");
        assert_eq!(filestore_of("cert:"), "cert:");
        assert!(is_filestore_root("cert:"));
        assert!(!is_filestore_root("local:/a"));
        assert_eq!(dp_name("local:/a/b.xsl"), "b.xsl");
        assert_eq!(dp_name("local:"), "local:");
    }
}
