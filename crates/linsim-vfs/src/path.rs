//! Path normalization helpers.

/// Resolve a possibly-relative path against the current working directory.
///
/// Empty and `.` segments are dropped, `..` pops one segment (and stays at
/// `/` when already at the root). The result is always absolute with no
/// trailing slash except for the root itself.
pub fn normalize_path(cwd: &str, input: &str) -> String {
    let raw = if input.starts_with('/') {
        input.to_string()
    } else if cwd.is_empty() || cwd == "/" {
        format!("/{input}")
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Non-empty segments of a normalized path.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Parent of a normalized path (`/` for the root and top-level entries).
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

/// Last segment of a normalized path (empty for the root).
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Whether the normalized `path` is `ancestor` itself or lies below it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    ancestor == "/"
        || path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_passthrough() {
        assert_eq!(normalize_path("/home", "/etc/passwd"), "/etc/passwd");
    }

    #[test]
    fn relative_join() {
        assert_eq!(normalize_path("/home/wisnu", "Documents"), "/home/wisnu/Documents");
        assert_eq!(normalize_path("/", "tmp"), "/tmp");
    }

    #[test]
    fn dotdot_pops() {
        assert_eq!(normalize_path("/home/wisnu", ".."), "/home");
        assert_eq!(
            normalize_path("/home/wisnu/Music", "../Documents/readme.txt"),
            "/home/wisnu/Documents/readme.txt"
        );
    }

    #[test]
    fn dotdot_at_root_stays() {
        assert_eq!(normalize_path("/", ".."), "/");
        assert_eq!(normalize_path("/", "../../etc"), "/etc");
    }

    #[test]
    fn dot_and_repeated_slashes() {
        assert_eq!(normalize_path("/home", "./wisnu//Documents/"), "/home/wisnu/Documents");
    }

    #[test]
    fn parent_and_name() {
        assert_eq!(parent("/home/wisnu"), "/home");
        assert_eq!(parent("/home"), "/");
        assert_eq!(parent("/"), "/");
        assert_eq!(file_name("/home/wisnu"), "wisnu");
        assert_eq!(file_name("/"), "");
    }

    #[test]
    fn within_checks_whole_segments() {
        assert!(is_within("/tmp", "/"));
        assert!(is_within("/", "/"));
        assert!(is_within("/home/wisnu", "/home/wisnu"));
        assert!(is_within("/home/wisnu/Music", "/home/wisnu"));
        assert!(!is_within("/home/wisnuX", "/home/wisnu"));
        assert!(!is_within("/home", "/home/wisnu"));
    }

    #[test]
    fn components_skip_empty() {
        let segs: Vec<&str> = components("/usr//bin/").collect();
        assert_eq!(segs, vec!["usr", "bin"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(cwd in "/[a-z/]{0,20}", path in "[a-z./]{0,30}") {
                let once = normalize_path(&cwd, &path);
                let twice = normalize_path("/", &once);
                prop_assert_eq!(&once, &twice);
            }

            #[test]
            fn normalized_is_absolute_and_clean(cwd in "/[a-z/]{0,20}", path in "[a-z./]{0,30}") {
                let normed = normalize_path(&cwd, &path);
                prop_assert!(normed.starts_with('/'));
                prop_assert!(!normed.contains("//"));
                prop_assert!(normed == "/" || !normed.ends_with('/'));
                prop_assert!(components(&normed).all(|c| c != "." && c != ".."));
            }
        }
    }
}
