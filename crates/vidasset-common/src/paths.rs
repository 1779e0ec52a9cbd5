//! Path utilities for file references.
//!
//! A file reference is either a remote URL (`http://` / `https://`) or a local
//! filesystem path. These helpers classify references, turn decoded URL paths
//! into safe relative fragments, and express local paths relative to a base
//! directory.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Characters stripped from every path segment of a remote fragment.
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '\\', '|', '?', '*'];

/// Check if a file reference points at a remote URL.
///
/// # Examples
///
/// ```
/// use vidasset_common::paths::is_remote;
///
/// assert!(is_remote("https://example.com/video.mp4"));
/// assert!(is_remote("HTTP://example.com/video.mp4"));
/// assert!(!is_remote("videos/intro.mp4"));
/// assert!(!is_remote("ftp://example.com/video.mp4"));
/// ```
pub fn is_remote(file_ref: &str) -> bool {
    let lower = file_ref
        .get(..8)
        .map(|prefix| prefix.to_ascii_lowercase())
        .unwrap_or_else(|| file_ref.to_ascii_lowercase());
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Percent-decode a URL component once, replacing invalid UTF-8 sequences.
///
/// # Examples
///
/// ```
/// use vidasset_common::paths::percent_decode;
///
/// assert_eq!(percent_decode("a%20b.mp4"), "a b.mp4");
/// assert_eq!(percent_decode("100%25"), "100%");
/// ```
pub fn percent_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Sanitize a decoded path into a safe relative fragment.
///
/// Segments are split on `/` and `\`. Control characters and characters that
/// are illegal in file names on common platforms are removed. Empty, `.` and
/// `..` segments are dropped, so the result can never climb out of the folder
/// it is joined under.
///
/// # Examples
///
/// ```
/// use vidasset_common::paths::sanitize_path_fragment;
///
/// assert_eq!(sanitize_path_fragment("example.com/a b.mp4"), "example.com/a b.mp4");
/// assert_eq!(sanitize_path_fragment("host/../../etc/passwd"), "host/etc/passwd");
/// assert_eq!(sanitize_path_fragment("host//x?.mp4"), "host/x.mp4");
/// ```
pub fn sanitize_path_fragment(path: &str) -> String {
    path.split(['/', '\\'])
        .map(|segment| {
            segment
                .chars()
                .filter(|c| !c.is_control() && !UNSAFE_CHARS.contains(c))
                .collect::<String>()
        })
        .filter(|segment| !segment.is_empty() && segment != "." && segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Express `path` relative to `base`.
///
/// Relative inputs are first resolved against `base`. Both sides are
/// normalized lexically (no filesystem access), so `./a/../b` and `b` yield
/// the same result. Paths outside `base` produce leading `..` components.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use vidasset_common::paths::relative_to;
///
/// let base = Path::new("/srv/app");
/// assert_eq!(relative_to(base, Path::new("/srv/app/videos/a.mp4")), PathBuf::from("videos/a.mp4"));
/// assert_eq!(relative_to(base, Path::new("./videos/a.mp4")), PathBuf::from("videos/a.mp4"));
/// assert_eq!(relative_to(base, Path::new("/srv/other/a.mp4")), PathBuf::from("../other/a.mp4"));
/// ```
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    };
    let base = normalize(base);

    let target: Vec<Component<'_>> = absolute.components().collect();
    let origin: Vec<Component<'_>> = base.components().collect();

    let shared = target
        .iter()
        .zip(origin.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..origin.len() {
        relative.push("..");
    }
    for component in &target[shared..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
