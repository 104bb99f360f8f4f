//! Turning a script reference into a short display string.
//!
//! Server hosts get paths relative to a [`ReferenceBase`]. Browser-like
//! hosts get the bare file name of the URL, since there is no directory to
//! be relative to. Normalization never fails: anything that cannot be
//! resolved is displayed as reported.

use std::path::{Component, Path, PathBuf};

use core_types::ResolveError;
use url::Url;

use crate::probe::EnvironmentKind;

/// The directory relative paths are computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceBase {
    dir: PathBuf,
}

impl ReferenceBase {
    /// Use a working directory as the base.
    pub fn working_dir(dir: impl Into<PathBuf>) -> Self {
        ReferenceBase { dir: dir.into() }
    }

    /// Use the directory containing a module, given as a `file:` URL or an
    /// absolute path.
    pub fn module_dir(module: &str) -> Result<Self, ResolveError> {
        let path = to_file_path(module)?.ok_or_else(|| ResolveError::PathResolution {
            file: module.to_string(),
            reason: "not a local module".to_string(),
        })?;
        let dir = path.parent().ok_or_else(|| ResolveError::PathResolution {
            file: module.to_string(),
            reason: "module has no parent directory".to_string(),
        })?;
        Ok(ReferenceBase::working_dir(dir))
    }

    /// The base directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Produce the display form of `file` for a host of the given kind.
///
/// ```
/// use dbg::normalize::{normalize, ReferenceBase};
/// use dbg::probe::EnvironmentKind;
///
/// # #[cfg(unix)] {
/// let base = ReferenceBase::working_dir("/home/me/project");
/// let shown = normalize("file:///home/me/project/src/app.ts", EnvironmentKind::ServerStackOnly, Some(&base));
/// assert_eq!(shown, "src/app.ts");
/// # }
///
/// let shown = normalize("https://example.com/js/app.js?v=2#top", EnvironmentKind::BrowserLike, None);
/// assert_eq!(shown, "app.js");
/// ```
pub fn normalize(file: &str, kind: EnvironmentKind, base: Option<&ReferenceBase>) -> String {
    if !kind.supports_relative_paths() {
        return display_name(file).to_string();
    }

    let Some(base) = base else {
        return file.to_string();
    };

    match relative_display(file, base) {
        Ok(Some(relative)) => relative,
        Ok(None) => file.to_string(),
        Err(err) => {
            log::debug!("dbg: keeping raw file reference: {}", err);
            file.to_string()
        }
    }
}

/// The final path segment of a URL, without query or fragment.
///
/// Falls back to the whole reference when the segment would be empty.
pub fn display_name(file: &str) -> &str {
    let end = file.find(|c| c == '?' || c == '#').unwrap_or(file.len());
    let without_query = &file[..end];
    match without_query.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => file,
    }
}

fn relative_display(file: &str, base: &ReferenceBase) -> Result<Option<String>, ResolveError> {
    let Some(path) = to_file_path(file)? else {
        return Ok(None);
    };
    let shown = relative_path(&path, base.dir()).unwrap_or(path);
    Ok(Some(shown.display().to_string()))
}

/// `file:` URLs and absolute paths map to a filesystem path; relative paths
/// and other schemes (`https:`, `node:`, `ext:`) are not local files.
fn to_file_path(file: &str) -> Result<Option<PathBuf>, ResolveError> {
    let failure = |reason: String| ResolveError::PathResolution {
        file: file.to_string(),
        reason,
    };

    if file.starts_with("file:") {
        let url = Url::parse(file).map_err(|e| failure(e.to_string()))?;
        return url
            .to_file_path()
            .map(Some)
            .map_err(|()| failure("URL does not name a local file".to_string()));
    }

    if has_url_scheme(file) {
        return Ok(None);
    }

    let path = Path::new(file);
    Ok(path.is_absolute().then(|| path.to_path_buf()))
}

/// A scheme needs at least two characters, so `C:\dir` stays a path.
fn has_url_scheme(file: &str) -> bool {
    match file.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Lexical relative path from `base` to `path`. `None` when the two do not
/// share a root, e.g. different drives or a relative base.
fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    let path = lexical_components(path);
    let base = lexical_components(base);

    let common = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

fn lexical_components(path: &Path) -> Vec<Component<'_>> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir
                if matches!(components.last(), Some(Component::Normal(_))) =>
            {
                components.pop();
            }
            other => components.push(other),
        }
    }
    components
}
