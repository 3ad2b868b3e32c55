#![doc = include_str!("../README.md")]

use std::path::{Path, PathBuf};

use jct_error::{JctError, JctResult};

/// The CLI verb driving resolution, since `create` and `set` differ from
/// the read-only verbs in whether a short name may be used and whether a
/// missing file is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Set,
    Create,
    Print,
    Path,
}

/// Resolve `target` to a concrete file path for `verb`.
///
/// An explicit path (contains `/` or `\`, or ends in `.json`) is accepted
/// or rejected according to the verb's policy without any candidate
/// search. A short name is probed against the ordered candidate list;
/// `Verb::Create` never accepts a short name.
///
/// # Errors
///
/// Returns [`JctError::BadInput`] if the verb requires an explicit path
/// and a short name was given, [`JctError::NotFound`] if a required file
/// doesn't exist or no candidate resolves, and
/// [`JctError::PermissionDenied`] if the first existing candidate is an
/// unreadable regular file.
pub fn resolve(target: &str, verb: Verb, trace: bool) -> JctResult<PathBuf> {
    if is_explicit_path(target) {
        return resolve_explicit(target, verb);
    }

    if verb == Verb::Create {
        return Err(JctError::BadInput(format!(
            "'create' requires an explicit path; supply './{target}.json' instead of a short name"
        )));
    }

    resolve_short_name(target, verb, trace)
}

fn is_explicit_path(target: &str) -> bool {
    target.contains('/') || target.contains('\\') || target.ends_with(".json")
}

fn resolve_explicit(target: &str, verb: Verb) -> JctResult<PathBuf> {
    let path = PathBuf::from(target);
    match verb {
        Verb::Create | Verb::Set => Ok(path),
        Verb::Get | Verb::Print | Verb::Path => {
            if path.is_file() {
                Ok(path)
            } else {
                Err(JctError::NotFound(format!(
                    "'{target}' does not exist or is not a regular file"
                )))
            }
        }
    }
}

fn candidates(name: &str) -> Vec<PathBuf> {
    let mut out = vec![PathBuf::from(format!("./{name}")), PathBuf::from(format!("./{name}.json"))];
    if cfg!(unix) {
        out.push(PathBuf::from(format!("/etc/{name}.json")));
    }
    out
}

fn resolve_short_name(name: &str, verb: Verb, trace: bool) -> JctResult<PathBuf> {
    let tried = candidates(name);

    for candidate in &tried {
        if trace {
            eprintln!("[trace] probing {}", candidate.display());
        }
        tracing::debug!(candidate = %candidate.display(), "probing short-name candidate");

        match probe(candidate) {
            ProbeResult::Missing => continue,
            ProbeResult::NotARegularFile => continue,
            ProbeResult::Unreadable => {
                return Err(JctError::PermissionDenied(format!(
                    "'{}' exists but is not readable",
                    candidate.display()
                )));
            }
            ProbeResult::Readable => return Ok(candidate.clone()),
        }
    }

    if verb == Verb::Set {
        return Err(JctError::NotFound(format!(
            "short name '{name}' does not resolve to an existing file; 'set' never creates \
             from a short name — supply an explicit path to create one"
        )));
    }

    let tried_list = tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(JctError::NotFound(format!(
        "short name '{name}' did not resolve; tried: {tried_list}"
    )))
}

enum ProbeResult {
    Missing,
    NotARegularFile,
    Unreadable,
    Readable,
}

/// Follows symlinks (via `Path::metadata`, which is symlink-transparent)
/// to classify a single candidate.
fn probe(path: &Path) -> ProbeResult {
    let metadata = match path.metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ProbeResult::Missing,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return ProbeResult::Unreadable;
        }
        Err(_) => return ProbeResult::Missing,
    };

    if !metadata.is_file() {
        return ProbeResult::NotARegularFile;
    }

    match std::fs::File::open(path) {
        Ok(_) => ProbeResult::Readable,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => ProbeResult::Unreadable,
        Err(_) => ProbeResult::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Mutex;

    /// Tests that change the process's current directory must not run
    /// concurrently with each other.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_path_with_separator_is_not_searched() {
        assert!(is_explicit_path("./foo"));
        assert!(is_explicit_path("a/b"));
        assert!(is_explicit_path("a.json"));
        assert!(!is_explicit_path("prudynt"));
    }

    #[test]
    fn create_rejects_short_names() {
        let err = resolve("prudynt", Verb::Create, false).unwrap_err();
        assert!(matches!(err, JctError::BadInput(_)));
    }

    #[test]
    fn create_accepts_explicit_path_even_if_missing() {
        let result = resolve("./does-not-exist.json", Verb::Create, false);
        assert!(result.is_ok());
    }

    #[test]
    fn get_on_missing_explicit_path_is_not_found() {
        let err = resolve("./definitely-missing-xyz.json", Verb::Get, false).unwrap_err();
        assert!(matches!(err, JctError::NotFound(_)));
    }

    #[test]
    fn resolves_short_name_by_precedence() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let bare = dir.path().join("prudynt");
        let json = dir.path().join("prudynt.json");
        std::fs::write(&bare, "{}").unwrap();
        std::fs::write(&json, "{}").unwrap();

        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let resolved = resolve("prudynt", Verb::Get, false).unwrap();
        std::env::set_current_dir(cwd).unwrap();

        assert_eq!(resolved, PathBuf::from("./prudynt"));
    }

    #[test]
    fn permission_denied_halts_before_later_candidates() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let bare = dir.path().join("prudynt");
        let json = dir.path().join("prudynt.json");
        let mut f = std::fs::File::create(&bare).unwrap();
        f.write_all(b"{}").unwrap();
        f.set_permissions(std::fs::Permissions::from_mode(0o000)).unwrap();
        std::fs::write(&json, "{}").unwrap();

        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = resolve("prudynt", Verb::Get, false);
        std::env::set_current_dir(cwd).unwrap();

        if std::fs::File::open(&bare).is_ok() {
            // Running as root (or on a filesystem that ignores the mode
            // bits): permission denial can't be exercised here.
            return;
        }
        assert!(matches!(result, Err(JctError::PermissionDenied(_))));
    }
}
