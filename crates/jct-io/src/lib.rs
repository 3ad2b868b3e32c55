#![doc = include_str!("../README.md")]

use std::io::Write as _;
use std::path::Path;

use jct_codec::SerializeMode;
use jct_error::{JctError, JctResult};
use jct_value::JsonValue;

/// Read and parse a document from `path`.
///
/// If the file fails to parse, this returns an empty object rather than
/// an error — a permissive legacy behavior preserved for compatibility
/// with documents written by older tooling. The failure is still logged.
///
/// # Errors
///
/// Returns [`JctError::IoFailure`] if the file can't be read, and
/// [`JctError::BadInput`] if its bytes aren't valid UTF-8.
pub fn read_document(path: &Path) -> JctResult<JsonValue> {
    let bytes = std::fs::read(path)
        .map_err(|e| JctError::IoFailure(format!("reading {}: {e}", path.display())))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| JctError::BadInput(format!("{} is not valid UTF-8: {e}", path.display())))?;

    match jct_codec::parse(&text) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "document failed to parse; returning an empty object"
            );
            Ok(JsonValue::object())
        }
    }
}

/// Serialize `value` as canonical pretty JSON with a trailing newline and
/// write it atomically to `path`.
///
/// # Errors
///
/// Returns [`JctError::IoFailure`] on any underlying I/O failure.
pub fn write_document(path: &Path, value: &JsonValue) -> JctResult<()> {
    let mut text = jct_codec::serialize(value, SerializeMode::Pretty);
    text.push('\n');
    write_atomic(path, text.as_bytes())
}

/// Write `contents` to `path` by creating a sibling temp file, flushing
/// and closing it, then renaming it into place. If the rename fails
/// because the temp file and destination are on different devices, falls
/// back to a stream copy followed by unlinking the temp file. The
/// destination is never left truncated by a partial write: on any
/// failure the temp file is removed and the error reported.
///
/// # Errors
///
/// Returns [`JctError::IoFailure`] if the temp file can't be created,
/// written, or put in place (by rename or fallback copy).
pub fn write_atomic(path: &Path, contents: &[u8]) -> JctResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".jct-tmp-")
        .tempfile_in(dir)
        .map_err(|e| JctError::IoFailure(format!("creating temp file in {}: {e}", dir.display())))?;

    tmp.write_all(contents)
        .map_err(|e| JctError::IoFailure(format!("writing temp file: {e}")))?;
    tmp.flush()
        .map_err(|e| JctError::IoFailure(format!("flushing temp file: {e}")))?;

    match tmp.persist(path) {
        Ok(_file) => Ok(()),
        Err(persist_err) => fall_back_to_copy(persist_err, path),
    }
}

fn fall_back_to_copy(persist_err: tempfile::PersistError, path: &Path) -> JctResult<()> {
    let tempfile::PersistError { file: named, error } = persist_err;
    let copy_result = std::fs::copy(named.path(), path);
    let cleanup_result = named.close();

    match copy_result {
        Ok(_) => {
            if let Err(cleanup_err) = cleanup_result {
                tracing::warn!(
                    error = %cleanup_err,
                    "failed to remove leftover temp file after cross-device fallback copy"
                );
            }
            Ok(())
        }
        Err(copy_err) => Err(JctError::IoFailure(format!(
            "atomic rename to {} failed ({error}) and fallback copy also failed: {copy_err}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_value::JsonObject;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let mut obj = JsonObject::new();
        obj.insert("a", JsonValue::number(1.0));
        write_document(&path, &JsonValue::Object(obj)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}\n");

        let loaded = read_document(&path).unwrap();
        assert_eq!(loaded, jct_codec::parse("{\"a\":1}").unwrap());
    }

    #[test]
    fn write_atomic_leaves_no_stray_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_atomic(&path, b"{}").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("doc.json")]);
    }

    #[test]
    fn read_document_on_malformed_file_returns_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ this is not json ]").unwrap();

        let loaded = read_document(&path).unwrap();
        assert_eq!(loaded, JsonValue::object());
    }

    #[test]
    fn read_document_on_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(read_document(&path), Err(JctError::IoFailure(_))));
    }
}
