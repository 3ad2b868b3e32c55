//! The `restore` verb: delete an overlay file and remount `/` read-only
//! so the appliance falls back to its ROM-shipped default on next read.
//!
//! This is the one verb with host-specific side effects outside the
//! document model (spec.md §1 calls it "a `unlink` + `mount -o remount /`
//! shell-out"), so it bypasses `jct-resolve` and `jct-io`'s atomic-write
//! discipline entirely: there is no document to parse, merge, or replace,
//! only an overlay file to remove.
//!
//! The ROM-default copy an overlayfs-rooted appliance ships is assumed to
//! live at the same path under `/rom`, the conventional lower-dir mount
//! point for this class of firmware (e.g. an overlay file at
//! `/etc/prudynt.json` has its ROM default at `/rom/etc/prudynt.json`).
//! This convention is a decision recorded in DESIGN.md, not stated
//! verbatim in spec.md.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

/// Runs the `restore` verb against `target`, returning the process exit
/// code per spec.md §6's restore-specific table (1: no ROM source, 2: no
/// overlay, 3: unlink failed, 4: remount failed, 5: bad arguments).
///
/// Each fallible step is wrapped in `anyhow::Context` for a readable
/// diagnostic — `anyhow` is used only here, for `std::io::Error`/
/// `Command` spawn failures, never inside the typed-`JctError` core
/// crates.
pub fn run(target: &str) -> u8 {
    let overlay = Path::new(target);
    if !overlay.is_absolute() {
        eprintln!("jct: restore requires an absolute path, got '{target}'");
        return 5;
    }

    let rom_source = rom_default_path(overlay);
    if !rom_source.is_file() {
        eprintln!(
            "jct: no ROM-default source at '{}'; nothing to restore to",
            rom_source.display()
        );
        return 1;
    }

    if !overlay.is_file() {
        eprintln!(
            "jct: no overlay file at '{}'; nothing to restore",
            overlay.display()
        );
        return 2;
    }

    if let Err(e) = unlink(overlay) {
        eprintln!("jct: {e:#}");
        return 3;
    }

    if let Err(e) = remount_root() {
        eprintln!("jct: {e:#}");
        return 4;
    }

    0
}

fn unlink(overlay: &Path) -> anyhow::Result<()> {
    std::fs::remove_file(overlay)
        .with_context(|| format!("failed to unlink '{}'", overlay.display()))
}

fn remount_root() -> anyhow::Result<()> {
    let status = Command::new("mount")
        .args(["-o", "remount", "/"])
        .status()
        .context("failed to run 'mount -o remount /'")?;
    anyhow::ensure!(status.success(), "'mount -o remount /' exited with {status}");
    Ok(())
}

fn rom_default_path(overlay: &Path) -> PathBuf {
    let relative = overlay
        .strip_prefix("/")
        .expect("overlay is checked absolute before this is called");
    Path::new("/rom").join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_target() {
        assert_eq!(run("relative/path.json"), 5);
    }

    #[test]
    fn rom_default_path_mirrors_overlay_under_rom() {
        assert_eq!(
            rom_default_path(Path::new("/etc/prudynt.json")),
            PathBuf::from("/rom/etc/prudynt.json")
        );
    }

    #[test]
    fn missing_rom_source_fails_with_code_one() {
        // "/nonexistent-jct-test-prefix" is vanishingly unlikely to exist,
        // so its mirrored ROM path under `/rom` never exists either.
        assert_eq!(run("/nonexistent-jct-test-prefix/doc.json"), 1);
    }
}
