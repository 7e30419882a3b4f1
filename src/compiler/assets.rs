//! Static assets.
//!
//! `public/` is mirrored into the output tree with hard links, so images
//! and stylesheets cost no extra disk space and no copying time.

use crate::{
    error::{Error, IoContext, Result},
    log,
};
use std::{fs, io, path::Path};
use walkdir::WalkDir;

/// Files never published
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Hard-link every file under `src` into the same relative location
/// under `dest`. Returns the number of files linked.
///
/// A missing `src` links nothing. `dest` must not already contain the
/// files (the output tree is recreated before every build).
pub fn link_static_files(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        log!("assets"; "no {} directory, skipping", src.display());
        return Ok(0);
    }

    let mut linked = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Filesystem {
            action: "failed to walk",
            path: src.to_path_buf(),
            source: io::Error::from(err),
        })?;

        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }

        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).fs_context("failed to create directory", &target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).fs_context("failed to create directory", parent)?;
        }
        fs::hard_link(entry.path(), &target).fs_context("failed to link", &target)?;
        linked += 1;
    }

    log!("assets"; "linked {} files from {}", linked, src.display());
    Ok(linked)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::MetadataExt;
    use tempfile::TempDir;

    #[test]
    fn test_links_nested_tree() {
        let root = TempDir::new().unwrap();
        let public = root.path().join("public");
        let out = root.path().join("static");
        fs::create_dir_all(public.join("css/fonts")).unwrap();
        fs::write(public.join("favicon.ico"), "ico").unwrap();
        fs::write(public.join("css/site.css"), "body{}").unwrap();
        fs::write(public.join("css/fonts/a.woff2"), "font").unwrap();
        fs::write(public.join(".DS_Store"), "junk").unwrap();
        fs::create_dir(&out).unwrap();

        assert_eq!(link_static_files(&public, &out).unwrap(), 3);

        assert_eq!(fs::read_to_string(out.join("css/site.css")).unwrap(), "body{}");
        assert!(out.join("css/fonts/a.woff2").is_file());
        assert!(!out.join(".DS_Store").exists());

        let src_ino = fs::metadata(public.join("favicon.ico")).unwrap().ino();
        let dst_ino = fs::metadata(out.join("favicon.ico")).unwrap().ino();
        assert_eq!(src_ino, dst_ino);
    }

    #[test]
    fn test_empty_subdirectories_are_created() {
        let root = TempDir::new().unwrap();
        let public = root.path().join("public");
        fs::create_dir_all(public.join("empty")).unwrap();
        let out = root.path().join("static");

        link_static_files(&public, &out).unwrap();
        assert!(out.join("empty").is_dir());
    }

    #[test]
    fn test_missing_public_dir() {
        let root = TempDir::new().unwrap();
        let linked = link_static_files(&root.path().join("public"), &root.path().join("static")).unwrap();
        assert_eq!(linked, 0);
    }

    #[test]
    fn test_existing_target_is_fatal() {
        let root = TempDir::new().unwrap();
        let public = root.path().join("public");
        let out = root.path().join("static");
        fs::create_dir_all(&public).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(public.join("a.txt"), "a").unwrap();
        fs::write(out.join("a.txt"), "stale").unwrap();

        let err = link_static_files(&public, &out).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
