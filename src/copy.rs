use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Resolves `dest` under `root`, refusing anything that would land outside it.
pub fn destination(root: &Path, dest: &Path) -> Result<PathBuf> {
    let inside = dest.components().next().is_some()
        && dest
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !inside {
        return Err(Error::InvalidDestination(dest.to_path_buf()));
    }
    Ok(root.join(dest))
}

pub fn check_source(src: &Path) -> Result<()> {
    match fs::metadata(src) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(Error::SourceNotAFile(src.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::MissingSource(src.to_path_buf())),
        Err(e) => Err(Error::io(src, e)),
    }
}

/// Copies the note bytes unmodified, creating parent directories as needed.
pub fn copy_note(src: &Path, root: &Path, dest: &Path) -> Result<PathBuf> {
    check_source(src)?;
    let target = destination(root, dest)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let bytes = fs::copy(src, &target).map_err(|e| Error::io(&target, e))?;
    debug!(src = %src.display(), dest = %target.display(), bytes, "note copied");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    macro_rules! destination_tests {
        ($($name:ident $dest:expr => $ok:expr)*) => {
            $(
                #[test]
                fn $name() {
                    let result = destination(Path::new("/site"), Path::new($dest));
                    assert_eq!($ok, result.is_ok(), "{}: {:?}", $dest, result);
                }
            )*
        }
    }

    destination_tests! {
        nested_relative "notes/a.html" => true
        plain_file "a.html" => true
        dot_prefix "./notes/a.html" => true
        absolute "/etc/passwd" => false
        parent_escape "../outside.html" => false
        inner_parent "notes/../../outside.html" => false
        empty "" => false
    }

    #[test]
    fn copy_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("note.bin");
        let bytes: Vec<u8> = (0..=255).chain([0xff, 0xfe, 0x00, b'\r', b'\n']).collect();
        fs::write(&src, &bytes).unwrap();

        let root = dir.path().join("site");
        fs::create_dir(&root).unwrap();
        let target = copy_note(&src, &root, Path::new("notes/deep/note.bin")).unwrap();

        assert_eq!(target, root.join("notes/deep/note.bin"));
        assert_eq!(fs::read(target).unwrap(), bytes);
    }

    #[test]
    fn missing_source_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_note(&dir.path().join("nope.html"), dir.path(), Path::new("notes/a.html"));
        assert!(matches!(result, Err(Error::MissingSource(_))));
        assert!(!dir.path().join("notes").exists());
    }

    #[test]
    fn directory_source_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_source(dir.path());
        assert!(matches!(result, Err(Error::SourceNotAFile(_))), "{result:?}");
    }
}
