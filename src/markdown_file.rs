use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    document::Document,
    error::{Error, Result},
};

/// The README on disk, along with the text it held when it was loaded.
pub struct File {
    path: PathBuf,
    pub content: String,
}

impl File {
    /// A missing file reads as empty text.
    pub fn at_path(path: PathBuf) -> Result<Self> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "readme missing, starting from empty text");
                String::new()
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> Document {
        Document::new(self.content.as_str())
    }

    pub fn is_changed_by(&self, document: &Document) -> bool {
        self.content != document.as_str()
    }

    /// Writes the document back, unless it matches what was loaded.
    /// Returns whether anything was written.
    pub fn store(self, document: &Document) -> Result<bool> {
        if !self.is_changed_by(document) {
            debug!(path = %self.path.display(), "readme unchanged, skipping write");
            return Ok(false);
        }
        self.atomic_overwrite(document.as_str())?;
        Ok(true)
    }

    pub fn atomic_overwrite(self, content: &str) -> Result<()> {
        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp.md");
        fs::write(&tmp_path, content).map_err(|e| Error::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = content.len(), "readme written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::at_path(dir.path().join("README.md")).unwrap();
        assert_eq!(file.content, "");
        assert_eq!(file.document(), Document::default());
    }

    #[test]
    fn store_writes_only_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Site\n").unwrap();

        let file = File::at_path(path.clone()).unwrap();
        let doc = file.document();
        assert!(!file.store(&doc).unwrap());

        let file = File::at_path(path.clone()).unwrap();
        let mut doc = file.document();
        assert!(doc.ensure_sections());
        assert!(file.store(&doc).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), doc.as_str());
        assert!(!dir.path().join("README.tmp.md").exists());
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as text
        match File::at_path(dir.path().to_path_buf()) {
            Err(Error::Io { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("expected an io error, got {:?}", other.map(|f| f.content)),
        }
    }
}
