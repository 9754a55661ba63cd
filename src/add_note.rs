//! One invocation of the tool: copy a note into the site and record it in
//! the readme.
//!
//! Everything that is read or checked happens before anything is touched, so
//! a missing source, a bad destination, or an unreadable readme or concept
//! file leaves both the tree and the readme as they were. The note copy and
//! the single readme write are the only mutations.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    copy::{check_source, copy_note, destination},
    diff::diff,
    document::{ConceptEntry, NotesEntry},
    error::{Error, Result},
    markdown_file,
};

#[derive(Debug, Clone)]
pub struct Request {
    pub src: PathBuf,
    /// Relative to `root`; also the link target written into the readme.
    pub dest: PathBuf,
    pub title: String,
    pub concept_file: Option<PathBuf>,
    pub root: PathBuf,
    /// Relative to `root`.
    pub readme: PathBuf,
    pub date: NaiveDate,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptOutcome {
    NotRequested,
    Appended,
    Missing(PathBuf),
}

#[derive(Debug)]
pub struct Outcome {
    pub copied_to: PathBuf,
    pub readme: PathBuf,
    pub concept: ConceptOutcome,
    pub readme_written: bool,
    /// Filled in on dry runs only.
    pub preview: Option<String>,
}

fn read_concept(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

pub fn add_note(request: &Request) -> Result<Outcome> {
    check_source(&request.src)?;
    let target = destination(&request.root, &request.dest)?;
    let link = request.dest.to_string_lossy().replace('\\', "/");

    let readme = markdown_file::File::at_path(request.root.join(&request.readme))?;
    let readme_path = readme.path().to_path_buf();
    let concept_body = match &request.concept_file {
        Some(path) => read_concept(path)?,
        None => None,
    };

    let mut document = readme.document();
    document.ensure_sections();
    if document.lists_path(&link) {
        warn!(path = %link, "readme already lists this path, adding another entry");
    }
    document.append_notes_entry(&NotesEntry {
        title: request.title.clone(),
        path: link,
        date: request.date,
    });

    let concept = match (&request.concept_file, concept_body) {
        (None, _) => ConceptOutcome::NotRequested,
        (Some(_), Some(body)) => {
            document.append_concept_block(&ConceptEntry {
                title: request.title.clone(),
                body,
            });
            ConceptOutcome::Appended
        }
        (Some(path), None) => {
            warn!("{}", Error::MissingConceptFile(path.clone()));
            ConceptOutcome::Missing(path.clone())
        }
    };

    if request.dry_run {
        return Ok(Outcome {
            copied_to: target,
            readme: readme_path,
            concept,
            readme_written: false,
            preview: Some(diff(&readme.content, document.as_str())),
        });
    }

    copy_note(&request.src, &request.root, &request.dest)?;
    info!(src = %request.src.display(), dest = %target.display(), "copied note");
    let readme_written = readme.store(&document)?;

    Ok(Outcome {
        copied_to: target,
        readme: readme_path,
        concept,
        readme_written,
        preview: None,
    })
}
