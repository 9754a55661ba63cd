//! Marker-anchored editing of the site README.
//!
//! The README carries two append-only lists, each anchored by an HTML comment
//! that never changes once written. Entries are spliced in directly after the
//! marker, so the newest entry is always the first line below it.

use std::fmt;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NOTES_ENTRY: Regex =
        Regex::new(r"(?m)^- \[(?P<title>.*)\]\((?P<path>[^)]*)\) — (?P<date>\d{4}-\d{2}-\d{2})$")
            .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Notes,
    Concepts,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Notes, Section::Concepts];

    pub fn marker(self) -> &'static str {
        match self {
            Section::Notes => "<!-- NOTES_LIST -->",
            Section::Concepts => "<!-- CONCEPTS -->",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Notes => "## Notes",
            Section::Concepts => "## Concepts",
        }
    }
}

/// One line of the Notes list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEntry {
    pub title: String,
    pub path: String,
    pub date: NaiveDate,
}

impl fmt::Display for NotesEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "- [{}]({}) — {}", self.title, self.path, self.date.format("%Y-%m-%d"))
    }
}

/// A titled block under Concepts. The body is reproduced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptEntry {
    pub title: String,
    pub body: String,
}

impl fmt::Display for ConceptEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "### {}\n\n{}\n\n", self.title, self.body)
    }
}

#[derive(Clone, Copy)]
struct Position {
    at: usize,
}

impl Position {
    fn after_marker(text: &str, section: Section) -> Option<Self> {
        let marker = section.marker();
        text.find(marker).map(|start| Self {
            at: start + marker.len(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.text.contains(section.marker())
    }

    /// Appends a header and marker for every section that is missing one.
    /// Returns whether the text changed; a second call is always a no-op.
    pub fn ensure_sections(&mut self) -> bool {
        let mut changed = false;
        for section in Section::ALL {
            if !self.has_section(section) {
                self.text.push_str("\n\n");
                self.text.push_str(section.heading());
                self.text.push_str("\n\n");
                self.text.push_str(section.marker());
                self.text.push('\n');
                changed = true;
            }
        }
        changed
    }

    pub fn append_notes_entry(&mut self, entry: &NotesEntry) {
        self.insert(Section::Notes, &entry.to_string());
    }

    pub fn append_concept_block(&mut self, entry: &ConceptEntry) {
        self.insert(Section::Concepts, &entry.to_string());
    }

    fn insert(&mut self, section: Section, content: &str) {
        match Position::after_marker(&self.text, section) {
            Some(position) => {
                let mut spliced = String::with_capacity(self.text.len() + content.len() + 1);
                spliced.push_str(&self.text[..position.at]);
                spliced.push('\n');
                spliced.push_str(content);
                spliced.push_str(&self.text[position.at..]);
                self.text = spliced;
            }
            // no marker to anchor on, so the section is started without one
            None => {
                self.text.push('\n');
                self.text.push_str(section.heading());
                self.text.push_str("\n\n");
                self.text.push_str(content);
            }
        }
    }

    /// Every line of the document that reads as a Notes entry, top to bottom.
    pub fn notes_entries(&self) -> impl Iterator<Item = NotesEntry> + '_ {
        NOTES_ENTRY.captures_iter(&self.text).filter_map(|c| {
            Some(NotesEntry {
                title: c["title"].to_string(),
                path: c["path"].to_string(),
                date: c["date"].parse().ok()?,
            })
        })
    }

    pub fn lists_path(&self, path: &str) -> bool {
        self.notes_entries().any(|e| e.path == path)
    }
}
