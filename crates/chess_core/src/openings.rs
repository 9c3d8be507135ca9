//! Opening-book lookup over a TSV table.
//!
//! The table format is `eco<TAB>name<TAB>moves` per line, where `moves` is
//! the space-joined move text of the line. Lookup walks the table in file
//! order and returns the first entry whose move text is a prefix of the
//! moves played so far, so a table listing deeper lines before their parent
//! openings reports the deeper name.

use log::debug;

#[derive(Clone, Debug)]
pub struct OpeningEntry {
    pub eco: String,
    pub name: String,
    pub moves: String,
}

#[derive(Clone, Debug, Default)]
pub struct OpeningBook {
    entries: Vec<OpeningEntry>,
}

impl OpeningBook {
    /// Parses the table, keeping row order. Rows with missing columns or an
    /// empty name or move list are skipped rather than rejected; a partly
    /// usable table beats none.
    pub fn from_tsv(table: &str) -> OpeningBook {
        let mut entries = Vec::new();
        for line in table.lines() {
            let line = line.trim_end_matches('\r');
            let mut cols = line.split('\t');
            let (eco, name, moves) = match (cols.next(), cols.next(), cols.next()) {
                (Some(eco), Some(name), Some(moves)) => (eco, name, moves),
                _ => continue,
            };
            if name.is_empty() || moves.is_empty() {
                continue;
            }
            entries.push(OpeningEntry {
                eco: eco.to_string(),
                name: name.to_string(),
                moves: moves.to_string(),
            });
        }
        debug!("opening book holds {} lines", entries.len());
        OpeningBook { entries }
    }

    /// Name of the first entry whose move text prefixes `played`
    /// (space-joined move history). `None` when no line matches.
    pub fn lookup(&self, played: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| played.starts_with(&entry.moves))
            .map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "openings_tests.rs"]
mod openings_tests;
