//! Sort lines of text by their URL sort keys
//!
//! ```
//! use urlsort::key::KeyMaker;
//! use urlsort::port::StaticServices;
//! use urlsort::sort::SortConfig;
//! let maker = KeyMaker::with_services(StaticServices::empty());
//! let lines = vec![b"https://z.com".to_vec(), b"http://a.com".to_vec()];
//! let sorted = SortConfig::default().sort_lines(&maker, lines);
//! assert_eq!(sorted[0].original, b"http://a.com");
//! assert_eq!(sorted[1].original, b"https://z.com");
//! ```

use crate::comp::{Comp, comp_check};
use crate::key::{KeyMaker, SortKey};
use crate::port::ServiceLookup;
use crate::err;
use crate::util::{Error, Result, collect_lines, get_writer, prerr, write_line};
use std::io::Write;

/// One line of input and its sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// the line exactly as read, without the newline
    pub original: Vec<u8>,
    /// key derived from `original`
    pub key: SortKey,
}

impl Entry {
    /// new Entry, extracting the key from the line
    pub fn new<S: ServiceLookup>(original: Vec<u8>, maker: &KeyMaker<S>) -> Self {
        let key = maker.extract_bytes(&original);
        Self { original, key }
    }
}

/// Settings for one sort
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// keep only the first of each run of equal keys
    pub unique: bool,
    /// sort descending
    pub reverse: bool,
    /// don't sort, just report whether the input is already sorted
    pub check: bool,
    /// output file name, standard output if None
    pub output: Option<String>,
}

impl SortConfig {
    /// new default config
    pub fn new() -> Self {
        Self::default()
    }
    /// the comparator implied by these settings
    pub const fn comp(&self) -> Comp {
        Comp {
            reverse: self.reverse,
        }
    }
    /// make Entries from lines, in the same order
    pub fn make_entries<S: ServiceLookup>(maker: &KeyMaker<S>, lines: Vec<Vec<u8>>) -> Vec<Entry> {
        let entries: Vec<Entry> = lines.into_iter().map(|x| Entry::new(x, maker)).collect();
        let degraded = entries.iter().filter(|e| e.key.is_empty()).count();
        tracing::debug!(lines = entries.len(), degraded, "extracted sort keys");
        entries
    }
    /// Sort lines, returning Entries in order
    pub fn sort_lines<S: ServiceLookup>(&self, maker: &KeyMaker<S>, lines: Vec<Vec<u8>>) -> Vec<Entry> {
        let mut entries = Self::make_entries(maker, lines);
        self.sort_entries(&mut entries);
        entries
    }
    /// sort Entries in place, removing duplicate keys if `unique`
    pub fn sort_entries(&self, entries: &mut Vec<Entry>) {
        let comp = self.comp();
        entries.sort_by(|a, b| comp.comp(&a.key, &b.key));
        if self.unique {
            let before = entries.len();
            entries.dedup_by(|a, b| comp.equal(&a.key, &b.key));
            tracing::debug!(removed = before - entries.len(), "removed duplicate keys");
        }
    }
    /// If the lines are not in order, return the index of the first line out of order
    pub fn check_lines<S: ServiceLookup>(&self, maker: &KeyMaker<S>, lines: &[Vec<u8>]) -> Option<usize> {
        let keys: Vec<SortKey> = lines.iter().map(|x| maker.extract_bytes(x)).collect();
        comp_check(&keys, &self.comp(), self.unique)
    }
    /// write the original text of each Entry, one per line
    pub fn write_entries(entries: &[Entry], w: &mut impl Write) -> Result<()> {
        for e in entries {
            write_line(w, &e.original)?;
        }
        w.flush()?;
        Ok(())
    }
    /// Read all the files, then sort or check them, using the given KeyMaker
    pub fn run_with<S: ServiceLookup>(&self, files: &[String], maker: &KeyMaker<S>) -> Result<()> {
        let lines = collect_lines(files)?;
        if self.check {
            if let Some(pos) = self.check_lines(maker, &lines) {
                prerr(&[
                    format!("urlsort: disorder at line {}: ", pos + 1).as_bytes(),
                    &lines[pos],
                ])?;
                return Err(Error::Silent);
            }
            return Ok(());
        }
        let entries = self.sort_lines(maker, lines);
        let name = self.output.as_deref().unwrap_or("-");
        let mut w = match get_writer(name) {
            Ok(w) => w,
            Err(e) => return err!("Error creating output file {} : {}", name, e),
        };
        Self::write_entries(&entries, &mut w)?;
        tracing::debug!(lines = entries.len(), output = name, "wrote sorted output");
        Ok(())
    }
    /// Read all the files, then sort or check them.
    /// "-" is standard input. Port names are looked up in the system services database.
    pub fn run(&self, files: &[String]) -> Result<()> {
        self.run_with(files, &KeyMaker::new())
    }
}
