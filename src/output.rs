use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;

/// Accumulated result set: insertion-ordered and duplicate-free across
/// every suggestion batch folded in over the run.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    seen: HashSet<String>,
    found: Vec<String>,
}

impl Findings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Folds one batch in and returns the domains first seen in it, in
    /// the order the batch carried them.
    pub(crate) fn merge(&mut self, batch: Vec<String>) -> &[String] {
        let start = self.found.len();
        for domain in batch {
            if self.seen.insert(domain.clone()) {
                self.found.push(domain);
            }
        }
        &self.found[start..]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.found.iter().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.found.len()
    }
}

/// Output file handle, opened once in append mode and flushed per record
/// so an interrupted run keeps everything discovered up to that point.
pub(crate) struct OutFile {
    inner: BufWriter<File>,
}

impl OutFile {
    pub(crate) fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }

    pub(crate) fn record(&mut self, domain: &str) -> io::Result<()> {
        writeln!(self.inner, "{domain}")?;
        self.inner.flush()
    }
}

/// Writes the final result set to stdout when it is being piped, one
/// domain per line. Progress and diagnostics live on stderr, so this is
/// the only thing a downstream consumer ever reads.
pub(crate) fn dump_if_piped(findings: &Findings) -> io::Result<()> {
    let stdout = io::stdout();
    if stdout.is_terminal() {
        return Ok(());
    }

    let mut out = stdout.lock();
    for domain in findings.iter() {
        writeln!(out, "{domain}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn batch(domains: &[&str]) -> Vec<String> {
        domains.iter().map(|d| (*d).to_owned()).collect()
    }

    #[test]
    fn test_merge_dedups_across_batches() {
        let mut findings = Findings::new();

        assert_eq!(findings.merge(batch(&["x.com"])), ["x.com"]);
        assert_eq!(findings.merge(batch(&["x.com", "y.com"])), ["y.com"]);
        assert_eq!(findings.merge(batch(&[])), Vec::<String>::new());

        assert_eq!(findings.iter().collect::<Vec<_>>(), ["x.com", "y.com"]);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_merge_dedups_within_batch() {
        let mut findings = Findings::new();

        assert_eq!(
            findings.merge(batch(&["a.com", "a.com", "b.com"])),
            ["a.com", "b.com"]
        );
    }

    #[test]
    fn test_outfile_appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("found.txt");
        fs::write(&path, "pre-existing.com\n").unwrap();

        let mut out = OutFile::append(&path).unwrap();
        out.record("x.com").unwrap();
        out.record("y.com").unwrap();
        drop(out);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "pre-existing.com\nx.com\ny.com\n"
        );
    }

    #[test]
    fn test_outfile_flushes_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("found.txt");

        let mut out = OutFile::append(&path).unwrap();
        out.record("x.com").unwrap();

        // visible before the handle goes away
        assert_eq!(fs::read_to_string(&path).unwrap(), "x.com\n");
    }
}
