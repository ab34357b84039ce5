//! Append-only progress snapshots.
//!
//! Population search hands a [`Snapshot`] of its top candidates to a
//! [`CheckpointSink`] each time the best value improves. Snapshots are
//! human-readable and are never read back by the solver.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// One ranked candidate in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Rank in the population (0 = best).
    pub rank: usize,
    /// Total packed value.
    pub value: u64,
    /// Capacity left unused.
    pub remaining_capacity: i128,
    /// Packed item indices, ascending.
    pub items: Vec<usize>,
}

/// Top candidates of the population at one point of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Iteration that produced the improvement.
    pub iteration: u64,
    /// Time since the search started.
    pub elapsed: Duration,
    /// Best candidates, best first.
    pub entries: Vec<SnapshotEntry>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "== iteration {} ({:.3}s) ==",
            self.iteration,
            self.elapsed.as_secs_f64()
        )?;
        for entry in &self.entries {
            write!(
                f,
                "#{} value={} remaining={} items=[",
                entry.rank, entry.value, entry.remaining_capacity
            )?;
            for (k, item) in entry.items.iter().enumerate() {
                if k > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{item}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Destination for progress snapshots.
///
/// Failures are reported to the caller, which logs them and keeps
/// searching.
pub trait CheckpointSink {
    /// Records one snapshot.
    fn record(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckpoint;

impl CheckpointSink for NoCheckpoint {
    fn record(&mut self, _snapshot: &Snapshot) -> io::Result<()> {
        Ok(())
    }
}

/// Writes snapshots to any [`Write`] implementation, flushing after each.
#[derive(Debug)]
pub struct WriterCheckpoint<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> WriterCheckpoint<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of snapshots written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CheckpointSink for WriterCheckpoint<W> {
    fn record(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        write!(self.writer, "{snapshot}")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Appends snapshots to a file.
pub type FileCheckpoint = WriterCheckpoint<BufWriter<File>>;

impl FileCheckpoint {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<S: CheckpointSink + ?Sized> CheckpointSink for &mut S {
    fn record(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        (**self).record(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            iteration: 12,
            elapsed: Duration::from_millis(1500),
            entries: vec![
                SnapshotEntry {
                    rank: 0,
                    value: 19,
                    remaining_capacity: 0,
                    items: vec![1, 2, 4],
                },
                SnapshotEntry {
                    rank: 1,
                    value: 17,
                    remaining_capacity: 2,
                    items: vec![0, 3],
                },
            ],
        }
    }

    #[test]
    fn test_display() {
        let text = snapshot().to_string();
        assert_eq!(
            text,
            "== iteration 12 (1.500s) ==\n\
             #0 value=19 remaining=0 items=[1,2,4]\n\
             #1 value=17 remaining=2 items=[0,3]\n"
        );
    }

    #[test]
    fn test_writer_checkpoint_appends() {
        let mut sink = WriterCheckpoint::new(Vec::new());
        sink.record(&snapshot()).unwrap();
        sink.record(&snapshot()).unwrap();
        assert_eq!(sink.written(), 2);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.matches("== iteration 12").count(), 2);
    }

    #[test]
    fn test_file_checkpoint_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.log");

        FileCheckpoint::open(&path).unwrap().record(&snapshot()).unwrap();
        FileCheckpoint::open(&path).unwrap().record(&snapshot()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("#0 value=19").count(), 2);
    }

    #[test]
    fn test_no_checkpoint() {
        assert!(NoCheckpoint.record(&snapshot()).is_ok());
    }
}
