//! Deduplicating output sink
//!
//! Every write to the output goes through one mutex, which also guards the set
//! of lines already written. A candidate is inserted into the set and written
//! while the same lock is held, so concurrent workers can never emit a line
//! twice or interleave partial lines. Lines are bytes and are written exactly
//! as they appeared in the snapshot.

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Line-oriented sink shared by all workers of a run
#[derive(Debug)]
pub struct EmitSink<W> {
    state: Mutex<SinkState<W>>,
}

#[derive(Debug)]
struct SinkState<W> {
    seen: HashSet<Vec<u8>>,
    writer: W,
}

impl<W: Write> SinkState<W> {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> EmitSink<W> {
    /// Creates a sink writing to `writer` with an empty dedup set
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(SinkState {
                seen: HashSet::new(),
                writer,
            }),
        }
    }

    /// Writes `candidate` followed by a newline unless it was written before
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The candidate was new and has been written
    /// * `Ok(false)` - The candidate was already present; nothing written
    /// * `Err(io::Error)` - Writing to the underlying writer failed
    pub fn emit(&self, candidate: &[u8]) -> io::Result<bool> {
        let mut state = self.lock();

        if state.seen.contains(candidate) {
            return Ok(false);
        }

        state.write_line(candidate)?;
        state.seen.insert(candidate.to_vec());
        Ok(true)
    }

    /// Writes every line verbatim without deduplication
    ///
    /// All lines are written under a single lock acquisition, so one
    /// snapshot's raw lines stay contiguous in the output.
    pub fn emit_raw<'a, I>(&self, lines: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut state = self.lock();
        let mut written = 0;

        for line in lines {
            state.write_line(line)?;
            written += 1;
        }

        Ok(written)
    }

    /// Flushes the underlying writer
    pub fn flush(&self) -> io::Result<()> {
        self.lock().writer.flush()
    }

    fn lock(&self) -> MutexGuard<'_, SinkState<W>> {
        // A panicking worker cannot leave the set and writer out of step:
        // the set is only updated after the write succeeded.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EmitSink<Vec<u8>> {
    /// Everything written so far, as text
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.lock().writer).into_owned()
    }

    #[cfg(test)]
    pub(crate) fn written(&self) -> Vec<u8> {
        self.lock().writer.clone()
    }
}
