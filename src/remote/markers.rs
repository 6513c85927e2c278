//! Streaming MS2 marker counter.
//!
//! Counts segments (lines, or printable runs for binary formats) containing at
//! least one marker, the way `grep -c` counts matching lines. Memory use is
//! bounded by the read buffer and the longest marker, so arbitrarily large
//! files and files with multi-megabyte base64 lines stream in constant space.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use regex::bytes::Regex;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// How a stream is split into countable segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// Newline-delimited lines
    Lines,
    /// Runs of printable ASCII, as produced by `strings`
    PrintableRuns,
}

impl Segmentation {
    fn is_delimiter(self, byte: u8) -> bool {
        match self {
            Segmentation::Lines => byte == b'\n',
            Segmentation::PrintableRuns => !(byte == b'\t' || (0x20..=0x7e).contains(&byte)),
        }
    }
}

/// A set of literal byte markers counted per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<String>,
    segmentation: Segmentation,
}

impl MarkerSet {
    /// Create a marker set. Empty markers are ignored.
    pub fn new(markers: &[&str], segmentation: Segmentation) -> Self {
        Self {
            markers: markers
                .iter()
                .filter(|m| !m.is_empty())
                .map(|m| m.to_string())
                .collect(),
            segmentation,
        }
    }

    /// The mzML MS2 marker (`MS:1000580`, "MSn spectrum").
    pub fn mzml() -> Self {
        Self::new(&["accession=\"MS:1000580\""], Segmentation::Lines)
    }

    /// How the stream is segmented.
    pub fn segmentation(&self) -> Segmentation {
        self.segmentation
    }

    /// Count segments of `reader` that contain a marker.
    pub fn count<R: Read>(&self, reader: R) -> io::Result<u64> {
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, reader);
        let Some(matcher) = self.matcher()? else {
            io::copy(&mut reader, &mut io::sink())?;
            return Ok(0);
        };
        let mut scanner = SegmentScanner::new(&matcher, self.segmentation, self.longest());

        loop {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            let consumed = chunk.len();
            scanner.feed(chunk);
            reader.consume(consumed);
        }

        Ok(scanner.finish())
    }

    /// Count markers in a local file.
    pub fn count_file(&self, path: &Path) -> io::Result<u64> {
        self.count(File::open(path)?)
    }

    fn longest(&self) -> usize {
        self.markers.iter().map(String::len).max().unwrap_or(0)
    }

    /// Literal alternation over every marker; `None` when the set is empty.
    fn matcher(&self) -> io::Result<Option<Regex>> {
        if self.markers.is_empty() {
            return Ok(None);
        }
        let pattern = self
            .markers
            .iter()
            .map(|marker| regex::escape(marker))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern)
            .map(Some)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
    }
}

/// Incremental segment matcher; keeps only enough of the current segment to
/// detect a marker straddling two chunks.
struct SegmentScanner<'a> {
    matcher: &'a Regex,
    segmentation: Segmentation,
    carry: Vec<u8>,
    keep: usize,
    matched: bool,
    count: u64,
}

impl<'a> SegmentScanner<'a> {
    fn new(matcher: &'a Regex, segmentation: Segmentation, longest: usize) -> Self {
        Self {
            matcher,
            segmentation,
            carry: Vec::new(),
            keep: longest.saturating_sub(1),
            matched: false,
            count: 0,
        }
    }

    fn feed(&mut self, mut bytes: &[u8]) {
        let segmentation = self.segmentation;
        while !bytes.is_empty() {
            match bytes.iter().position(|&b| segmentation.is_delimiter(b)) {
                Some(pos) => {
                    self.scan(&bytes[..pos]);
                    self.end_segment();
                    bytes = &bytes[pos + 1..];
                }
                None => {
                    self.scan(bytes);
                    break;
                }
            }
        }
    }

    fn scan(&mut self, part: &[u8]) {
        if self.matched || part.is_empty() {
            return;
        }
        self.carry.extend_from_slice(part);
        if self.matcher.is_match(&self.carry) {
            self.matched = true;
            self.carry.clear();
            return;
        }
        let excess = self.carry.len().saturating_sub(self.keep);
        self.carry.drain(..excess);
    }

    fn end_segment(&mut self) {
        if self.matched {
            self.count += 1;
        }
        self.matched = false;
        self.carry.clear();
    }

    fn finish(mut self) -> u64 {
        self.end_segment();
        self.count
    }
}
