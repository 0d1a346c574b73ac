use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{warn, debug};
use serde::Serialize;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::normalizer::TextNormalizer;
use crate::timecode::{self, TIME_RANGE_SEPARATOR};

// @module: SRT line classification and entry assembly

// @const: UTF-8 byte-order mark that may prefix the first line
const BYTE_ORDER_MARK: char = '\u{feff}';

// @struct: Single finalized subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleEntry {
    // @field: Cue index as found in the file
    pub id: u64,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cleaned display text
    pub text: String,

    // @field: Display text without punctuation and dash bullets
    pub text_only: String,

    // @field: Source lines that contributed to the text
    pub text_line_count: usize,

    // @field: Whitespace-delimited tokens in text
    pub words_count: usize,
}

impl SubtitleEntry {
    /// Duration of the cue; zero when end precedes start
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_time_code(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_time_code(self.end_ms)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} [{} --> {}] {}",
            self.id,
            self.format_start_time(),
            self.format_end_time(),
            self.text
        )
    }
}

/// Where the parser is within the current cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Nothing seen for the current cue yet
    #[default]
    AwaitingId,
    /// Index seen, time range still missing
    AwaitingTime,
    /// Time range seen, no text yet; index and time lines still apply
    AwaitingText,
    /// Text started; every non-blank line is text
    ReadingText,
}

/// How a non-blank line was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Index,
    TimeRange,
    Text,
}

/// Counters collected over one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ParseStats {
    pub lines_read: usize,
    pub entries_emitted: usize,
    pub entries_discarded: usize,
    pub malformed_time_ranges: usize,
    pub unparseable_time_codes: usize,
    pub invalid_indexes: usize,
}

/// Entries plus the counters of the parse that produced them
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub entries: Vec<SubtitleEntry>,
    pub stats: ParseStats,
}

// @struct: Fields of the cue being assembled
#[derive(Debug, Default)]
struct PendingEntry {
    id: Option<u64>,
    start_ms: Option<u64>,
    end_ms: Option<u64>,
    text: String,
    text_line_count: usize,
}

impl PendingEntry {
    fn is_empty(&self) -> bool {
        self.id.is_none() && self.start_ms.is_none() && self.end_ms.is_none() && self.text_line_count == 0
    }

    fn push_text(&mut self, line: &str) {
        if self.text_line_count > 0 {
            self.text.push(' ');
        }
        self.text.push_str(line);
        self.text_line_count += 1;
    }

    /// Build the final entry, or `None` if a required field is missing
    fn finalize(self, normalizer: &TextNormalizer) -> Option<SubtitleEntry> {
        let (Some(id), Some(start_ms), Some(end_ms)) = (self.id, self.start_ms, self.end_ms) else {
            return None;
        };

        if self.text.is_empty() {
            return None;
        }

        let normalized = normalizer.normalize(&self.text);
        if normalized.text.is_empty() {
            return None;
        }

        Some(SubtitleEntry {
            id,
            start_ms,
            end_ms,
            text: normalized.text,
            text_only: normalized.text_only,
            text_line_count: self.text_line_count,
            words_count: normalized.words_count,
        })
    }
}

/// Incremental SRT parser fed one line at a time
#[derive(Debug, Default)]
pub struct SrtParser {
    normalizer: TextNormalizer,
    state: ParserState,
    pending: PendingEntry,
    entries: Vec<SubtitleEntry>,
    stats: ParseStats,
}

impl SrtParser {
    /// Create a parser using the given text normalizer
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self {
            normalizer,
            ..Default::default()
        }
    }

    /// Current position within the cue being assembled
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Entries emitted so far
    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    /// Classify one line and update the pending cue
    pub fn feed_line(&mut self, line: &str) -> LineKind {
        self.stats.lines_read += 1;
        let line = if self.stats.lines_read == 1 {
            line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(line)
        } else {
            line
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            self.close_entry();
            return LineKind::Blank;
        }

        if self.state != ParserState::ReadingText {
            if Self::is_index_line(trimmed) {
                if let Err(e) = self.accept_index(trimmed) {
                    self.stats.invalid_indexes += 1;
                    warn!("Skipping line {}: {}", self.stats.lines_read, e);
                }
                return LineKind::Index;
            }

            if trimmed.contains(TIME_RANGE_SEPARATOR) {
                if let Err(e) = self.accept_time_range(trimmed) {
                    match &e {
                        SubtitleError::MalformedTimeRange(_) => self.stats.malformed_time_ranges += 1,
                        _ => self.stats.unparseable_time_codes += 1,
                    }
                    warn!("Skipping line {}: {}", self.stats.lines_read, e);
                }
                return LineKind::TimeRange;
            }
        }

        if self.pending.start_ms.is_none() {
            debug!("Text at line {} before any time range: {}", self.stats.lines_read, trimmed);
        }
        self.pending.push_text(trimmed);
        self.state = ParserState::ReadingText;
        LineKind::Text
    }

    /// Flush the pending cue and return everything parsed
    pub fn finish(mut self) -> ParseOutcome {
        self.close_entry();

        if self.entries.is_empty() {
            warn!("No valid subtitle entries found in {} line(s)", self.stats.lines_read);
        }

        ParseOutcome {
            entries: self.entries,
            stats: self.stats,
        }
    }

    fn is_index_line(line: &str) -> bool {
        line.bytes().all(|b| b.is_ascii_digit())
    }

    fn accept_index(&mut self, line: &str) -> Result<(), SubtitleError> {
        let id = line
            .parse::<u64>()
            .map_err(|_| SubtitleError::InvalidIndex(line.to_string()))?;

        if let Some(previous) = self.pending.id {
            debug!("Index {} replaces {} at line {}", id, previous, self.stats.lines_read);
        }
        self.pending.id = Some(id);
        if self.pending.start_ms.is_none() {
            self.state = ParserState::AwaitingTime;
        }
        Ok(())
    }

    fn accept_time_range(&mut self, line: &str) -> Result<(), SubtitleError> {
        let (start_ms, end_ms) = timecode::parse_time_range(line)?;

        self.pending.start_ms = Some(start_ms);
        self.pending.end_ms = Some(end_ms);
        self.state = ParserState::AwaitingText;
        Ok(())
    }

    /// Emit the pending cue if it is complete, then start a fresh one
    fn close_entry(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.state = ParserState::AwaitingId;

        if pending.is_empty() {
            return;
        }

        let id = pending.id;
        match pending.finalize(&self.normalizer) {
            Some(entry) => {
                self.entries.push(entry);
                self.stats.entries_emitted += 1;
            }
            None => {
                self.stats.entries_discarded += 1;
                debug!("Discarding incomplete entry {:?} before line {}", id, self.stats.lines_read);
            }
        }
    }
}

/// Parse an ordered sequence of lines into valid entries
pub fn parse_lines<I, S>(lines: I, normalizer: TextNormalizer) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = SrtParser::new(normalizer);
    for line in lines {
        parser.feed_line(line.as_ref());
    }
    parser.finish()
}

/// Parse SRT format string into subtitle entries
pub fn parse_srt_string(content: &str, normalizer: TextNormalizer) -> ParseOutcome {
    parse_lines(content.lines(), normalizer)
}

/// Parse from a buffered reader; only read errors are returned
pub fn parse_reader<R: BufRead>(reader: R, normalizer: TextNormalizer) -> Result<ParseOutcome> {
    let mut parser = SrtParser::new(normalizer);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        parser.feed_line(&line);
    }
    Ok(parser.finish())
}

/// Collection of subtitle entries with metadata
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,

    /// Counters from the parse
    pub stats: ParseStats,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Parse an SRT file from disk
    pub fn from_file<P: AsRef<Path>>(path: P, normalizer: TextNormalizer) -> Result<Self> {
        let path = path.as_ref();
        let reader = FileManager::open_lines(path)?;
        let outcome = parse_reader(reader, normalizer)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        if outcome.stats.entries_discarded > 0 {
            warn!("Discarded {} incomplete entries in {}", outcome.stats.entries_discarded, path.display());
        }

        Ok(Self::from_outcome(path.to_path_buf(), outcome))
    }

    /// Parse in-memory SRT content
    pub fn from_string(source_file: PathBuf, content: &str, normalizer: TextNormalizer) -> Self {
        Self::from_outcome(source_file, parse_srt_string(content, normalizer))
    }

    fn from_outcome(source_file: PathBuf, outcome: ParseOutcome) -> Self {
        SubtitleCollection {
            source_file,
            entries: outcome.entries,
            stats: outcome.stats,
        }
    }

    /// Sum of word counts across entries
    pub fn total_words(&self) -> usize {
        self.entries.iter().map(|e| e.words_count).sum()
    }

    /// Sum of cue durations
    pub fn total_duration_ms(&self) -> u64 {
        self.entries.iter().map(SubtitleEntry::duration_ms).sum()
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Discarded: {}", self.stats.entries_discarded)?;
        writeln!(f, "Words: {}", self.total_words())?;
        Ok(())
    }
}
