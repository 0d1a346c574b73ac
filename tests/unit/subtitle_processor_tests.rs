/*!
 * Tests for line classification and entry assembly
 */

use std::io::Cursor;
use anyhow::Result;
use srtscan::normalizer::TextNormalizer;
use srtscan::subtitle_processor::{parse_lines, parse_reader, parse_srt_string, ParseOutcome, SubtitleCollection};
use crate::common;

fn parse(content: &str) -> ParseOutcome {
    common::init_logging();
    parse_srt_string(content, TextNormalizer::default())
}

/// Test the basic three-line cue followed by a blank line
#[test]
fn test_parse_withSingleCue_shouldEmitOneEntry() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,500\nHello world\n\n");

    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert_eq!(entry.id, 1);
    assert_eq!(entry.start_ms, 1000);
    assert_eq!(entry.end_ms, 2500);
    assert_eq!(entry.text, "Hello world");
    assert_eq!(entry.text_only, "Hello world");
    assert_eq!(entry.text_line_count, 1);
    assert_eq!(entry.words_count, 2);
}

/// Test that time codes sum their positional values
#[test]
fn test_parse_withFullTimeCode_shouldDecodeMilliseconds() {
    let outcome = parse("1\n01:02:03,004 --> 01:02:04,000\nX\n");
    assert_eq!(outcome.entries[0].start_ms, 3_723_004);
    assert_eq!(outcome.entries[0].end_ms, 3_724_000);
}

/// Test that cue blocks are emitted in file order
#[test]
fn test_parse_withTwoCues_shouldKeepFileOrder() {
    let outcome = parse(
        "2\n00:00:05,000 --> 00:00:06,000\nSecond\n\n1\n00:00:01,000 --> 00:00:02,000\nFirst\n",
    );
    let ids: Vec<u64> = outcome.entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

/// Test that runs of blank lines do not produce extra entries
#[test]
fn test_parse_withConsecutiveBlankLines_shouldNotAddEntries() {
    let outcome = parse(
        "\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n\n\n",
    );
    assert_eq!(outcome.entries.len(), 2);
    assert_eq!(outcome.stats.entries_discarded, 0);
}

/// Test that whitespace-only lines close a cue
#[test]
fn test_parse_withWhitespaceOnlySeparator_shouldCloseCue() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nA\n  \t \n2\n00:00:03,000 --> 00:00:04,000\nB");
    assert_eq!(outcome.entries.len(), 2);
    assert_eq!(outcome.entries[1].text, "B");
}

/// Test joining of multi-line cue text
#[test]
fn test_parse_withMultiLineText_shouldJoinWithSpace() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nHello\nworld\n");
    let entry = &outcome.entries[0];
    assert_eq!(entry.text, "Hello world");
    assert_eq!(entry.text_line_count, 2);
    assert_eq!(entry.words_count, 2);
}

/// Test that a cue without a trailing blank line is still flushed
#[test]
fn test_parse_withoutTrailingBlankLine_shouldFlushCompleteCue() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nLast words");
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].text, "Last words");
}

/// Test that a truncated trailing cue is discarded
#[test]
fn test_parse_withTruncatedTrailingCue_shouldDiscardIt() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nKept\n\n2\n00:00:03,000 --> 00:00:04,000");
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].id, 1);
    assert_eq!(outcome.stats.entries_discarded, 1);
}

/// Test that a cue missing its index is dropped
#[test]
fn test_parse_withMissingIndex_shouldDiscardCue() {
    let outcome = parse("00:00:01,000 --> 00:00:02,000\nNo index here\n\n2\n00:00:03,000 --> 00:00:04,000\nOk\n");
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].id, 2);
}

/// Test that lines looking like indexes or time ranges inside text stay text
#[test]
fn test_parse_withStructuralLookingTextLines_shouldKeepThemAsText() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\nCount down\n3\nthen 00:00:05,000 --> go\n");
    let entry = &outcome.entries[0];
    assert_eq!(entry.id, 1);
    assert_eq!(entry.start_ms, 1000);
    assert_eq!(entry.end_ms, 2000);
    assert_eq!(entry.text, "Count down 3 then 00:00:05,000 --> go");
    assert_eq!(entry.text_line_count, 3);
}

/// Test that a malformed time range is skipped without touching the cue
#[test]
fn test_parse_withMalformedTimeRange_shouldSkipLine() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000 --> 00:00:03,000\n00:00:01,000 --> 00:00:02,000\nText\n");
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].start_ms, 1000);
    assert_eq!(outcome.stats.malformed_time_ranges, 1);
}

/// Test that an unparseable time code does not abort the parse
#[test]
fn test_parse_withUnparseableTimeCode_shouldContinue() {
    let outcome = parse(
        "1\n00:00:01.000 --> 00:00:02.000\nBroken\n\n2\n00:00:03,000 --> 00:00:04,000\nFine\n",
    );
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].id, 2);
    assert_eq!(outcome.stats.unparseable_time_codes, 1);
    assert_eq!(outcome.stats.entries_discarded, 1);
}

/// Test that duplicate ids are kept as they appear
#[test]
fn test_parse_withDuplicateIds_shouldKeepBoth() {
    let outcome = parse("5\n00:00:01,000 --> 00:00:02,000\nA\n\n5\n00:00:03,000 --> 00:00:04,000\nB\n");
    assert_eq!(outcome.entries.len(), 2);
    assert!(outcome.entries.iter().all(|e| e.id == 5));
}

/// Test that start after end is not rejected
#[test]
fn test_parse_withReversedTimes_shouldKeepEntry() {
    let outcome = parse("1\n00:00:05,000 --> 00:00:01,000\nBackwards\n");
    assert_eq!(outcome.entries[0].start_ms, 5000);
    assert_eq!(outcome.entries[0].end_ms, 1000);
    assert_eq!(outcome.entries[0].duration_ms(), 0);
}

/// Test CRLF input
#[test]
fn test_parse_withWindowsLineEndings_shouldParse() {
    let outcome = parse("1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n");
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].text, "Hello");
}

/// Test that markup is cleaned before emission
#[test]
fn test_parse_withMarkup_shouldCleanText() {
    let outcome = parse("1\n00:00:01,000 --> 00:00:02,000\n<b>Hi|there</b>\n");
    assert_eq!(outcome.entries[0].text, "Hithere");
}

/// Test every emitted entry carries required fields
#[test]
fn test_parse_withMixedInput_shouldOnlyEmitValidEntries() {
    let content = "junk\n\n1\n\n2\n00:00:01,000 --> 00:00:02,000\n\n3\n00:00:03,000 --> 00:00:04,000\nOk\n\n--> \n";
    let outcome = parse(content);
    assert_eq!(outcome.entries.len(), 1);
    for entry in &outcome.entries {
        assert!(!entry.text.is_empty());
    }
}

/// Test the iterator entry point over owned lines
#[test]
fn test_parseLines_withOwnedStrings_shouldParse() {
    let lines = vec![
        "7".to_string(),
        "00:01:00,000 --> 00:01:01,000".to_string(),
        "Owned".to_string(),
    ];
    let outcome = parse_lines(lines, TextNormalizer::default());
    assert_eq!(outcome.entries[0].id, 7);
    assert_eq!(outcome.entries[0].start_ms, 60_000);
}

/// Test the reader entry point
#[test]
fn test_parseReader_withCursor_shouldParse() -> Result<()> {
    let outcome = parse_reader(Cursor::new(common::SAMPLE_SRT), TextNormalizer::default())?;
    assert_eq!(outcome.entries.len(), 3);
    Ok(())
}

/// Test collection helpers
#[test]
fn test_subtitleCollection_fromString_shouldSummarize() {
    let collection = SubtitleCollection::from_string(
        "sample.srt".into(),
        common::SAMPLE_SRT,
        TextNormalizer::default(),
    );

    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.total_words(), 5 + 4 + 4);
    assert_eq!(collection.total_duration_ms(), 3000 + 4000 + 4000);

    let summary = collection.to_string();
    assert!(summary.contains("Entries: 3"));
}
