/*!
 * # srtscan - SubRip subtitle parser
 *
 * A Rust library for turning SRT subtitle files into structured entries.
 *
 * ## Features
 *
 * - Line-by-line parsing through an explicit state machine
 * - `HH:MM:SS,mmm` time codes decoded to milliseconds
 * - Markup cleanup and a punctuation-free "text only" projection
 * - Per-entry line and word counters
 * - Table, CSV and JSON reports from the command line
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: Line classification and entry assembly
 * - `timecode`: Time-code decoding and formatting
 * - `normalizer`: Text cleanup and text-only projection
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `report`: Rendering of parsed entries
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod normalizer;
pub mod report;
pub mod subtitle_processor;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use normalizer::{NormalizedText, TextNormalizer};
pub use subtitle_processor::{
    parse_lines, parse_reader, parse_srt_string, ParseOutcome, ParseStats, ParserState,
    SrtParser, SubtitleCollection, SubtitleEntry,
};
pub use errors::{AppError, SubtitleError};
