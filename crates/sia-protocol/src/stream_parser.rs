//! Stream framer for SIA DC-09 lines.
//!
//! TCP gives no message boundaries, so this parser accumulates bytes and cuts
//! them into lines at each `<CR>` terminator. The `<LF>` panels put in front
//! of each line is stripped before the line is queued.
//!
//! ```text
//! <LF> CRC4 LEN4 "SIA-DCS" ... <CR>
//! 0x0A                         0x0D
//! ```
//!
//! # Usage
//!
//! ```
//! use sia_protocol::StreamParser;
//!
//! let mut parser = StreamParser::new();
//!
//! // Partial data from a TCP stream
//! parser.feed(b"\n58270033\"SIA-DCS\"0002");
//! assert!(parser.next_frame().is_none());
//!
//! parser.feed(b"L0#ABC123[N/CL501]_14:12:04,09-25-2019\r");
//! let frame = parser.next_frame().unwrap().unwrap();
//! assert!(frame.as_bytes().starts_with(b"5827"));
//! ```
//!
//! # Oversized lines
//!
//! A line longer than the configured maximum is not buffered. The parser
//! switches to [`ParserState::Discarding`], drops bytes until the next
//! terminator and then queues a single [`Error::FrameTooLarge`] in place of
//! the line, so the connection can answer it like any other bad line.

use bytes::BytesMut;
use sia_core::constants::{DEFAULT_MAX_LINE_LENGTH, LINE_START, LINE_TERMINATOR};
use sia_core::{Error, Result};
use std::collections::VecDeque;

use crate::frame::Frame;

/// Initial buffer capacity for incoming TCP data.
const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Initial capacity of the line queue.
const INITIAL_FRAME_QUEUE_CAPACITY: usize = 4;

/// Framer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Accumulating bytes of the current line.
    ReadingLine,

    /// Dropping the rest of an oversized line up to the next terminator.
    Discarding,
}

/// Stateful line framer.
///
/// ```text
/// ┌─────────────┐  line > max          ┌────────────┐
/// │ ReadingLine │─────────────────────>│ Discarding │
/// └─────────────┘                      └────────────┘
///   │    ^   ^                              │
///   │ CR │   └──────────────────────────────┘
///   │    │        CR (queue FrameTooLarge)
///   └────┘
///  queue line
/// ```
///
/// Empty lines (a bare `<CR>` or `<LF><CR>`) are dropped without producing
/// an item.
#[derive(Debug)]
pub struct StreamParser {
    buffer: BytesMut,
    state: ParserState,
    max_line_length: usize,
    /// Bytes dropped so far from the current oversized line.
    discarded: usize,
    frames: VecDeque<Result<Frame>>,
}

impl StreamParser {
    /// Create a parser with the default maximum line length.
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a parser that rejects lines longer than `max_line_length` bytes.
    ///
    /// The length is measured on the raw line, including the leading `<LF>`
    /// and excluding the terminator.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            state: ParserState::ReadingLine,
            max_line_length,
            discarded: 0,
            frames: VecDeque::with_capacity(INITIAL_FRAME_QUEUE_CAPACITY),
        }
    }

    /// Feed bytes from the stream.
    ///
    /// Every line completed by these bytes is queued, so one call may queue
    /// several items.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);

        while self.try_extract_line() {}
    }

    /// Pop the next queued line, or the error that replaced it.
    pub fn next_frame(&mut self) -> Option<Result<Frame>> {
        self.frames.pop_front()
    }

    /// Current framer state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of queued items.
    pub fn frames_available(&self) -> usize {
        self.frames.len()
    }

    /// Bytes buffered for the line in progress.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Maximum accepted line length.
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Drop all buffered bytes and queued items.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.frames.clear();
        self.discarded = 0;
        self.state = ParserState::ReadingLine;
    }

    /// Iterator over every currently queued item.
    pub fn drain_frames(&mut self) -> DrainFrames<'_> {
        DrainFrames { parser: self }
    }

    /// Returns `true` if progress was made and the buffer should be scanned
    /// again.
    fn try_extract_line(&mut self) -> bool {
        let terminator = self.buffer.iter().position(|&b| b == LINE_TERMINATOR);

        match (self.state, terminator) {
            (ParserState::ReadingLine, Some(pos)) => {
                let line = self.buffer.split_to(pos);
                let _ = self.buffer.split_to(1);
                self.enqueue_line(line);
                true
            }
            (ParserState::ReadingLine, None) => {
                if self.buffer.len() > self.max_line_length {
                    self.discarded = self.buffer.len();
                    self.buffer.clear();
                    self.state = ParserState::Discarding;
                }
                false
            }
            (ParserState::Discarding, Some(pos)) => {
                self.discarded += pos;
                let _ = self.buffer.split_to(pos + 1);
                self.frames.push_back(Err(Error::FrameTooLarge {
                    size: self.discarded,
                    max_size: self.max_line_length,
                }));
                self.discarded = 0;
                self.state = ParserState::ReadingLine;
                true
            }
            (ParserState::Discarding, None) => {
                self.discarded += self.buffer.len();
                self.buffer.clear();
                false
            }
        }
    }

    fn enqueue_line(&mut self, mut line: BytesMut) {
        if line.len() > self.max_line_length {
            self.frames.push_back(Err(Error::FrameTooLarge {
                size: line.len(),
                max_size: self.max_line_length,
            }));
            return;
        }

        if line.first() == Some(&LINE_START) {
            let _ = line.split_to(1);
        }

        if !line.is_empty() {
            self.frames.push_back(Ok(Frame::new(line.freeze())));
        }
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`StreamParser::drain_frames`].
pub struct DrainFrames<'a> {
    parser: &'a mut StreamParser,
}

impl Iterator for DrainFrames<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.parser.frames_available();
        (len, Some(len))
    }
}

impl ExactSizeIterator for DrainFrames<'_> {
    fn len(&self) -> usize {
        self.parser.frames_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(payload.len() + 2);
        data.push(LINE_START);
        data.extend_from_slice(payload);
        data.push(LINE_TERMINATOR);
        data
    }

    fn next_ok(parser: &mut StreamParser) -> Vec<u8> {
        parser.next_frame().unwrap().unwrap().as_bytes().to_vec()
    }

    #[test]
    fn test_new_parser() {
        let parser = StreamParser::new();
        assert_eq!(parser.state(), ParserState::ReadingLine);
        assert_eq!(parser.frames_available(), 0);
        assert_eq!(parser.max_line_length(), DEFAULT_MAX_LINE_LENGTH);
    }

    #[test]
    fn test_single_line_strips_lf() {
        let mut parser = StreamParser::new();
        parser.feed(&line(b"ABCD0001\"x"));

        assert_eq!(parser.frames_available(), 1);
        assert_eq!(next_ok(&mut parser), b"ABCD0001\"x");
    }

    #[test]
    fn test_line_without_lf_is_kept_whole() {
        let mut parser = StreamParser::new();
        parser.feed(b"ABCD\r");

        assert_eq!(next_ok(&mut parser), b"ABCD");
    }

    #[test]
    fn test_partial_line_across_feeds() {
        let mut parser = StreamParser::new();

        parser.feed(b"\nAB");
        assert!(parser.next_frame().is_none());
        assert_eq!(parser.buffered(), 3);

        parser.feed(b"CD");
        assert!(parser.next_frame().is_none());

        parser.feed(b"\r");
        assert_eq!(next_ok(&mut parser), b"ABCD");
        assert_eq!(parser.buffered(), 0);
    }

    #[test]
    fn test_multiple_lines_in_one_feed() {
        let mut parser = StreamParser::new();
        let mut data = line(b"first");
        data.extend_from_slice(&line(b"second"));
        data.extend_from_slice(b"\nthi");

        parser.feed(&data);

        assert_eq!(parser.frames_available(), 2);
        assert_eq!(next_ok(&mut parser), b"first");
        assert_eq!(next_ok(&mut parser), b"second");

        parser.feed(b"rd\r");
        assert_eq!(next_ok(&mut parser), b"third");
    }

    #[test]
    fn test_byte_by_byte() {
        let mut parser = StreamParser::new();
        for &byte in line(b"58270033\"SIA-DCS\"").iter() {
            parser.feed(&[byte]);
        }

        assert_eq!(next_ok(&mut parser), b"58270033\"SIA-DCS\"");
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let mut parser = StreamParser::new();
        parser.feed(b"\r\n\r\r");

        assert_eq!(parser.frames_available(), 0);
        assert_eq!(parser.state(), ParserState::ReadingLine);
    }

    #[test]
    fn test_only_first_lf_is_stripped() {
        let mut parser = StreamParser::new();
        parser.feed(b"\n\nX\r");

        assert_eq!(next_ok(&mut parser), b"\nX");
    }

    #[test]
    fn test_oversized_line_in_one_feed() {
        let mut parser = StreamParser::with_max_line_length(8);
        let mut data = line(b"0123456789ABCDEF");
        data.extend_from_slice(&line(b"ok"));

        parser.feed(&data);

        assert_eq!(parser.frames_available(), 2);
        assert!(matches!(
            parser.next_frame(),
            Some(Err(Error::FrameTooLarge { size: 17, max_size: 8 }))
        ));
        assert_eq!(next_ok(&mut parser), b"ok");
    }

    #[test]
    fn test_oversized_line_across_feeds_discards_until_terminator() {
        let mut parser = StreamParser::with_max_line_length(8);

        parser.feed(b"\n0123456789");
        assert_eq!(parser.state(), ParserState::Discarding);
        assert_eq!(parser.frames_available(), 0);
        assert_eq!(parser.buffered(), 0);

        parser.feed(&[b'X'; 100]);
        assert_eq!(parser.state(), ParserState::Discarding);
        assert_eq!(parser.buffered(), 0);

        parser.feed(b"tail\r\nnext\r");
        assert_eq!(parser.state(), ParserState::ReadingLine);

        match parser.next_frame() {
            Some(Err(Error::FrameTooLarge { size, max_size })) => {
                assert_eq!(size, 11 + 100 + 4);
                assert_eq!(max_size, 8);
            }
            other => panic!("expected FrameTooLarge, got {other:?}"),
        }
        assert_eq!(next_ok(&mut parser), b"next");
    }

    #[test]
    fn test_line_at_exact_limit_is_accepted() {
        let mut parser = StreamParser::with_max_line_length(5);
        parser.feed(b"\nABCD\r");

        assert_eq!(next_ok(&mut parser), b"ABCD");
    }

    #[test]
    fn test_non_ascii_bytes_are_passed_through() {
        let mut parser = StreamParser::new();
        parser.feed(&[b'\n', 0xFF, 0xFE, b'\r']);

        assert_eq!(next_ok(&mut parser), vec![0xFF, 0xFE]);
    }

    #[test]
    fn test_clear_resets_parser() {
        let mut parser = StreamParser::with_max_line_length(4);
        parser.feed(b"\n0123456789");
        assert_eq!(parser.state(), ParserState::Discarding);

        parser.clear();

        assert_eq!(parser.state(), ParserState::ReadingLine);
        assert_eq!(parser.frames_available(), 0);
        parser.feed(b"ab\r");
        assert_eq!(next_ok(&mut parser), b"ab");
    }

    #[test]
    fn test_drain_frames() {
        let mut parser = StreamParser::new();
        for payload in [b"one".as_slice(), b"two", b"three"] {
            parser.feed(&line(payload));
        }

        let mut iter = parser.drain_frames();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.size_hint(), (3, Some(3)));

        let frames: Vec<_> = iter.by_ref().map(|f| f.unwrap().to_string()).collect();
        assert_eq!(frames, ["one", "two", "three"]);
        assert_eq!(iter.len(), 0);
        assert_eq!(parser.frames_available(), 0);
    }
}
