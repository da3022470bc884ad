//! Tokio codec for SIA DC-09 connections.
//!
//! `SiaCodec` wraps the [`StreamParser`] so a TCP stream can be driven through
//! `tokio_util::codec::Framed`:
//!
//! ```text
//! TCP stream -> Decoder -> Result<Frame>   (one item per line)
//! Reply      -> Encoder -> TCP stream      (<LF> CRC LEN body <CR>)
//! ```
//!
//! # Line errors are items
//!
//! A decoder error terminates a `Framed` stream, but a bad line must only cost
//! a NAK. Oversized lines therefore come out as `Ok(Some(Err(..)))`; the
//! decoder's own `Err` is reserved for I/O failures.
//!
//! ```rust,no_run
//! use futures::{SinkExt, StreamExt};
//! use sia_protocol::{Reply, SiaCodec};
//! use tokio::net::TcpStream;
//! use tokio_util::codec::Framed;
//!
//! # async fn example() -> sia_core::Result<()> {
//! let stream = TcpStream::connect("127.0.0.1:7777").await?;
//! let mut framed = Framed::new(stream, SiaCodec::new());
//!
//! while let Some(item) = framed.next().await {
//!     match item? {
//!         Ok(frame) => println!("line: {frame}"),
//!         Err(_) => framed.send(Reply::nak()).await?,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use bytes::BytesMut;
use sia_core::{Error, Result};
use tokio_util::codec::{Decoder, Encoder};

use crate::{Frame, Reply, StreamParser};

/// Tokio codec for SIA DC-09 lines and replies.
#[derive(Debug, Default)]
pub struct SiaCodec {
    parser: StreamParser,
}

impl SiaCodec {
    /// Codec with the default maximum line length.
    pub fn new() -> Self {
        Self {
            parser: StreamParser::new(),
        }
    }

    /// Codec rejecting lines longer than `max_line_length` bytes.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            parser: StreamParser::with_max_line_length(max_line_length),
        }
    }

    pub fn max_line_length(&self) -> usize {
        self.parser.max_line_length()
    }
}

impl Decoder for SiaCodec {
    type Item = Result<Frame>;
    type Error = Error;

    /// Decode the next line.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use tokio_util::codec::Decoder;
    /// use sia_protocol::SiaCodec;
    ///
    /// let mut codec = SiaCodec::with_max_line_length(8);
    /// let mut buffer = BytesMut::from(&b"\nshort\r\n0123456789\rnext"[..]);
    ///
    /// let first = codec.decode(&mut buffer).unwrap().unwrap();
    /// assert_eq!(first.unwrap().as_bytes(), b"short");
    ///
    /// let second = codec.decode(&mut buffer).unwrap().unwrap();
    /// assert!(second.is_err());
    ///
    /// assert!(codec.decode(&mut buffer).unwrap().is_none());
    /// ```
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        // All bytes move into the parser's buffer.
        if !src.is_empty() {
            self.parser.feed(src);
            src.clear();
        }

        Ok(self.parser.next_frame())
    }
}

impl Encoder<Reply> for SiaCodec {
    type Error = Error;

    fn encode(&mut self, item: Reply, dst: &mut BytesMut) -> Result<()> {
        dst.extend_from_slice(&item.encode());
        Ok(())
    }
}
