pub mod builder;
pub mod checksum;
pub mod cipher;
pub mod codec;
pub mod codes;
pub mod frame;
pub mod message;
pub mod parser;
pub mod reply;
pub mod stream_parser;

pub use builder::LineBuilder;
pub use cipher::SessionCipher;
pub use codec::SiaCodec;
pub use codes::EventCode;
pub use frame::Frame;
pub use message::{EventData, MessageType, SiaMessage};
pub use parser::MessageParser;
pub use reply::{AckTerminator, Reply};
pub use stream_parser::{DrainFrames, ParserState, StreamParser};
