//! Wire primitives shared by every message family.

mod cursor;
mod primitives;
mod raw;
mod sequence;
pub mod varint;

pub use cursor::{ByteCursor, ByteWriter, StringMode, put_string};
pub use raw::{Sha256Digest, Token};
pub use sequence::Sequence;
