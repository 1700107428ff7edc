//! Compact, coordination-free, k-sortable identifiers.
//!
//! A `microflake` id packs a microsecond timestamp, a 6-byte machine
//! discriminator, an intra-tick sequence counter, and 4 bytes of fresh
//! entropy into 160 bits, rendered as a fixed 27-character base62 string.
//! Lexicographic order of the strings matches numeric order of the packed
//! value, so ids sort by generation time with no central issuer.
//!
//! ```
//! use microflake::{FlakeGenerator, extract_timestamp};
//!
//! let generator = FlakeGenerator::new();
//! let id = generator.generate();
//! let when = extract_timestamp(&id.encode()).unwrap();
//! ```

mod base62;
mod error;
mod generator;
mod id;
mod machine;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::machine::*;
pub use crate::rand::*;
pub use crate::time::*;
