use crate::{
    Error, ID_LEN, MACHINE_ID_LEN, MachineId, Result, decode_base62, encode_base62,
};
use core::fmt;
use core::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Width of the timestamp field in bytes.
pub const TIMESTAMP_LEN: usize = 8;
/// Width of the sequence field in bytes.
pub const SEQUENCE_LEN: usize = 2;
/// Width of the entropy field in bytes.
pub const ENTROPY_LEN: usize = 4;

const MACHINE_OFFSET: usize = TIMESTAMP_LEN;
const SEQUENCE_OFFSET: usize = MACHINE_OFFSET + MACHINE_ID_LEN;
const ENTROPY_OFFSET: usize = SEQUENCE_OFFSET + SEQUENCE_LEN;

/// Largest millisecond timestamp that downstream consumers (JSON, JS dates)
/// can represent losslessly: 2^53 - 1.
pub(crate) const MAX_TIMESTAMP_MILLIS: u64 = (1 << 53) - 1;

/// A 160-bit, time-sortable identifier.
///
/// Four fixed-width fields packed big-endian:
///
/// ```text
/// +----------------+----------------+---------------+--------------+
/// | timestamp (8B) | machine id (6B)| sequence (2B) | entropy (4B) |
/// +----------------+----------------+---------------+--------------+
/// |<------------- MSB ------ 20 bytes ------ LSB ---------------->|
/// ```
///
/// The timestamp is microseconds since the Unix epoch, so numeric order is
/// generation order per instance; the byte representation is big-endian, so
/// derived `Ord` and the base62 string form sort identically.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlakeId {
    bytes: [u8; ID_LEN],
}

impl FlakeId {
    /// Packs the four fields into an identifier.
    pub fn from_parts(
        timestamp_micros: u64,
        machine_id: &MachineId,
        sequence: u16,
        entropy: [u8; ENTROPY_LEN],
    ) -> Self {
        let mut bytes = [0u8; ID_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&timestamp_micros.to_be_bytes());
        bytes[MACHINE_OFFSET..SEQUENCE_OFFSET].copy_from_slice(machine_id.as_bytes());
        bytes[SEQUENCE_OFFSET..ENTROPY_OFFSET].copy_from_slice(&sequence.to_be_bytes());
        bytes[ENTROPY_OFFSET..].copy_from_slice(&entropy);
        Self { bytes }
    }

    /// Builds an identifier from its raw 20-byte representation.
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self { bytes }
    }

    /// Returns the raw big-endian byte representation.
    pub const fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.bytes
    }

    /// Returns the embedded timestamp in microseconds.
    pub fn timestamp_micros(&self) -> u64 {
        let mut field = [0u8; TIMESTAMP_LEN];
        field.copy_from_slice(&self.bytes[..TIMESTAMP_LEN]);
        u64::from_be_bytes(field)
    }

    /// Returns the machine discriminator field.
    pub fn machine_bytes(&self) -> [u8; MACHINE_ID_LEN] {
        let mut field = [0u8; MACHINE_ID_LEN];
        field.copy_from_slice(&self.bytes[MACHINE_OFFSET..SEQUENCE_OFFSET]);
        field
    }

    /// Returns the intra-tick sequence number.
    pub fn sequence(&self) -> u16 {
        let mut field = [0u8; SEQUENCE_LEN];
        field.copy_from_slice(&self.bytes[SEQUENCE_OFFSET..ENTROPY_OFFSET]);
        u16::from_be_bytes(field)
    }

    /// Returns the entropy field.
    pub fn entropy(&self) -> [u8; ENTROPY_LEN] {
        let mut field = [0u8; ENTROPY_LEN];
        field.copy_from_slice(&self.bytes[ENTROPY_OFFSET..]);
        field
    }

    /// Encodes this identifier as a fixed-length base62 string.
    ///
    /// The output is always exactly [`ENCODED_LEN`] ASCII characters and
    /// sorts lexicographically in numeric order.
    ///
    /// [`ENCODED_LEN`]: crate::ENCODED_LEN
    pub fn encode(&self) -> String {
        encode_base62(&self.bytes)
    }

    /// Decodes a base62 string back into an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCharacter`] for bytes outside the alphabet
    /// and [`Error::DecodeOverflow`] for values that do not fit in 160 bits.
    pub fn decode(encoded: &str) -> Result<Self> {
        decode_base62(encoded).map(Self::from_bytes)
    }

    /// Returns the embedded timestamp truncated to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOverflow`] when the millisecond value
    /// exceeds the losslessly exchangeable range.
    pub fn timestamp_millis(&self) -> Result<u64> {
        let millis = self.timestamp_micros() / 1_000;
        if millis > MAX_TIMESTAMP_MILLIS {
            return Err(Error::TimestampOverflow { millis });
        }
        Ok(millis)
    }

    /// Returns the embedded timestamp as a point in time at millisecond
    /// resolution.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FlakeId::timestamp_millis`].
    pub fn timestamp(&self) -> Result<SystemTime> {
        let millis = self.timestamp_millis()?;
        Ok(UNIX_EPOCH + Duration::from_millis(millis))
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("timestamp_micros", &self.timestamp_micros())
            .field("machine", &self.machine_bytes())
            .field("sequence", &self.sequence())
            .field("entropy", &self.entropy())
            .finish()
    }
}

impl FromStr for FlakeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl AsRef<[u8]> for FlakeId {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
