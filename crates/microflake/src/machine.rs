use crate::{RandSource, ThreadRandom};
use mac_address::MacAddressIterator;
use sha2::{Digest, Sha256};

/// Number of bytes in a machine discriminator.
pub const MACHINE_ID_LEN: usize = 6;

/// A 6-byte discriminator identifying the generating machine and process.
///
/// Derived once at generator construction. When a hardware network address
/// is available, the discriminator is a SHA-256 digest of that address
/// combined with the process id, truncated to 6 bytes: this differentiates
/// processes on the same machine without leaking the raw hardware address.
/// Otherwise it degrades to fresh random bytes.
///
/// The discriminator is not required to be globally unique, and stability
/// across process restarts is best-effort: it only needs to reduce collision
/// probability across concurrently running generators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MachineId([u8; MACHINE_ID_LEN]);

impl MachineId {
    /// Derives a discriminator for this machine and process.
    ///
    /// When `use_hardware` is true, enumerates network interfaces and uses
    /// the first non-zero hardware address (loopback reports all zeros).
    /// Falls back to random bytes when `use_hardware` is false, when no
    /// usable interface exists, or when enumeration fails. Never errors.
    pub fn new(use_hardware: bool) -> Self {
        if use_hardware {
            if let Some(mac) = first_hardware_address() {
                return Self::from_hardware(mac, std::process::id());
            }
        }
        Self::random()
    }

    /// Builds a discriminator from explicit bytes.
    ///
    /// Primarily useful for tests or for callers that manage their own
    /// machine identity.
    pub const fn from_bytes(bytes: [u8; MACHINE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// A discriminator of fresh random bytes.
    pub fn random() -> Self {
        let r: u64 = ThreadRandom.rand();
        let mut bytes = [0u8; MACHINE_ID_LEN];
        bytes.copy_from_slice(&r.to_be_bytes()[..MACHINE_ID_LEN]);
        Self(bytes)
    }

    fn from_hardware(mac: [u8; 6], pid: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(mac);
        hasher.update(pid.to_be_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; MACHINE_ID_LEN];
        bytes.copy_from_slice(&digest[..MACHINE_ID_LEN]);
        Self(bytes)
    }

    /// Returns the discriminator bytes.
    pub const fn as_bytes(&self) -> &[u8; MACHINE_ID_LEN] {
        &self.0
    }
}

/// Returns the first non-zero hardware address, if any.
fn first_hardware_address() -> Option<[u8; 6]> {
    let iter = MacAddressIterator::new().ok()?;
    iter.map(|addr| addr.bytes()).find(|bytes| bytes != &[0u8; 6])
}
