//! Store-assigned person identifiers
//!
//! 12 bytes rendered as 24 hex characters:
//! 4 bytes seconds since the epoch, 5 random per-process bytes, 3 byte counter.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ID_BYTES: usize = 12;
const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_BYTES: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Returned when a string does not have the identifier shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedId(pub String);

impl fmt::Display for MalformedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cast to PersonId failed for value \"{}\": expected {} hex characters",
            self.0,
            ID_BYTES * 2
        )
    }
}

impl std::error::Error for MalformedId {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId([u8; ID_BYTES]);

impl PersonId {
    /// Generates a fresh identifier. Ids from one process sort in creation order.
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let process = PROCESS_BYTES.get_or_init(|| rand::thread_rng().gen());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..=COUNTER_MASK)))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0u8; ID_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parses the 24 hex character form. Case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, MalformedId> {
        let malformed = || MalformedId(raw.to_string());

        if raw.len() != ID_BYTES * 2 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let mut bytes = [0u8; ID_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&raw[i * 2..i * 2 + 2], 16).map_err(|_| malformed())?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for PersonId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
