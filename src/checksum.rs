use serde::{Serialize, Serializer};
use std::fmt;

/// CRC-32 (ISO-HDLC) fingerprint of a full image.
///
/// Displays as uppercase hex without zero padding, which is the text searched
/// for in patch headers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Checksum(u32);

impl Checksum {
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(data);
        Checksum(hasher.finalize())
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Checksum {
    fn from(value: u32) -> Self {
        Checksum(value)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl Serialize for Checksum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
