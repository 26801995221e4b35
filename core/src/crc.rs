//! String fingerprints.
//!
//! [`StringCrc`] is a CRC32 over the UTF-8 bytes of a string. It keys shader
//! variant programs by their option string and names special status variants.

use std::fmt;

/// CRC32 identity of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringCrc(u32);

impl StringCrc {
    /// Fingerprint of the empty string, used for the base (option-free) variant.
    pub const EMPTY: Self = Self(0);

    /// Hash a string.
    pub fn new(value: &str) -> Self {
        Self(crc32fast::hash(value.as_bytes()))
    }

    /// Wrap an already computed CRC value.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The raw CRC value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<&str> for StringCrc {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for StringCrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
