use std::fmt;
use std::str::FromStr;

use crate::error::Bip32Error;

/// First hardened child index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

pub fn harden(index: u32) -> u32 {
    index | HARDENED_OFFSET
}

pub fn is_hardened(index: u32) -> bool {
    index >= HARDENED_OFFSET
}

/// A sequence of child indices, optionally anchored at the master node.
///
/// Parsed from strings like `m/1852'/1815'/0'/0/0`; the `'`, `h` and `"`
/// suffixes all mark a hardened index. A path without the leading `m` is
/// relative and can be applied to any node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    absolute: bool,
    indices: Vec<u32>,
}

impl DerivationPath {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { absolute: false, indices }
    }

    pub fn absolute(indices: Vec<u32>) -> Self {
        Self { absolute: true, indices }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

fn parse_index(part: &str) -> Result<u32, Bip32Error> {
    let (digits, hardened) = match part.strip_suffix(['\'', 'h', '"']) {
        Some(digits) => (digits, true),
        None => (part, false),
    };
    let index: u32 = digits.parse().map_err(|_| Bip32Error::InvalidPath)?;
    if index >= HARDENED_OFFSET {
        return Err(Bip32Error::InvalidPath);
    }
    Ok(if hardened { harden(index) } else { index })
}

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Bip32Error::InvalidPath);
        }
        let mut parts = s.split('/').peekable();
        let absolute = parts.peek() == Some(&"m");
        if absolute {
            parts.next();
        }
        let indices = parts.map(parse_index).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { absolute, indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separate = false;
        if self.absolute {
            f.write_str("m")?;
            separate = true;
        }
        for &index in &self.indices {
            if separate {
                f.write_str("/")?;
            }
            separate = true;
            if is_hardened(index) {
                write!(f, "{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "{index}")?;
            }
        }
        Ok(())
    }
}
