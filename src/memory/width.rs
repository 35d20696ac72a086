// Fri Oct 16 2026 - Alex

use crate::memory::MemoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element width of a typed view. Elements are little-endian signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewWidth {
    W8,
    W16,
    W32,
}

impl ViewWidth {
    pub const ALL: [ViewWidth; 3] = [ViewWidth::W8, ViewWidth::W16, ViewWidth::W32];

    pub fn from_bits(bits: u32) -> Result<Self, MemoryError> {
        match bits {
            8 => Ok(ViewWidth::W8),
            16 => Ok(ViewWidth::W16),
            32 => Ok(ViewWidth::W32),
            other => Err(MemoryError::UnsupportedWidth(other)),
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            ViewWidth::W8 => 8,
            ViewWidth::W16 => 16,
            ViewWidth::W32 => 32,
        }
    }

    pub fn size(&self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Truncates `value` to this width with two's complement wraparound.
    pub fn wrap(&self, value: i64) -> i32 {
        match self {
            ViewWidth::W8 => value as i8 as i32,
            ViewWidth::W16 => value as i16 as i32,
            ViewWidth::W32 => value as i32,
        }
    }

    pub fn min_value(&self) -> i32 {
        match self {
            ViewWidth::W8 => i8::MIN as i32,
            ViewWidth::W16 => i16::MIN as i32,
            ViewWidth::W32 => i32::MIN,
        }
    }

    pub fn max_value(&self) -> i32 {
        match self {
            ViewWidth::W8 => i8::MAX as i32,
            ViewWidth::W16 => i16::MAX as i32,
            ViewWidth::W32 => i32::MAX,
        }
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> i32 {
        match self {
            ViewWidth::W8 => bytes[0] as i8 as i32,
            ViewWidth::W16 => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
            ViewWidth::W32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }

    pub(crate) fn encode(&self, value: i32, out: &mut [u8]) {
        match self {
            ViewWidth::W8 => out[0] = value as i8 as u8,
            ViewWidth::W16 => out[..2].copy_from_slice(&(value as i16).to_le_bytes()),
            ViewWidth::W32 => out[..4].copy_from_slice(&value.to_le_bytes()),
        }
    }
}

impl FromStr for ViewWidth {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_suffix("array").unwrap_or(&lowered);
        let digits = name
            .strip_prefix("int")
            .or_else(|| name.strip_prefix('i'))
            .unwrap_or(name);

        match digits.parse::<u32>() {
            Ok(bits) => Self::from_bits(bits),
            Err(_) => Err(MemoryError::UnknownWidthName(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ViewWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(ViewWidth::from_bits(16).unwrap(), ViewWidth::W16);
        assert!(matches!(ViewWidth::from_bits(64), Err(MemoryError::UnsupportedWidth(64))));
        assert!(matches!(ViewWidth::from_bits(0), Err(MemoryError::UnsupportedWidth(0))));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("8".parse::<ViewWidth>().unwrap(), ViewWidth::W8);
        assert_eq!("i16".parse::<ViewWidth>().unwrap(), ViewWidth::W16);
        assert_eq!("int32".parse::<ViewWidth>().unwrap(), ViewWidth::W32);
        assert_eq!("Int16Array".parse::<ViewWidth>().unwrap(), ViewWidth::W16);
        assert!(matches!("64".parse::<ViewWidth>(), Err(MemoryError::UnsupportedWidth(64))));
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for name in ["intint16", "iii8", "ii16", "int", "Int16ArrayArray"] {
            assert!(
                matches!(name.parse::<ViewWidth>(), Err(MemoryError::UnknownWidthName(ref n)) if n == name),
                "{} should be rejected",
                name
            );
        }

        let err = "Float64Array".parse::<ViewWidth>().unwrap_err();
        assert!(matches!(err, MemoryError::UnknownWidthName(ref n) if n == "Float64Array"));
        assert!(err.to_string().contains("Float64Array"));
        assert!(!err.to_string().contains("0 bits"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(ViewWidth::W8.wrap(255), -1);
        assert_eq!(ViewWidth::W8.wrap(128), -128);
        assert_eq!(ViewWidth::W16.wrap(0xFFFF), -1);
        assert_eq!(ViewWidth::W16.wrap(70_000), 70_000 - 65_536);
        assert_eq!(ViewWidth::W32.wrap(1 << 32), 0);
        assert_eq!(ViewWidth::W32.wrap(-5), -5);
    }

    #[test]
    fn test_encode_decode_extremes() {
        for width in ViewWidth::ALL {
            let mut buf = [0u8; 4];
            for value in [width.min_value(), -1, 0, 1, width.max_value()] {
                width.encode(value, &mut buf);
                assert_eq!(width.decode(&buf), value);
            }
        }
    }
}
