use std::fmt;

use crate::error::NutsError;

/// Hierarchy level of a NUTS code: level 1 is the coarsest, level 3 the
/// finest. Each level is a fixed-length truncation of the full code, so only
/// level-3 codes are ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutsLevel {
    One,
    Two,
    Three,
}

impl NutsLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            NutsLevel::One => 1,
            NutsLevel::Two => 2,
            NutsLevel::Three => 3,
        }
    }

    /// Truncate a level-3 code to this level: the two-character country
    /// prefix plus one character per level.
    pub fn truncate(self, code: &str) -> &str {
        let len = 2 + self.as_u8() as usize;
        match code.char_indices().nth(len) {
            Some((idx, _)) => &code[..idx],
            None => code,
        }
    }
}

impl TryFrom<u8> for NutsLevel {
    type Error = NutsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NutsLevel::One),
            2 => Ok(NutsLevel::Two),
            3 => Ok(NutsLevel::Three),
            other => Err(NutsError::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for NutsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_convert_from_integers() {
        assert_eq!(NutsLevel::try_from(1).unwrap(), NutsLevel::One);
        assert_eq!(NutsLevel::try_from(2).unwrap(), NutsLevel::Two);
        assert_eq!(NutsLevel::try_from(3).unwrap(), NutsLevel::Three);
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        assert!(matches!(
            NutsLevel::try_from(0),
            Err(NutsError::InvalidLevel(0))
        ));
        assert!(matches!(
            NutsLevel::try_from(4),
            Err(NutsError::InvalidLevel(4))
        ));
    }

    #[test]
    fn truncation_keeps_the_country_prefix() {
        assert_eq!(NutsLevel::Three.truncate("NL333"), "NL333");
        assert_eq!(NutsLevel::Two.truncate("NL333"), "NL33");
        assert_eq!(NutsLevel::One.truncate("NL333"), "NL3");
    }

    #[test]
    fn truncation_of_short_codes_is_lenient() {
        // A code already at or below the requested length passes through.
        assert_eq!(NutsLevel::Three.truncate("NL3"), "NL3");
    }
}
