//! Sensor full-scale ranges
//!
//! Each range yields both the FS bits for its control register and the
//! divisor that converts raw counts at that range. Keeping them in one
//! enum means the register value and the conversion change together.

/// Accelerometer full-scale selection (CTRL1_XL bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    #[default]
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    pub const ALL: [AccelRange; 4] = [Self::G2, Self::G4, Self::G8, Self::G16];

    /// FS_XL field value. The encoding is not monotonic: ±16 g is 0b01.
    pub const fn bits(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G16 => 0b01,
            Self::G4 => 0b10,
            Self::G8 => 0b11,
        }
    }

    /// Counts per g
    pub const fn divisor(self) -> i16 {
        match self {
            Self::G2 => 16383,
            Self::G4 => 8191,
            Self::G8 => 4095,
            Self::G16 => 2047,
        }
    }

    /// Full scale in g
    pub const fn full_scale(self) -> u16 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    pub fn from_full_scale(g: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.full_scale() == g)
    }
}

/// Gyroscope full-scale selection (CTRL2_G bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    #[default]
    Dps245,
    Dps500,
    Dps1000,
    Dps2000,
}

impl GyroRange {
    pub const ALL: [GyroRange; 4] = [Self::Dps245, Self::Dps500, Self::Dps1000, Self::Dps2000];

    pub const fn bits(self) -> u8 {
        match self {
            Self::Dps245 => 0b00,
            Self::Dps500 => 0b01,
            Self::Dps1000 => 0b10,
            Self::Dps2000 => 0b11,
        }
    }

    /// Counts per degree/second, rounded
    pub const fn divisor(self) -> i16 {
        match self {
            Self::Dps245 => 134,
            Self::Dps500 => 66,
            Self::Dps1000 => 33,
            Self::Dps2000 => 16,
        }
    }

    pub const fn full_scale(self) -> u16 {
        match self {
            Self::Dps245 => 245,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    pub fn from_full_scale(dps: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.full_scale() == dps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisors_track_full_scale() {
        for r in AccelRange::ALL {
            let expected = i32::from(i16::MAX) / i32::from(r.full_scale());
            assert_eq!(i32::from(r.divisor()), expected);
        }
        for r in GyroRange::ALL {
            let exact = f32::from(i16::MAX) / f32::from(r.full_scale());
            assert!((f32::from(r.divisor()) - exact).abs() <= 0.5, "{:?}", r);
        }
    }

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = [false; 4];
        for r in AccelRange::ALL {
            assert!(!seen[r.bits() as usize]);
            seen[r.bits() as usize] = true;
        }
    }

    #[test]
    fn test_from_full_scale() {
        assert_eq!(AccelRange::from_full_scale(16), Some(AccelRange::G16));
        assert_eq!(AccelRange::from_full_scale(3), None);
        assert_eq!(GyroRange::from_full_scale(245), Some(GyroRange::Dps245));
        assert_eq!(GyroRange::from_full_scale(250), None);
    }
}
