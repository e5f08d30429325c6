//! Mask-based accessors for packed bytes.
//!
//! Point records and the global encoding word pack several small fields into
//! single bytes. These helpers read and write those fields through masks, so
//! the layouts themselves stay declarative constant tables.

/// Returns true if any bit of the mask is set.
pub fn is_set(byte: u8, mask: u8) -> bool {
    byte & mask != 0
}

/// Sets or clears the masked bits according to the flag.
pub fn apply(byte: u8, mask: u8, flag: bool) -> u8 {
    if flag { byte | mask } else { byte & !mask }
}

/// Returns the masked bits of a low-aligned field.
pub fn get(byte: u8, mask: u8) -> u8 {
    byte & mask
}

/// Returns the masked bits shifted down to a value.
pub fn get_shifted(byte: u8, mask: u8, shift: u8) -> u8 {
    (byte & mask) >> shift
}

/// Writes a value into a low-aligned field, truncating to the mask.
pub fn set(byte: u8, value: u8, mask: u8) -> u8 {
    (byte & !mask) | (value & mask)
}

/// Writes a value into a shifted field, truncating to the mask.
pub fn set_shifted(byte: u8, value: u8, mask: u8, shift: u8) -> u8 {
    (byte & !mask) | ((value << shift) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(!is_set(0b0100, 0b1000));
        assert!(is_set(0b1100, 0b1000));
        assert_eq!(0b1100, apply(0b0100, 0b1000, true));
        assert_eq!(0b0100, apply(0b1100, 0b1000, false));
    }

    #[test]
    fn fields() {
        assert_eq!(0b101, get(0b0110_1101, 0b0000_0111));
        assert_eq!(0b110, get_shifted(0b0011_0101, 0b0011_1000, 3));
        assert_eq!(0b0100_0011, set(0b0100_0000, 3, 0b0000_0111));
        assert_eq!(0b0001_0001, set_shifted(0b0000_0001, 2, 0b0011_1000, 3));
    }

    #[test]
    fn values_truncate_to_the_mask() {
        assert_eq!(0b0000_0111, set(0, 0xff, 0b0000_0111));
        assert_eq!(0b0011_1000, set_shifted(0, 0xff, 0b0011_1000, 3));
    }
}
