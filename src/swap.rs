//! Byte-order reversal for fixed-width quantities.
//!
//! These operate on raw bit patterns. Signed values go through an `as` cast
//! on either side, so sign never affects the result.

/// Reverses the byte order of a 16-bit value.
#[inline]
pub const fn swap16(v: u16) -> u16 {
    (v >> 8) | (v << 8)
}

/// Reverses the byte order of a 32-bit value.
#[inline]
pub const fn swap32(v: u32) -> u32 {
    ((v >> 24) & 0x0000_00ff)
        | ((v >> 8) & 0x0000_ff00)
        | ((v << 8) & 0x00ff_0000)
        | ((v << 24) & 0xff00_0000)
}

/// Reverses the byte order of a 64-bit value.
#[inline]
pub const fn swap64(v: u64) -> u64 {
    ((swap32(v as u32) as u64) << 32) | (swap32((v >> 32) as u32) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap16() {
        assert_eq!(swap16(0x1234), 0x3412);
        assert_eq!(swap16(0x00ff), 0xff00);
        assert_eq!(swap16(0), 0);
        assert_eq!(swap16(u16::MAX), u16::MAX);
    }

    #[test]
    fn test_swap32() {
        assert_eq!(swap32(0x1234_5678), 0x7856_3412);
        assert_eq!(swap32(0x0000_0001), 0x0100_0000);
        assert_eq!(swap32(0x8000_0000), 0x0000_0080);
    }

    #[test]
    fn test_swap64() {
        assert_eq!(swap64(0x0102_0304_0506_0708), 0x0807_0605_0403_0201);
        assert_eq!(swap64(1), 1 << 56);
    }

    #[test]
    fn test_swap_is_involution() {
        for v in [0u64, 1, 0xdead_beef, u64::MAX, 0x8000_0000_0000_0001] {
            assert_eq!(swap64(swap64(v)), v);
            assert_eq!(swap32(swap32(v as u32)), v as u32);
            assert_eq!(swap16(swap16(v as u16)), v as u16);
        }
    }

    #[test]
    fn test_swap_matches_std() {
        for v in [0x0123_4567_89ab_cdefu64, 0xfedc_ba98_7654_3210, 42] {
            assert_eq!(swap64(v), v.swap_bytes());
            assert_eq!(swap32(v as u32), (v as u32).swap_bytes());
            assert_eq!(swap16(v as u16), (v as u16).swap_bytes());
        }
    }

    #[test]
    fn test_swap_signed_bit_pattern() {
        let v: i32 = -2;
        let swapped = swap32(v as u32) as i32;
        assert_eq!(swapped, v.swap_bytes());
        assert_eq!(swap32(swapped as u32) as i32, v);

        let s: i16 = i16::MIN;
        assert_eq!(swap16(s as u16) as i16, 0x0080);
    }
}
