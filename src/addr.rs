//! Translation from kernel-segment virtual addresses to physical addresses.

use crate::branch::Addr;
use crate::error::*;

/// Cached kernel segment (kseg0).
const KSEG0_BASE: u32 = 0x8000_0000;
const KSEG0_LAST: u32 = 0x9fff_ffff;

/// Uncached kernel segment (kseg1).
const KSEG1_BASE: u32 = 0xa000_0000;
const KSEG1_LAST: u32 = 0xbfff_ffff;

/// Translate a virtual address into a physical address.
///
/// Both kernel segments map onto the same physical range; any other value
/// is not a valid reference in these traces.
pub fn translate_vaddr(vaddr: u32) -> Option<Addr> {
    match vaddr {
        KSEG0_BASE..=KSEG0_LAST => Some(vaddr - KSEG0_BASE),
        KSEG1_BASE..=KSEG1_LAST => Some(vaddr - KSEG1_BASE),
        _ => None,
    }
}

/// Translate a hexadecimal virtual address string (without a `0x` prefix).
pub fn translate(vaddr: &str) -> Result<Addr> {
    u32::from_str_radix(vaddr, 16)
        .ok()
        .and_then(translate_vaddr)
        .ok_or_else(|| Error::InvalidAddress(vaddr.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kseg0() {
        assert_eq!(translate("80000000").unwrap(), 0);
        assert_eq!(translate("80001234").unwrap(), 0x1234);
        assert_eq!(translate("9fffffff").unwrap(), 0x1fff_ffff);
    }

    #[test]
    fn kseg1() {
        assert_eq!(translate("a0000000").unwrap(), 0);
        assert_eq!(translate("a0400010").unwrap(), 0x40_0010);
        assert_eq!(translate("bfffffff").unwrap(), 0x1fff_ffff);
    }

    #[test]
    fn segments_alias() {
        for v in [0x8000_0000u32, 0x8123_4568, 0x9fff_fffc] {
            let cached = translate_vaddr(v).unwrap();
            let uncached = translate_vaddr(v + 0x2000_0000).unwrap();
            assert_eq!(cached, v - KSEG0_BASE);
            assert_eq!(cached, uncached);
        }
    }

    #[test]
    fn outside_windows() {
        for s in ["00000000", "7fffffff", "c0000000", "ffffffff"] {
            assert!(matches!(translate(s), Err(Error::InvalidAddress(ref v)) if v == s));
        }
    }

    #[test]
    fn not_hex() {
        assert!(translate("8000zz00").is_err());
        assert!(translate("").is_err());
        assert!(translate("100000000").is_err());
    }
}
