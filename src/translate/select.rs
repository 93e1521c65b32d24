//! Channel selection algebra
//!
//! Register references carry one select code per vector component. These
//! helpers turn the four codes into destination write masks and source
//! swizzle text. Constant-forcing codes never map to a channel letter and
//! are rejected wherever one is required.

use crate::error::{Result, TranslationError};
use crate::microcode::SelectCode;

/// Destination component letters in hardware order
const CHANNELS: [char; 4] = ['x', 'y', 'z', 'w'];

/// Collapse masked-out components from a four-select destination
///
/// Returns the channel mask naming the written destination components in
/// xyzw order and the number of active selects. Active selects are
/// compacted to the front of `sels` so a subsequent swizzle build reads
/// exactly the first `count` entries. A count of zero means the caller
/// emits nothing.
pub fn condense_selections(sels: &mut [SelectCode; 4]) -> (String, usize) {
    let mut mask = String::new();
    let mut count = 0;

    for i in 0..4 {
        if sels[i] != SelectCode::Mask {
            sels[count] = sels[i];
            mask.push(CHANNELS[i]);
            count += 1;
        }
    }

    (mask, count)
}

/// Map a select code to its channel letter
pub fn select_channel(sel: SelectCode) -> Result<char> {
    match sel {
        SelectCode::X => Ok('x'),
        SelectCode::Y => Ok('y'),
        SelectCode::Z => Ok('z'),
        SelectCode::W => Ok('w'),
        other => Err(TranslationError::Unsupported(format!(
            "select code {:?} in swizzle",
            other
        ))),
    }
}

/// Append `source` followed by a swizzle of the first `count` selects
///
/// Builds a valid swizzle of length 1-4.
pub fn write_select_vector(
    out: &mut String,
    source: &str,
    sels: &[SelectCode; 4],
    count: usize,
) -> Result<()> {
    out.push_str(source);
    out.push('.');

    for &sel in sels.iter().take(count) {
        out.push(select_channel(sel)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condense_full() {
        let mut sels = [SelectCode::X, SelectCode::Y, SelectCode::Z, SelectCode::W];
        let (mask, count) = condense_selections(&mut sels);
        assert_eq!(mask, "xyzw");
        assert_eq!(count, 4);
    }

    #[test]
    fn test_condense_leading_pair() {
        let mut sels = [
            SelectCode::X,
            SelectCode::Y,
            SelectCode::Mask,
            SelectCode::Mask,
        ];
        let (mask, count) = condense_selections(&mut sels);
        assert_eq!(mask, "xy");
        assert_eq!(count, 2);
        assert_eq!(sels[0], SelectCode::X);
        assert_eq!(sels[1], SelectCode::Y);
    }

    #[test]
    fn test_condense_compacts_trailing_pair() {
        let mut sels = [
            SelectCode::Mask,
            SelectCode::Mask,
            SelectCode::X,
            SelectCode::Y,
        ];
        let (mask, count) = condense_selections(&mut sels);
        assert_eq!(mask, "zw");
        assert_eq!(count, 2);
        // Active selects shifted down for the swizzle build
        assert_eq!(sels[0], SelectCode::X);
        assert_eq!(sels[1], SelectCode::Y);
    }

    #[test]
    fn test_condense_all_masked() {
        let mut sels = [SelectCode::Mask; 4];
        let (mask, count) = condense_selections(&mut sels);
        assert_eq!(mask, "");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_select_channel_letters() {
        assert_eq!(select_channel(SelectCode::X).unwrap(), 'x');
        assert_eq!(select_channel(SelectCode::Y).unwrap(), 'y');
        assert_eq!(select_channel(SelectCode::Z).unwrap(), 'z');
        assert_eq!(select_channel(SelectCode::W).unwrap(), 'w');
    }

    #[test]
    fn test_select_channel_rejects_constants() {
        for sel in [SelectCode::Zero, SelectCode::One, SelectCode::Reserved] {
            let err = select_channel(sel).unwrap_err();
            assert!(matches!(err, TranslationError::Unsupported(_)));
        }
    }

    #[test]
    fn test_write_select_vector_truncates() {
        let mut out = String::new();
        let sels = [SelectCode::X, SelectCode::Y, SelectCode::Z, SelectCode::W];
        write_select_vector(&mut out, "R4", &sels, 2).unwrap();
        assert_eq!(out, "R4.xy");
    }

    #[test]
    fn test_write_select_vector_full() {
        let mut out = String::new();
        let sels = [SelectCode::W, SelectCode::Z, SelectCode::Y, SelectCode::X];
        write_select_vector(&mut out, "texTmp", &sels, 4).unwrap();
        assert_eq!(out, "texTmp.wzyx");
    }
}
