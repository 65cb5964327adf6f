//! Register-width selection and the primitive tap-polynomial table.
//!
//! Each entry lists the feedback taps for one register width, 1-indexed from
//! the input end, highest tap first (always equal to the width). Every entry
//! is a primitive polynomial, so a register built from it cycles through all
//! `2^n - 1` non-zero states. The run-length guarantees of the generated
//! signal rest entirely on that property.

use crate::error::{PrbsError, PrbsResult};

/// Smallest supported register width.
pub const MIN_WIDTH: u8 = 2;

/// Largest supported register width.
pub const MAX_WIDTH: u8 = 31;

static TAP_TABLE: [&[u8]; (MAX_WIDTH - MIN_WIDTH + 1) as usize] = [
    &[2, 1],
    &[3, 1],
    &[4, 1],
    &[5, 2],
    &[6, 1],
    &[7, 1],
    &[8, 4, 3, 2],
    &[9, 4],
    &[10, 3],
    &[11, 2],
    &[12, 6, 4, 1],
    &[13, 4, 3, 1],
    &[14, 8, 6, 1],
    &[15, 1],
    &[16, 12, 3, 1],
    &[17, 3],
    &[18, 7],
    &[19, 5, 2, 1],
    &[20, 3],
    &[21, 2],
    &[22, 1],
    &[23, 5],
    &[24, 7, 2, 1],
    &[25, 3],
    &[26, 6, 2, 1],
    &[27, 5, 2, 1],
    &[28, 3],
    &[29, 2],
    &[30, 23, 2, 1],
    &[31, 3],
];

/// A register width paired with its tap polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSpec {
    pub width: u8,
    pub taps: &'static [u8],
}

impl RegisterSpec {
    /// Look up the polynomial for `width`.
    pub fn for_width(width: u8) -> PrbsResult<Self> {
        Ok(Self {
            width,
            taps: taps_for(width)?,
        })
    }

    /// Select the register for run-length bounds `t_max` / `t_min`.
    pub fn for_run_lengths(t_max: usize, t_min: usize) -> PrbsResult<Self> {
        Self::for_width(register_width(t_max, t_min)?)
    }

    /// Feedback mask, bit `t - 1` set for each tap `t`.
    pub fn tap_mask(&self) -> u32 {
        self.taps.iter().fold(0u32, |mask, &t| mask | (1 << (t - 1)))
    }

    /// Number of steps before the register repeats.
    pub fn period(&self) -> u64 {
        period(self.width)
    }
}

/// Tap positions for a register of `width` bits.
pub fn taps_for(width: u8) -> PrbsResult<&'static [u8]> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        return Err(PrbsError::RegisterWidthOutOfRange {
            width: width as usize,
        });
    }
    Ok(TAP_TABLE[(width - MIN_WIDTH) as usize])
}

/// Register width for run-length bounds: `ceil(t_max / t_min)`.
///
/// `t_min` must be non-zero; callers validate parameters first.
pub fn register_width(t_max: usize, t_min: usize) -> PrbsResult<u8> {
    let width = t_max.div_ceil(t_min);

    if width < MIN_WIDTH as usize || width > MAX_WIDTH as usize {
        return Err(PrbsError::RegisterWidthOutOfRange { width });
    }
    if t_max % t_min != 0 {
        return Err(PrbsError::UnrealizableRatio { t_max, t_min });
    }

    Ok(width as u8)
}

/// Maximal-length period `2^width - 1`.
#[inline]
pub fn period(width: u8) -> u64 {
    (1u64 << width) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_table_shape() {
        for width in MIN_WIDTH..=MAX_WIDTH {
            let taps = taps_for(width).unwrap();
            assert_eq!(taps[0], width, "highest tap must equal width {width}");
            assert!(taps.windows(2).all(|w| w[0] > w[1]), "taps descending for {width}");
            assert!(taps.iter().all(|&t| t >= 1));
        }
    }

    #[test]
    fn test_width_bounds() {
        assert!(matches!(
            taps_for(1),
            Err(PrbsError::RegisterWidthOutOfRange { width: 1 })
        ));
        assert!(matches!(
            taps_for(32),
            Err(PrbsError::RegisterWidthOutOfRange { width: 32 })
        ));
    }

    #[test]
    fn test_register_width() {
        assert_eq!(register_width(3, 1).unwrap(), 3);
        assert_eq!(register_width(2, 1).unwrap(), 2);
        assert_eq!(register_width(12, 3).unwrap(), 4);
        assert_eq!(register_width(31, 1).unwrap(), 31);
        assert_eq!(register_width(62, 2).unwrap(), 31);
    }

    #[test]
    fn test_register_width_out_of_range() {
        let err = register_width(32, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, PrbsError::RegisterWidthOutOfRange { width: 32 }));

        let err = register_width(4, 4).unwrap_err();
        assert!(matches!(err, PrbsError::RegisterWidthOutOfRange { width: 1 }));
    }

    #[test]
    fn test_unrealizable_ratio() {
        let err = register_width(5, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, PrbsError::UnrealizableRatio { t_max: 5, t_min: 2 }));
    }

    #[test]
    fn test_spec_lookup() {
        let spec = RegisterSpec::for_run_lengths(3, 1).unwrap();
        assert_eq!(spec.width, 3);
        assert_eq!(spec.taps, &[3, 1]);
        assert_eq!(spec.tap_mask(), 0b101);
        assert_eq!(spec.period(), 7);

        let spec = RegisterSpec::for_width(8).unwrap();
        assert_eq!(spec.tap_mask(), 0b1000_1110);
        assert_eq!(period(31), 2_147_483_647);
    }
}
