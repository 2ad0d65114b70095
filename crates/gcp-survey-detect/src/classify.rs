//! Color classification: from ROI statistics to a marker clock label.
//!
//! Each clock position carries a two-color disk; the palette is chosen so
//! that the mean hue of a half/half pair lands far from every other pair:
//!
//! | label | colors            | label | colors           |
//! |-------|-------------------|-------|------------------|
//! | 1     | orange/orange     | 7     | grass/grass      |
//! | 2     | orange/emerald    | 8     | grass/blue       |
//! | 3     | emerald/emerald   | 9     | blue/blue        |
//! | 4     | emerald/purple    | 10    | blue/magenta     |
//! | 5     | purple/purple     | 11    | magenta/magenta  |
//! | 6     | purple/grass      | 12    | magenta/orange   |
//!
//! A solid disk has near-zero hue deviation and its mean hue picks the bin
//! directly; a two-color disk straddles two bins, so the deviation says which
//! regime applies and the bin grid shifts by half a bin. The table is a fixed
//! decision table tuned to this palette, not a learned classifier, and it is
//! total: every statistics triple maps to some label in 1..=12, even under
//! hopelessly ambiguous input. No confidence is propagated.

use crate::candidate::CandidateShape;
use crate::hsv::{roi_stats, HsvImage, RoiStats};

/// Hue deviation below which the ROI is considered a single solid color.
const SOLID_HUE_DEV: f64 = 20.0;
/// Hue deviation below which the ROI is considered a clean two-color split;
/// anything above is treated as mixed/ambiguous.
const TWO_TONE_HUE_DEV: f64 = 64.0;
/// Value deviation separating flat lighting from a strong light/dark split.
const SOLID_VALUE_DEV: f64 = 16.0;
/// Value deviation bound used on the ambiguous branches.
const MIXED_VALUE_DEV: f64 = 32.0;
/// Width of one hue bin.
const HUE_BIN: f64 = 64.0;

/// Hue-spread regime of a sampled ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HueSpread {
    /// Near-uniform hue: a solid-color disk.
    Solid,
    /// Two dominant hues in comparable amounts.
    TwoTone,
    /// No dominant hue structure.
    Mixed,
}

impl HueSpread {
    fn of(hue_std_dev: f64) -> Self {
        if hue_std_dev < SOLID_HUE_DEV {
            Self::Solid
        } else if hue_std_dev < TWO_TONE_HUE_DEV {
            Self::TwoTone
        } else {
            Self::Mixed
        }
    }
}

/// Map ROI color statistics to a marker clock label (1..=12).
pub fn classify_stats(stats: &RoiStats) -> u8 {
    match HueSpread::of(stats.hue_std_dev) {
        HueSpread::Solid => {
            let bin = ((stats.hue_mean / HUE_BIN) as usize).min(3);
            if stats.value_std_dev < SOLID_VALUE_DEV {
                [1, 2, 3, 4][bin]
            } else {
                [5, 6, 7, 8][bin]
            }
        }
        HueSpread::TwoTone => {
            // Half-bin shift centres the grid on the pairwise hue midpoints.
            let bin = ((stats.hue_mean + HUE_BIN / 2.0) / HUE_BIN) as usize;
            match bin {
                0 => 5,
                1 => 9,
                2 => 10,
                3 => {
                    // The pair palette for 11 vs 8 does not separate in hue
                    // alone; the value split disambiguates.
                    if stats.value_std_dev < MIXED_VALUE_DEV {
                        11
                    } else {
                        8
                    }
                }
                _ => 8,
            }
        }
        HueSpread::Mixed => {
            if stats.value_std_dev < MIXED_VALUE_DEV {
                12
            } else {
                8
            }
        }
    }
}

/// Classify one accepted candidate against the HSV image it came from.
///
/// The sampled ROI is a square centred on the candidate's enclosing-circle
/// centre with half side `minor_axis / 4`, which keeps the sample inside the
/// solid interior and away from the black/white edge ring.
pub fn classify_candidate(candidate: &CandidateShape, hsv: &HsvImage) -> u8 {
    let half_side = candidate.ellipse.minor_axis() / 4.0;
    let stats = roi_stats(hsv, candidate.center_px(), half_side);
    let label = classify_stats(&stats);
    log::debug!(
        "candidate at {:?}: hue {:.1}±{:.1}, value ±{:.1} -> label {label}",
        candidate.center_px(),
        stats.hue_mean,
        stats.hue_std_dev,
        stats.value_std_dev,
    );
    label
}
