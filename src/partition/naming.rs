//! # Part Naming Scheme
//!
//! Pure mapping between a part index and a physical record name.
//! Index 0 is the base record (no suffix); index k >= 1 is the base name
//! with a `-k` suffix. A name with a non-numeric suffix after the trailing
//! hyphen is not a part of the logical document.

use super::errors::{PartitionError, PartitionResult};

/// Identifies one physical record of a logical document. 0 is the base.
pub type PartIndex = u32;

/// Render the physical record name for a part index.
pub fn part_name(base: &str, index: PartIndex) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, index)
    }
}

/// Recognize a physical name as a part of `base`, returning its index.
///
/// Exact equality matches the base record; otherwise the name must be the
/// base followed by `-` and a non-empty all-digit suffix.
pub fn parse_part_name(base: &str, name: &str) -> Option<PartIndex> {
    if name == base {
        return Some(0);
    }
    let suffix = name.strip_prefix(base)?.strip_prefix('-')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Validate and normalize a user-supplied base name.
///
/// Callers always address the base record; a name whose last `-` segment
/// is numeric already names a specific part and is rejected.
pub fn clean_base_name(name: &str) -> PartitionResult<String> {
    let clean = name.trim();
    if let Some((_, last)) = clean.rsplit_once('-') {
        if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PartitionError::MultipartNameGiven(clean.to_string()));
        }
    }
    Ok(clean.to_string())
}
