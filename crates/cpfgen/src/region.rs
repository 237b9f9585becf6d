use crate::{Error, Result};

/// State codes historically associated with each region digit (position 8 of
/// the base sequence). Indexed by the digit itself.
pub const REGION_CODES: [&str; 10] = [
    "RS",
    "DF, GO, MS, MT, TO",
    "AC, AM, AP, PA, RO, RR",
    "CE, MA, PI",
    "AL, PB, PE, RN",
    "BA, SE",
    "MG",
    "ES, RJ",
    "SP",
    "PR, SC",
];

/// A non-empty, ordered set of allowed region digits.
///
/// Exhaustive enumeration walks the set in the order given here (innermost
/// loop), so caller order is preserved. Duplicates are folded to their first
/// occurrence. The set is read-only for the lifetime of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSet {
    digits: Vec<u8>,
}

impl RegionSet {
    /// Builds a region set from the given digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegionDigit`] for any digit outside `0..=9`
    /// and [`Error::EmptyRegionSet`] if no digits remain.
    pub fn new(digits: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut seen = [false; 10];
        let mut kept = Vec::new();
        for digit in digits {
            if digit > 9 {
                return Err(Error::InvalidRegionDigit(digit));
            }
            if !seen[usize::from(digit)] {
                seen[usize::from(digit)] = true;
                kept.push(digit);
            }
        }
        if kept.is_empty() {
            return Err(Error::EmptyRegionSet);
        }
        Ok(Self { digits: kept })
    }

    /// The full set `{0..=9}` in ascending order. This is the default when
    /// the caller does not restrict regions.
    #[must_use]
    pub fn all() -> Self {
        Self {
            digits: (0..=9).collect(),
        }
    }

    /// The allowed digits in enumeration order.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Number of allowed digits (at least 1, at most 10).
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always `false`: the set is non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `digit` belongs to the set.
    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.digits.contains(&digit)
    }
}
