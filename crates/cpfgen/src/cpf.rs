use crate::{Error, Result, check_digit};
use core::fmt;

/// Number of digits in a base sequence (before check digits).
pub const BASE_LEN: usize = 9;
/// Number of digits in a complete CPF.
pub const CPF_LEN: usize = 11;

/// The first 9 digits of a CPF: 8 free positions followed by the region
/// digit.
///
/// Instances are normally produced by [`ExhaustiveBases`] or [`RandomBases`];
/// [`BaseDigits::complete`] turns one into a full [`Cpf`].
///
/// [`ExhaustiveBases`]: crate::ExhaustiveBases
/// [`RandomBases`]: crate::RandomBases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BaseDigits([u8; BASE_LEN]);

impl BaseDigits {
    /// Wraps a raw digit array. Every element must be in `0..=9`.
    #[must_use]
    pub fn new(digits: [u8; BASE_LEN]) -> Self {
        debug_assert!(digits.iter().all(|&d| d <= 9));
        Self(digits)
    }

    /// The underlying digits in order.
    #[must_use]
    pub const fn digits(&self) -> &[u8; BASE_LEN] {
        &self.0
    }

    /// The region digit (position 8).
    #[must_use]
    pub const fn region_digit(&self) -> u8 {
        self.0[BASE_LEN - 1]
    }

    /// Appends both check digits, producing a valid [`Cpf`].
    ///
    /// The second check digit is computed over the 10-digit sequence that
    /// includes the first, so the two computations are strictly ordered.
    #[must_use]
    pub fn complete(&self) -> Cpf {
        let mut digits = [0u8; CPF_LEN];
        digits[..BASE_LEN].copy_from_slice(&self.0);
        digits[BASE_LEN] = check_digit(&digits[..BASE_LEN]);
        digits[BASE_LEN + 1] = check_digit(&digits[..BASE_LEN + 1]);
        Cpf(digits)
    }
}

impl fmt::Display for BaseDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A complete, checksum-valid 11-digit CPF.
///
/// Invariants established by [`BaseDigits::complete`]:
/// `digit[9] = check_digit(digits[0..9])` and
/// `digit[10] = check_digit(digits[0..10])`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_LEN]);

impl Cpf {
    /// The underlying digits in order, check digits last.
    #[must_use]
    pub const fn digits(&self) -> &[u8; CPF_LEN] {
        &self.0
    }

    /// The two trailing check digits.
    #[must_use]
    pub const fn check_digits(&self) -> (u8, u8) {
        (self.0[CPF_LEN - 2], self.0[CPF_LEN - 1])
    }

    /// Renders the number in the requested textual format.
    #[must_use]
    pub fn render(&self, format: CpfFormat) -> String {
        let mut out = String::with_capacity(CPF_LEN + 4);
        for (i, &d) in self.0.iter().enumerate() {
            match format {
                CpfFormat::Bare => {}
                CpfFormat::Dotted => match i {
                    3 | 6 => out.push('.'),
                    9 => out.push('-'),
                    _ => {}
                },
                CpfFormat::Dashed => {
                    if i == 9 {
                        out.push('-');
                    }
                }
            }
            out.push(char::from(b'0' + d));
        }
        out
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(CpfFormat::Bare))
    }
}

/// The three supported textual renderings of a CPF.
///
/// A closed enumeration rather than a raw numeric code: unsupported codes
/// fail at construction via [`TryFrom<u8>`], never silently at write time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpfFormat {
    /// Code 1: `11122233396`
    #[default]
    Bare,
    /// Code 2: `111.222.333-96`
    Dotted,
    /// Code 3: `111222333-96`
    Dashed,
}

impl CpfFormat {
    /// The numeric code this format is selected by on the command line.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Bare => 1,
            Self::Dotted => 2,
            Self::Dashed => 3,
        }
    }
}

impl TryFrom<u8> for CpfFormat {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Bare),
            2 => Ok(Self::Dotted),
            3 => Ok(Self::Dashed),
            other => Err(Error::InvalidFormat(other)),
        }
    }
}
