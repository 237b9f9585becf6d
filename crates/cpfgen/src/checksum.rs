/// Computes a single CPF check digit over an ordered digit sequence.
///
/// Each digit is multiplied by a descending weight starting at
/// `digits.len() + 1` and ending at `2`. The weighted sum is multiplied by
/// 10 and reduced modulo 11; a remainder of 10 maps to 0.
///
/// A full CPF needs two applications: once over the 9 base digits (weights
/// `10..=2`) and once over the resulting 10 digits (weights `11..=2`).
///
/// # Example
///
/// ```
/// use cpfgen::check_digit;
///
/// let base = [1, 1, 1, 2, 2, 2, 3, 3, 3];
/// let first = check_digit(&base);
/// assert_eq!(first, 9);
/// ```
#[must_use]
pub fn check_digit(digits: &[u8]) -> u8 {
    let mut sum = 0usize;
    let mut weight = digits.len() + 1;
    for &digit in digits {
        sum += weight * usize::from(digit);
        weight -= 1;
    }
    let rem = (sum * 10) % 11;
    if rem == 10 { 0 } else { rem as u8 }
}
