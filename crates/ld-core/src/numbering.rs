//! Numbering scheme
//!
//! Participants carry a zero-padded ordinal. The pad width depends on the
//! roster size, never less than three digits, so crossing a power of ten
//! (999 → 1000) changes the width of every number in the roster.

/// Minimum number of digits in a participant number
pub const MIN_NUMBER_WIDTH: usize = 3;

/// Count decimal digits of `n` (0 has one digit)
pub fn digit_count(n: usize) -> usize {
    let mut n = n;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Pad width for a roster of `total` participants
pub fn number_width(total: usize) -> usize {
    digit_count(total).max(MIN_NUMBER_WIDTH)
}

/// Format 1-based `index` for a roster of `total` participants
pub fn format_number(index: usize, total: usize) -> String {
    format!("{:0width$}", index, width = number_width(total))
}
