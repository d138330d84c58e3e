/// Issues with this many slots or more get 3-digit numbers.
pub const WIDE_PADDING_THRESHOLD: u32 = 100;

pub fn pad_width(total_length: u32) -> usize {
    if total_length >= WIDE_PADDING_THRESHOLD {
        3
    } else {
        2
    }
}

pub fn pad(number: u32, width: usize) -> String {
    format!("{:0width$}", number, width = width)
}

/// Number string for the page at `cursor`: `"NN"` or the inclusive range
/// `"NN - MM"` when the page spans several slots. `None` when the range
/// end does not fit in a `u32`.
pub fn number(cursor: u32, slot_count: u32, total_length: u32) -> Option<String> {
    let width = pad_width(total_length);
    if slot_count > 1 {
        let last = cursor.checked_add(slot_count - 1)?;
        Some(format!("{} - {}", pad(cursor, width), pad(last, width)))
    } else {
        Some(pad(cursor, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(cursor: u32, slot_count: u32, total_length: u32) -> String {
        number(cursor, slot_count, total_length).expect("in range")
    }

    #[test]
    fn short_issues_use_two_digits() {
        assert_eq!(pad_width(9), 2);
        assert_eq!(pad_width(99), 2);
        assert_eq!(numbered(1, 1, 9), "01");
        assert_eq!(numbered(3, 2, 9), "03 - 04");
    }

    #[test]
    fn long_issues_use_three_digits() {
        assert_eq!(pad_width(100), 3);
        assert_eq!(numbered(45, 1, 120), "045");
        assert_eq!(numbered(12, 2, 120), "012 - 013");
    }

    #[test]
    fn wide_spreads_span_the_full_range() {
        assert_eq!(numbered(7, 3, 30), "07 - 09");
    }

    #[test]
    fn range_crossing_a_digit_boundary() {
        assert_eq!(numbered(9, 2, 40), "09 - 10");
        assert_eq!(numbered(99, 2, 150), "099 - 100");
    }

    #[test]
    fn single_slot_is_just_the_padded_cursor() {
        for cursor in 0..150 {
            assert_eq!(numbered(cursor, 1, 150), pad(cursor, 3));
            assert_eq!(
                numbered(cursor, 2, 150),
                format!("{} - {}", pad(cursor, 3), pad(cursor + 1, 3))
            );
        }
    }

    #[test]
    fn range_end_past_u32_max_is_rejected() {
        assert_eq!(numbered(u32::MAX, 1, 9), u32::MAX.to_string());
        assert_eq!(number(u32::MAX, 2, 9), None);
        assert_eq!(number(u32::MAX - 3, 5, 9), None);
    }
}
