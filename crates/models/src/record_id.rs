//! Identifier normalization
//!
//! Ids reach the store either as integers (direct calls) or as strings
//! (path parameters). Both are folded into a `RecordId` before any comparison.
//! Anything that is not a non-negative integer becomes `None`, which never
//! matches a record, so bad input ends up as "not found" instead of an error.

/// Numeric identity of students and courses.
pub type RecordId = u64;

/// Conversion into a normalized record id.
pub trait IntoRecordId {
    fn into_record_id(self) -> Option<RecordId>;
}

macro_rules! impl_into_record_id_for_ints {
    ($($t:ty),*) => {
        $(
            impl IntoRecordId for $t {
                fn into_record_id(self) -> Option<RecordId> {
                    RecordId::try_from(self).ok()
                }
            }
        )*
    };
}

impl_into_record_id_for_ints!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoRecordId for Option<RecordId> {
    fn into_record_id(self) -> Option<RecordId> {
        self
    }
}

impl IntoRecordId for &str {
    fn into_record_id(self) -> Option<RecordId> {
        parse_record_id(self)
    }
}

impl IntoRecordId for String {
    fn into_record_id(self) -> Option<RecordId> {
        parse_record_id(&self)
    }
}

impl IntoRecordId for &String {
    fn into_record_id(self) -> Option<RecordId> {
        parse_record_id(self)
    }
}

/// Parse a textual id. Surrounding whitespace is ignored; integral decimals
/// such as `"2.0"` or `"1e1"` and unsigned `0x`/`0o`/`0b` literals are accepted.
pub fn parse_record_id(raw: &str) -> Option<RecordId> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(id) = parse_prefixed(s) {
        return id;
    }
    if let Ok(id) = s.parse::<RecordId>() {
        return Some(id);
    }
    // 整数形式的小数（如 "3.0"）同样视为合法 id
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= RecordId::MAX as f64 {
        Some(value as RecordId)
    } else {
        None
    }
}

/// `Some(..)` when `s` carries a radix prefix, whether or not the digits are valid.
fn parse_prefixed(s: &str) -> Option<Option<RecordId>> {
    let radix = match s.get(..2)?.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    Some(RecordId::from_str_radix(digits, radix).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_normalize_to_themselves() {
        assert_eq!(7u64.into_record_id(), Some(7));
        assert_eq!(7i32.into_record_id(), Some(7));
        assert_eq!(7usize.into_record_id(), Some(7));
    }

    #[test]
    fn negative_integers_never_match() {
        assert_eq!((-1i64).into_record_id(), None);
    }

    #[test]
    fn strings_are_parsed_numerically() {
        assert_eq!("12".into_record_id(), Some(12));
        assert_eq!(" 3 ".into_record_id(), Some(3));
        assert_eq!("2.0".into_record_id(), Some(2));
        assert_eq!(String::from("1e1").into_record_id(), Some(10));
    }

    #[test]
    fn radix_prefixed_strings_are_accepted() {
        assert_eq!("0x10".into_record_id(), Some(16));
        assert_eq!("0X1f".into_record_id(), Some(31));
        assert_eq!("0o7".into_record_id(), Some(7));
        assert_eq!(" 0b11 ".into_record_id(), Some(3));
        for raw in ["0x", "0x+1", "-0x10", "0b2", "0o8", "0xg"] {
            assert_eq!(parse_record_id(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn malformed_strings_fail_closed() {
        for raw in ["", "  ", "abc", "1.5", "-4", "NaN", "inf", "4abc"] {
            assert_eq!(parse_record_id(raw), None, "{raw:?} should not parse");
        }
    }
}
