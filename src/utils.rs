use alloy::primitives::U256;
use chrono::DateTime;

/// Base-unit scale shared by ETH and the ONX token.
const WEI_DECIMALS: u8 = 18;

/// Marker appended to truncated display values.
pub const ELLIPSIS: &str = "...";

/// Truncate a label to at most `max` characters, appending "..." when cut.
/// Strings at or under the limit come back unchanged.
pub fn truncate_label(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{cut}{ELLIPSIS}")
}

/// Decode a zero-padded bytes32 name field to text, stripping the trailing
/// zero bytes the contract pads the word with.
pub fn decode_name(raw: &[u8; 32]) -> String {
    let end = raw
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Format a seconds-since-epoch deadline as "MM/DD/YYYY hh:mm:ss AM" (UTC).
pub fn format_deadline(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%m/%d/%Y %I:%M:%S %p").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Convert a wei amount to its ether decimal string using exact U256
/// integer math. Whole amounts carry no fractional part ("1", not "1.0");
/// fractional digits are kept exactly with trailing zeros trimmed.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, WEI_DECIMALS)
}

/// Exact base-unit to major-unit conversion for a token with `decimals`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return format!("{whole}");
    }

    let remainder_str = format!("{remainder}");
    let padded = format!("{:0>width$}", remainder_str, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Parse a decimal ether amount ("1", "0.5", "12.25") into wei.
/// Returns None for malformed input or more than 18 fractional digits.
pub fn parse_ether(input: &str) -> Option<U256> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (whole_str, frac_str) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if frac_str.len() > WEI_DECIMALS as usize {
        return None;
    }
    if whole_str.is_empty() && frac_str.is_empty() {
        return None;
    }
    if !whole_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let scale = U256::from(10u64).pow(U256::from(WEI_DECIMALS));
    let whole = if whole_str.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole_str, 10).ok()?
    };

    let frac = if frac_str.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{frac_str:0<18}");
        U256::from_str_radix(&padded, 10).ok()?
    };

    whole.checked_mul(scale)?.checked_add(frac)
}

/// Format a number with comma separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_long() {
        let addr = "0x1234567890abcdef1234567890abcdef12345678";
        let out = truncate_label(addr, 20);
        assert_eq!(out, "0x1234567890abcdef12...");
        assert_eq!(out.len(), 23);
    }

    #[test]
    fn test_truncate_label_at_threshold() {
        let s = "a".repeat(20);
        assert_eq!(truncate_label(&s, 20), s);
    }

    #[test]
    fn test_truncate_label_short() {
        assert_eq!(truncate_label("hello", 20), "hello");
        assert_eq!(truncate_label("", 20), "");
    }

    #[test]
    fn test_decode_name_strips_padding() {
        let mut raw = [0u8; 32];
        raw[..5].copy_from_slice(b"Onyx!");
        assert_eq!(decode_name(&raw), "Onyx!");
    }

    #[test]
    fn test_decode_name_all_zero() {
        assert_eq!(decode_name(&[0u8; 32]), "");
    }

    #[test]
    fn test_decode_name_full_word() {
        let raw = [b'x'; 32];
        assert_eq!(decode_name(&raw), "x".repeat(32));
    }

    #[test]
    fn test_format_deadline_known_timestamp() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_deadline(1700000000), "11/14/2023 10:13:20 PM");
    }

    #[test]
    fn test_format_deadline_morning() {
        assert_eq!(format_deadline(1), "01/01/1970 12:00:01 AM");
    }

    #[test]
    fn test_format_ether_one() {
        let wei = U256::from_str_radix("1000000000000000000", 10).unwrap();
        assert_eq!(format_ether(wei), "1");
    }

    #[test]
    fn test_format_ether_fractional() {
        let wei = U256::from_str_radix("1500000000000000000", 10).unwrap();
        assert_eq!(format_ether(wei), "1.5");
    }

    #[test]
    fn test_format_ether_smallest_unit() {
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_format_ether_zero() {
        assert_eq!(format_ether(U256::ZERO), "0");
    }

    #[test]
    fn test_parse_ether_round_trip() {
        let wei = parse_ether("1").unwrap();
        assert_eq!(format_ether(wei), "1");

        let wei = parse_ether("0.5").unwrap();
        assert_eq!(format_ether(wei), "0.5");

        let wei = parse_ether("12.25").unwrap();
        assert_eq!(format_ether(wei), "12.25");
    }

    #[test]
    fn test_parse_ether_invalid() {
        assert!(parse_ether("").is_none());
        assert!(parse_ether(".").is_none());
        assert!(parse_ether("abc").is_none());
        assert!(parse_ether("1.2.3").is_none());
        // 19 fractional digits is finer than wei
        assert!(parse_ether("0.1234567890123456789").is_none());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(960000), "960,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
