//! Chain address validation and display formatting.

/// Check if a given string is a valid chain address.
pub fn is_valid_address(address: &str) -> bool {
    // Must be 42 characters: "0x" + 40 hex digits
    if address.len() != 42 {
        return false;
    }

    // Must start with "0x" or "0X"
    if !address.starts_with("0x") && !address.starts_with("0X") {
        return false;
    }

    // Check that the remaining 40 characters are all valid hex digits
    address[2..].chars().all(|c| c.is_ascii_hexdigit())

    // TODO: validate EIP-55 checksum
}

/// Abbreviate an address for display: first 6 characters, an ellipsis, and
/// the last 4. Fails closed and returns an empty string for anything that
/// does not validate. Case is preserved.
pub fn truncate_address(address: &str) -> String {
    if !is_valid_address(address) {
        return String::new();
    }

    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_checksum_address() {
        assert!(is_valid_address("0x52908400098527886E0F7030069857D2E4169EE7"));
    }

    #[test]
    /// Validation should be case-insensitive for hex digits.
    fn valid_all_lowercase() {
        assert!(is_valid_address("0xde709f2102306220921060314715629080e2fb77"));
    }

    #[test]
    /// Validation should be case-insensitive for prefix "0x".
    fn valid_uppercase_prefix() {
        assert!(is_valid_address("0X52908400098527886E0F7030069857D2E4169EE7"));
    }

    #[test]
    /// Address must be exactly 42 characters long.
    fn invalid_length() {
        assert!(!is_valid_address("0x123")); // too short
    }

    #[test]
    /// Check for invalid characters (e.g. non-hex characters) in the address.
    fn invalid_chars() {
        assert!(!is_valid_address("0xZ2908400098527886E0F7030069857D2E4169EE7")); // 'Z' is not hex
    }

    #[test]
    /// Address must start with "0x" or "0X".
    fn missing_prefix() {
        assert!(!is_valid_address("52908400098527886E0F7030069857D2E4169EE7")); // no 0x
    }

    #[test]
    /// Truncation keeps the prefix and the tail, case preserved.
    fn truncates_valid_address() {
        assert_eq!(
            truncate_address("0xAbCd08400098527886E0F7030069857D2E416947"),
            "0xAbCd...6947"
        );
    }

    #[test]
    /// Truncation fails closed on anything that does not validate.
    fn truncate_rejects_invalid_input() {
        assert_eq!(truncate_address(""), "");
        assert_eq!(truncate_address("0x123"), "");
        assert_eq!(truncate_address("not-an-address-at-all-not-an-address-at-al"), "");
    }
}
