use std::fmt;
use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A normalized EVM wallet address: `0x` followed by 40 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Trims and lowercases `raw`, then checks the `0x` + 40 hex digit shape
    pub fn parse(raw: &str) -> Result<Self, String> {
        let address = raw.trim().to_ascii_lowercase();
        let valid = address.len() == 42
            && address.starts_with("0x")
            && address[2..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(WalletAddress(address))
        } else {
            Err("Invalid wallet address format".to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WalletAddress::parse(s)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        WalletAddress::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// An address allowed to mint during the whitelist phase
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::whitelist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WhitelistEntry {
    pub address: String,
    pub added_at: i64,
}

impl WhitelistEntry {
    pub fn new(address: WalletAddress, added_at: i64) -> Self {
        Self {
            address: address.into_inner(),
            added_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let addr = WalletAddress::parse("  0xABCDEF0123456789abcdef0123456789ABCDEF01 \n").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(WalletAddress::parse("0x123").is_err());
        assert!(WalletAddress::parse("1xabcdef0123456789abcdef0123456789abcdef01").is_err());
        assert!(WalletAddress::parse("0xzzcdef0123456789abcdef0123456789abcdef01").is_err());
        assert!(WalletAddress::parse("").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<WalletAddress, _> =
            serde_json::from_str("\"0x742d35cc6644c4532b1d8d40cfc6aa907e8d9c10\"");
        assert!(ok.is_ok());
        let bad: Result<WalletAddress, _> = serde_json::from_str("\"0x...\"");
        assert!(bad.is_err());
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 40 hex digits behind 0x parse, and parsing is idempotent
        #[test]
        fn prop_valid_addresses_parse(hex in "[0-9a-fA-F]{40}", pad in "[ \t]{0,3}") {
            let raw = format!("{}0x{}{}", pad, hex, pad);
            let addr = WalletAddress::parse(&raw).unwrap();
            prop_assert_eq!(addr.as_str().len(), 42);
            let again = WalletAddress::parse(addr.as_str()).unwrap();
            prop_assert_eq!(again, addr);
        }

        /// Wrong lengths never parse
        #[test]
        fn prop_wrong_length_rejected(hex in "[0-9a-f]{0,39}") {
            let raw = format!("0x{}", hex);
            prop_assert!(WalletAddress::parse(&raw).is_err());
        }
    }
}
