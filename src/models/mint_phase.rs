use std::fmt;
use std::str::FromStr;

use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

/// The minting window a collection is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "UPPERCASE")]
pub enum MintPhase {
    Closed,
    Whitelist,
    Public,
}

impl MintPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MintPhase::Closed => "CLOSED",
            MintPhase::Whitelist => "WHITELIST",
            MintPhase::Public => "PUBLIC",
        }
    }
}

impl fmt::Display for MintPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MintPhase {
    type Err = String;

    /// Parses a phase name, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLOSED" => Ok(MintPhase::Closed),
            "WHITELIST" => Ok(MintPhase::Whitelist),
            "PUBLIC" => Ok(MintPhase::Public),
            _ => Err(format!("Invalid phase: {}", s.trim())),
        }
    }
}

impl FromSql<Text, Sqlite> for MintPhase {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Ok(text.parse::<MintPhase>()?)
    }
}

impl ToSql<Text, Sqlite> for MintPhase {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// The token a mint is paid in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum Currency {
    #[serde(rename = "ETH", alias = "eth")]
    Eth,
    #[serde(rename = "HYPE", alias = "hype")]
    Hype,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eth => "ETH",
            Currency::Hype => "HYPE",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ETH" => Ok(Currency::Eth),
            "HYPE" => Ok(Currency::Hype),
            _ => Err(format!("Invalid currency: {}", s.trim())),
        }
    }
}

impl FromSql<Text, Sqlite> for Currency {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Ok(text.parse::<Currency>()?)
    }
}

impl ToSql<Text, Sqlite> for Currency {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parse_is_case_insensitive() {
        assert_eq!("public".parse::<MintPhase>().unwrap(), MintPhase::Public);
        assert_eq!(" Whitelist ".parse::<MintPhase>().unwrap(), MintPhase::Whitelist);
        assert_eq!("CLOSED".parse::<MintPhase>().unwrap(), MintPhase::Closed);
        assert!("presale".parse::<MintPhase>().is_err());
    }

    #[test]
    fn test_phase_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&MintPhase::Whitelist).unwrap(), "\"WHITELIST\"");
        let phase: MintPhase = serde_json::from_str("\"PUBLIC\"").unwrap();
        assert_eq!(phase, MintPhase::Public);
    }

    #[test]
    fn test_currency_round_trips_through_text() {
        for currency in [Currency::Eth, Currency::Hype] {
            assert_eq!(currency.as_str().parse::<Currency>().unwrap(), currency);
        }
        let c: Currency = serde_json::from_str("\"hype\"").unwrap();
        assert_eq!(c, Currency::Hype);
        assert!("SOL".parse::<Currency>().is_err());
    }
}
