use crate::error::ConstructionError;
use std::fmt;
use std::str::FromStr;

/// Names the ledger's token registry knows natively.
const REGISTRY: [&str; 5] = ["BTC", "ETH", "USDC", "USDT", "SALT"];

/// Identifier of a fungible asset.
///
/// The fixed variants carry the registry's wire names verbatim; any other
/// asset travels as `Custom` and is compared by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Btc,
    Eth,
    Usdc,
    Usdt,
    Salt,
    /// Asset registered by name outside the fixed registry.
    Custom(String),
}

impl Token {
    /// Wire name of this token.
    pub fn name(&self) -> &str {
        match self {
            Token::Btc => "BTC",
            Token::Eth => "ETH",
            Token::Usdc => "USDC",
            Token::Usdt => "USDT",
            Token::Salt => "SALT",
            Token::Custom(name) => name,
        }
    }

    /// Register a token by name.
    ///
    /// Empty names and names colliding with a registry entry are rejected:
    /// a `Custom("BTC")` would decode back as [`Token::Btc`] and break the
    /// round-trip law.
    pub fn custom(name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyTokenName);
        }
        if REGISTRY.contains(&name.as_str()) {
            return Err(ConstructionError::ReservedTokenName(name));
        }
        Ok(Token::Custom(name))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Token {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTC" => Ok(Token::Btc),
            "ETH" => Ok(Token::Eth),
            "USDC" => Ok(Token::Usdc),
            "USDT" => Ok(Token::Usdt),
            "SALT" => Ok(Token::Salt),
            other => Token::custom(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_round_trip() {
        for name in REGISTRY {
            let token: Token = name.parse().unwrap();
            assert!(!matches!(token, Token::Custom(_)));
            assert_eq!(token.name(), name);
        }
    }

    #[test]
    fn test_custom_token() {
        let token = Token::custom("PEARL").unwrap();
        assert_eq!(token.name(), "PEARL");
        assert_eq!("PEARL".parse::<Token>().unwrap(), token);
    }

    #[test]
    fn test_custom_rejects_empty_and_reserved() {
        assert_eq!(Token::custom(""), Err(ConstructionError::EmptyTokenName));
        assert_eq!(
            Token::custom("BTC"),
            Err(ConstructionError::ReservedTokenName("BTC".to_string()))
        );
    }
}
