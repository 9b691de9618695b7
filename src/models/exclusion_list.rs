use serde::{Deserialize, Serialize};

/// Symbols treated as unsupported regardless of available data files
///
/// Stored uppercase. Lookups uppercase the candidate too, so `btc` and
/// `BTC` are the same symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList {
    symbols: Vec<String>,
}

impl ExclusionList {
    /// Build from raw input, uppercasing every symbol
    pub fn normalized<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: symbols
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Wrap symbols exactly as stored
    pub fn from_stored(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let wanted = symbol.to_uppercase();
        self.symbols.iter().any(|s| s.to_uppercase() == wanted)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<String> {
        self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// Request body for `POST /api/v1/crypto/notSupported`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotSupportedCryptos {
    #[serde(default)]
    pub not_supported_cryptos: Option<Vec<String>>,
}
