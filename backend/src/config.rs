use std::env;
use std::str::FromStr;

use algomint_chain::{
    Address, AlgodConfig, MarketplaceConfig, DEFAULT_PLATFORM_FEE_BP, DEFAULT_WAIT_ROUNDS,
};
use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_ALGOD_SERVER: &str = "https://testnet-api.algonode.cloud";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
/// Upper bound on rounds a submit request may block for.
const MAX_CONFIRMATION_ROUNDS: u64 = 1_000;

/// Server settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub algod: AlgodConfig,
    pub marketplace: MarketplaceConfig,
    pub frontend_url: String,
    pub confirmation_rounds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let platform_fee_bp = parse_or(&get, "PLATFORM_FEE", DEFAULT_PLATFORM_FEE_BP)?;
        if platform_fee_bp > algomint_chain::BASIS_POINTS {
            bail!(
                "PLATFORM_FEE must be at most {} basis points, got {}",
                algomint_chain::BASIS_POINTS,
                platform_fee_bp
            );
        }

        let confirmation_rounds = parse_or(&get, "CONFIRMATION_ROUNDS", DEFAULT_WAIT_ROUNDS)?;
        if confirmation_rounds == 0 || confirmation_rounds > MAX_CONFIRMATION_ROUNDS {
            bail!(
                "CONFIRMATION_ROUNDS must be between 1 and {}, got {}",
                MAX_CONFIRMATION_ROUNDS,
                confirmation_rounds
            );
        }

        let platform_wallet = get("PLATFORM_WALLET")
            .map(|v| {
                v.parse::<Address>()
                    .with_context(|| format!("PLATFORM_WALLET is not a valid address: {}", v))
            })
            .transpose()?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            algod: AlgodConfig {
                server: get("ALGOD_SERVER").unwrap_or_else(|| DEFAULT_ALGOD_SERVER.to_string()),
                port: get("ALGOD_PORT").unwrap_or_default(),
                token: get("ALGOD_TOKEN").unwrap_or_default(),
            },
            marketplace: MarketplaceConfig {
                app_id: parse_or(&get, "APP_ID", 0)?,
                platform_fee_bp,
                platform_wallet,
            },
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            confirmation_rounds,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.algod.server, "https://testnet-api.algonode.cloud");
        assert_eq!(config.marketplace.app_id, 0);
        assert_eq!(config.marketplace.platform_fee_bp, 250);
        assert!(config.marketplace.platform_wallet.is_none());
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.confirmation_rounds, 10);
    }

    #[test]
    fn test_overrides() {
        let wallet = Address::new([5u8; 32]).to_string();
        let config = config(&[
            ("PORT", "8080"),
            ("APP_ID", "123456"),
            ("PLATFORM_FEE", "500"),
            ("PLATFORM_WALLET", wallet.as_str()),
            ("ALGOD_PORT", "4001"),
            ("CONFIRMATION_ROUNDS", "4"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.marketplace.app_id, 123_456);
        assert_eq!(config.marketplace.platform_fee_bp, 500);
        assert_eq!(config.marketplace.platform_wallet, Some(Address::new([5u8; 32])));
        assert_eq!(config.algod.base_url(), "https://testnet-api.algonode.cloud:4001");
        assert_eq!(config.confirmation_rounds, 4);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = config(&[("PORT", ""), ("PLATFORM_WALLET", "  ")]).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.marketplace.platform_wallet.is_none());
    }

    #[test]
    fn test_malformed_values_fail() {
        let err = config(&[("APP_ID", "abc")]).unwrap_err();
        assert!(err.to_string().contains("APP_ID"));
        assert!(config(&[("PLATFORM_FEE", "10001")]).is_err());
        assert!(config(&[("PLATFORM_WALLET", "nope")]).is_err());
    }

    #[test]
    fn test_confirmation_rounds_bounds() {
        assert!(config(&[("CONFIRMATION_ROUNDS", "0")]).is_err());
        assert!(config(&[("CONFIRMATION_ROUNDS", "18446744073709551615")]).is_err());
        assert!(config(&[("CONFIRMATION_ROUNDS", "1001")]).is_err());
        assert_eq!(
            config(&[("CONFIRMATION_ROUNDS", "1000")]).unwrap().confirmation_rounds,
            1_000
        );
    }
}
