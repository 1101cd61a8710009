//! User intents as they arrive from the client, and their validation.
//!
//! Every `validate` runs before any node call, so a rejected intent never
//! costs a round-trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{Error, Result};

const MAX_ASSET_NAME_LEN: usize = 32;
const MAX_UNIT_NAME_LEN: usize = 8;
const MAX_URL_LEN: usize = 96;
const DEFAULT_UNIT_NAME: &str = "NFT";

/// The category an NFT is minted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NftType {
    Art,
    Music,
    Standard,
}

impl NftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NftType::Art => "art",
            NftType::Music => "music",
            NftType::Standard => "standard",
        }
    }
}

impl fmt::Display for NftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NftType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "art" => Ok(NftType::Art),
            "music" => Ok(NftType::Music),
            "standard" => Ok(NftType::Standard),
            _ => Err(Error::invalid_input("Type must be art, music, or standard")),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn address(field: &str, value: &str) -> Result<Address> {
    value.parse().map_err(|e| match e {
        Error::InvalidAddress(detail) => Error::InvalidAddress(format!("{}: {}", field, detail)),
        other => other,
    })
}

fn positive_price(price: Option<u64>) -> Option<u64> {
    price.filter(|p| *p > 0)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintIntent {
    pub creator: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub nft_type: Option<String>,
    pub purchasable: Option<bool>,
    pub price: Option<u64>,
    pub asset_name: Option<String>,
    pub unit_name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMint {
    pub creator: Address,
    pub name: String,
    pub nft_type: NftType,
    pub purchasable: bool,
    /// Zero when the NFT is not purchasable and no price was given.
    pub price: u64,
    pub asset_name: String,
    pub unit_name: String,
    pub url: String,
    /// `description` wins over `metadata`.
    pub metadata: String,
}

impl MintIntent {
    pub fn validate(&self) -> Result<ValidMint> {
        let creator = present(&self.creator).ok_or_else(|| {
            Error::invalid_input("Creator address is required. Please connect your wallet.")
        })?;

        let (name, nft_type) = match (present(&self.name), present(&self.nft_type)) {
            (Some(name), Some(nft_type)) => (name, nft_type),
            _ => {
                return Err(Error::invalid_input(
                    "NFT name and type are required fields.",
                ))
            }
        };
        let nft_type: NftType = nft_type.parse()?;

        let purchasable = self.purchasable.unwrap_or(false);
        if purchasable && positive_price(self.price).is_none() {
            return Err(Error::invalid_input(
                "Price must be greater than 0 for purchasable NFTs",
            ));
        }

        let asset_name = present(&self.asset_name).unwrap_or(name).to_string();
        if asset_name.len() > MAX_ASSET_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Asset name must be at most {} bytes",
                MAX_ASSET_NAME_LEN
            )));
        }
        let unit_name = present(&self.unit_name)
            .unwrap_or(DEFAULT_UNIT_NAME)
            .to_string();
        if unit_name.len() > MAX_UNIT_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Unit name must be at most {} bytes",
                MAX_UNIT_NAME_LEN
            )));
        }
        let url = present(&self.url).unwrap_or_default().to_string();
        if url.len() > MAX_URL_LEN {
            return Err(Error::invalid_input(format!(
                "Asset URL must be at most {} bytes",
                MAX_URL_LEN
            )));
        }

        Ok(ValidMint {
            creator: address("creator", creator)?,
            name: name.to_string(),
            nft_type,
            purchasable,
            price: self.price.unwrap_or(0),
            asset_name,
            unit_name,
            url,
            metadata: present(&self.description)
                .or_else(|| present(&self.metadata))
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// Seller and price, shared by listing and price updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIntent {
    pub seller: Option<String>,
    pub price: Option<u64>,
}

pub type UpdatePriceIntent = ListIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidListing {
    pub seller: Address,
    pub price: u64,
}

impl ListIntent {
    pub fn validate(&self) -> Result<ValidListing> {
        match (present(&self.seller), positive_price(self.price)) {
            (Some(seller), Some(price)) => Ok(ValidListing {
                seller: address("seller", seller)?,
                price,
            }),
            _ => Err(Error::invalid_input("Seller and valid price are required")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelistIntent {
    pub seller: Option<String>,
}

impl DelistIntent {
    pub fn validate(&self) -> Result<Address> {
        let seller =
            present(&self.seller).ok_or_else(|| Error::invalid_input("Seller is required"))?;
        address("seller", seller)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyIntent {
    pub buyer: Option<String>,
    pub seller: Option<String>,
    pub price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidBuy {
    pub buyer: Address,
    pub seller: Address,
    pub price: u64,
}

impl BuyIntent {
    pub fn validate(&self) -> Result<ValidBuy> {
        match (
            present(&self.buyer),
            present(&self.seller),
            positive_price(self.price),
        ) {
            (Some(buyer), Some(seller), Some(price)) => {
                let buyer = address("buyer", buyer)?;
                let seller = address("seller", seller)?;
                if buyer == seller {
                    return Err(Error::invalid_input("Buyer and seller must differ"));
                }
                Ok(ValidBuy {
                    buyer,
                    seller,
                    price,
                })
            }
            _ => Err(Error::invalid_input(
                "Buyer, seller, and price are required",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptInIntent {
    pub address: Option<String>,
}

impl OptInIntent {
    pub fn validate(&self) -> Result<Address> {
        let value =
            present(&self.address).ok_or_else(|| Error::invalid_input("Address is required"))?;
        address("address", value)
    }
}
