//! Wallet connection lifecycle.
//!
//! Signing happens in the user's wallet, never here. This only tracks which
//! accounts a wallet has exposed and which one is active.

use serde::Serialize;
use tracing::{info, warn};

use crate::address::Address;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        accounts: Vec<Address>,
        active: Address,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    ConnectRequested,
    Connected(Vec<Address>),
    ConnectFailed(String),
    Disconnected,
}

#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    state: WalletState,
    last_error: Option<String>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, WalletState::Connected { .. })
    }

    pub fn active_address(&self) -> Option<&Address> {
        match &self.state {
            WalletState::Connected { active, .. } => Some(active),
            _ => None,
        }
    }

    /// Advance the session. Events that make no sense in the current state
    /// leave it unchanged.
    pub fn apply(&mut self, event: WalletEvent) -> &WalletState {
        let next = match (&self.state, event) {
            (WalletState::Disconnected, WalletEvent::ConnectRequested) => {
                self.last_error = None;
                Some(WalletState::Connecting)
            }
            (WalletState::Connecting, WalletEvent::Connected(accounts)) => {
                match accounts.first().copied() {
                    Some(active) => {
                        info!("Wallet connected: {}", short_address(&active.to_string()));
                        Some(WalletState::Connected { accounts, active })
                    }
                    None => {
                        self.last_error = Some("Wallet returned no accounts".to_string());
                        Some(WalletState::Disconnected)
                    }
                }
            }
            (WalletState::Connecting, WalletEvent::ConnectFailed(reason)) => {
                warn!("Wallet connection failed: {}", reason);
                self.last_error = Some(reason);
                Some(WalletState::Disconnected)
            }
            (_, WalletEvent::Disconnected) => Some(WalletState::Disconnected),
            _ => None,
        };

        if let Some(state) = next {
            self.state = state;
        }
        &self.state
    }

    /// Switch the active account to another one the wallet exposed.
    pub fn select(&mut self, address: &Address) -> bool {
        match &mut self.state {
            WalletState::Connected { accounts, active } if accounts.contains(address) => {
                *active = *address;
                true
            }
            _ => false,
        }
    }
}

/// First six and last four characters, joined by an ellipsis.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
