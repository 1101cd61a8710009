//! Forwards externally signed transactions and waits for confirmation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algod::{AlgodClient, PendingTransactionInfo};
use crate::error::{Error, Result};
use crate::transaction::signed_transaction_id;
use crate::utils::serialization::base64_to_bytes;

/// Rounds to wait for confirmation when nothing else is configured.
pub const DEFAULT_WAIT_ROUNDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub tx_id: String,
    pub confirmed_round: u64,
}

#[derive(Debug, Clone)]
pub struct SubmissionRelay {
    algod: AlgodClient,
    wait_rounds: u64,
}

impl SubmissionRelay {
    pub fn new(algod: AlgodClient, wait_rounds: u64) -> Self {
        Self { algod, wait_rounds }
    }

    pub fn wait_rounds(&self) -> u64 {
        self.wait_rounds
    }

    /// Submit a base64 signed transaction (or signed group) and wait for it.
    ///
    /// A transaction the node already reports as confirmed is answered from
    /// its pending record without being sent again. That only holds while
    /// algod still keeps the pending record; after it is pruned a resubmit
    /// reaches the node and fails with its "already in ledger" error.
    pub async fn submit(&self, signed_txn: &str) -> Result<SubmissionResult> {
        if signed_txn.trim().is_empty() {
            return Err(Error::invalid_input("Signed transaction is required"));
        }
        let blob = base64_to_bytes("signedTxn", signed_txn)?;

        let local_id = match signed_transaction_id(&blob) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Could not derive a transaction id locally: {}", e);
                None
            }
        };

        if let Some(tx_id) = &local_id {
            if let Ok(info) = self.algod.pending_transaction_information(tx_id).await {
                if let Some(round) = info.confirmed() {
                    info!("Transaction {} already confirmed in round {}", tx_id, round);
                    return Ok(SubmissionResult {
                        tx_id: tx_id.clone(),
                        confirmed_round: round,
                    });
                }
            }
        }

        let tx_id = self.algod.send_raw_transaction(&blob).await?;
        info!("Submitted transaction {}", tx_id);

        let confirmed = self.wait_for_confirmation(&tx_id).await?;
        let confirmed_round = confirmed.confirmed().unwrap_or_default();
        info!("Transaction {} confirmed in round {}", tx_id, confirmed_round);

        Ok(SubmissionResult {
            tx_id,
            confirmed_round,
        })
    }

    /// Poll round by round until `tx_id` is confirmed, rejected by the pool,
    /// or `wait_rounds` rounds pass.
    ///
    /// Errors looking up the pending record are tolerated; the transaction
    /// may not have reached this node's pool yet.
    pub async fn wait_for_confirmation(&self, tx_id: &str) -> Result<PendingTransactionInfo> {
        let status = self.algod.status().await?;
        let start_round = status.last_round.saturating_add(1);
        let end_round = start_round.saturating_add(self.wait_rounds);
        let mut current_round = start_round;

        while current_round < end_round {
            match self.algod.pending_transaction_information(tx_id).await {
                Ok(info) => {
                    if info.confirmed().is_some() {
                        return Ok(info);
                    }
                    if !info.pool_error.is_empty() {
                        warn!("Transaction {} rejected: {}", tx_id, info.pool_error);
                        return Err(Error::Rejected {
                            tx_id: tx_id.to_string(),
                            reason: info.pool_error,
                        });
                    }
                }
                Err(e) => debug!("Pending lookup for {} failed: {}", tx_id, e),
            }

            self.algod.status_after_block(current_round).await?;
            current_round = current_round.saturating_add(1);
        }

        Err(Error::NotConfirmed {
            tx_id: tx_id.to_string(),
            rounds: self.wait_rounds,
        })
    }
}
