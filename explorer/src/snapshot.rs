//! Wire payload and the normalised snapshot derived from it.

use serde::{Deserialize, Serialize};
use warden_types::Timestamp;

/// How many transaction references are requested and displayed.
pub const MAX_RECENT_TXS: usize = 5;

/// `tx_input_n` value the explorer uses for references where the address
/// received funds.
const INBOUND_INPUT_SENTINEL: i64 = -1;

/// The subset of `GET /addrs/{address}` the bot reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub balance: Option<u128>,
    #[serde(default)]
    pub final_balance: Option<u128>,
    #[serde(default)]
    pub txrefs: Option<Vec<TxRef>>,
    #[serde(default)]
    pub unconfirmed_txrefs: Option<Vec<TxRef>>,
}

/// One transaction reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRef {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_input_n: Option<i64>,
    #[serde(default)]
    pub value: u128,
    /// RFC 3339 confirmation time; absent for unconfirmed references.
    #[serde(default)]
    pub confirmed: Option<String>,
}

/// Direction of funds relative to the queried address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl TxRef {
    pub fn direction(&self) -> Direction {
        if self.tx_input_n == Some(INBOUND_INPUT_SENTINEL) {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }

    /// Confirmation time, or `None` while unconfirmed (or unparseable).
    pub fn confirmed_at(&self) -> Option<Timestamp> {
        self.confirmed.as_deref().and_then(Timestamp::parse_rfc3339)
    }
}

/// Display-ready view of a wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub address: String,
    pub balance: u128,
    pub final_balance: u128,
    /// Confirmed references first, then unconfirmed, in service order.
    pub transactions: Vec<TxRef>,
}

impl WalletSnapshot {
    pub fn from_payload(address: impl Into<String>, payload: AddressPayload) -> Self {
        let balance = payload.balance.unwrap_or(0);
        let final_balance = payload.final_balance.or(payload.balance).unwrap_or(0);
        let mut transactions = payload.txrefs.unwrap_or_default();
        transactions.extend(payload.unconfirmed_txrefs.unwrap_or_default());
        Self {
            address: address.into(),
            balance,
            final_balance,
            transactions,
        }
    }

    /// The references that get displayed.
    pub fn recent(&self) -> &[TxRef] {
        let n = self.transactions.len().min(MAX_RECENT_TXS);
        &self.transactions[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> AddressPayload {
        serde_json::from_str(json).expect("payload")
    }

    #[test]
    fn confirmed_then_unconfirmed_in_service_order() {
        let snapshot = WalletSnapshot::from_payload(
            "0xabc1",
            payload(
                r#"{"balance": 10, "final_balance": 12,
                    "txrefs": [{"tx_hash":"b","tx_input_n":-1,"value":3,"confirmed":"2024-01-02T00:00:00Z"},
                               {"tx_hash":"a","tx_input_n":0,"value":1,"confirmed":"2024-01-01T00:00:00Z"}],
                    "unconfirmed_txrefs": [{"tx_hash":"c","tx_input_n":-1,"value":2}]}"#,
            ),
        );
        assert_eq!(snapshot.address, "0xabc1");
        assert_eq!(snapshot.balance, 10);
        assert_eq!(snapshot.final_balance, 12);
        let hashes: Vec<_> = snapshot
            .transactions
            .iter()
            .map(|tx| tx.tx_hash.as_deref().unwrap())
            .collect();
        assert_eq!(hashes, ["b", "a", "c"]);
    }

    #[test]
    fn final_balance_falls_back_to_balance_then_zero() {
        let snapshot = WalletSnapshot::from_payload("x", payload(r#"{"balance": 7}"#));
        assert_eq!(snapshot.final_balance, 7);
        let snapshot = WalletSnapshot::from_payload("x", payload("{}"));
        assert_eq!(snapshot.final_balance, 0);
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn direction_uses_the_input_sentinel() {
        let inbound = TxRef {
            tx_input_n: Some(-1),
            ..TxRef::default()
        };
        let outbound = TxRef {
            tx_input_n: Some(2),
            ..TxRef::default()
        };
        assert_eq!(inbound.direction(), Direction::Inbound);
        assert_eq!(outbound.direction(), Direction::Outbound);
        assert_eq!(TxRef::default().direction(), Direction::Outbound);
    }

    #[test]
    fn unconfirmed_has_no_timestamp() {
        let tx = TxRef::default();
        assert!(tx.confirmed_at().is_none());
        let tx = TxRef {
            confirmed: Some("2024-01-02T03:04:05Z".into()),
            ..TxRef::default()
        };
        assert_eq!(
            tx.confirmed_at().unwrap().to_string(),
            "2024-01-02 03:04:05 UTC"
        );
    }

    #[test]
    fn recent_caps_at_five() {
        let snapshot = WalletSnapshot {
            address: "x".into(),
            balance: 0,
            final_balance: 0,
            transactions: vec![TxRef::default(); 8],
        };
        assert_eq!(snapshot.recent().len(), MAX_RECENT_TXS);
    }

    #[test]
    fn large_balances_fit() {
        let snapshot = WalletSnapshot::from_payload(
            "x",
            payload(r#"{"balance": 250000000000000000000}"#),
        );
        assert_eq!(snapshot.balance, 250_000_000_000_000_000_000);
    }
}
