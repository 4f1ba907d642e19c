//! Request signing for the partner API.
//!
//! Every call carries `sign = hex(HMAC-SHA256(partner_key, base_string))` where
//! the base string is `partner_id || path || timestamp || access_token || shop_id`.

use crate::domain::account::Account;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("account {account_id} has no {field} configured")]
    MissingField {
        account_id: i64,
        field: &'static str,
    },
    #[error("account {account_id} has an unusable partner key")]
    InvalidKey { account_id: i64 },
}

/// Canonical string the signature is computed over.
pub fn base_string(account: &Account, path: &str, timestamp: i64) -> String {
    format!(
        "{}{}{}{}{}",
        account.partner_id, path, timestamp, account.access_token, account.shop_id
    )
}

pub fn sign(account: &Account, path: &str, timestamp: i64) -> Result<String, SignerError> {
    check_credentials(account)?;

    let mut mac = HmacSha256::new_from_slice(account.partner_key.as_bytes()).map_err(|_| {
        SignerError::InvalidKey {
            account_id: account.id,
        }
    })?;
    mac.update(base_string(account, path, timestamp).as_bytes());

    Ok(encode_hex(&mac.finalize().into_bytes()))
}

/// Query parameters shared by every signed call.
pub fn signed_params(
    account: &Account,
    path: &str,
    timestamp: i64,
) -> Result<Vec<(&'static str, String)>, SignerError> {
    let sign = sign(account, path, timestamp)?;

    Ok(vec![
        ("partner_id", account.partner_id.to_string()),
        ("sign", sign),
        ("timestamp", timestamp.to_string()),
        ("shop_id", account.shop_id.to_string()),
        ("access_token", account.access_token.clone()),
    ])
}

fn check_credentials(account: &Account) -> Result<(), SignerError> {
    let missing = if account.partner_key.is_empty() {
        Some("partner_key")
    } else if account.access_token.is_empty() {
        Some("access_token")
    } else {
        None
    };

    match missing {
        Some(field) => Err(SignerError::MissingField {
            account_id: account.id,
            field,
        }),
        None => Ok(()),
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}
