//! Reading the auxiliary inputs: JSON files given by path and inline balance entries.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::error::{PatchError, Result};

/// Read `path` and deserialize its whole content as `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an `<account>=<amount>` entry into the `[account, amount]` pair stored in
/// `balances.balances`.
///
/// The amount is kept as an exact `u128` JSON number.
pub fn parse_balance(entry: &str) -> Result<Value> {
    let malformed = || PatchError::InvalidBalance(entry.to_string());

    let (account, amount) = entry.split_once('=').ok_or_else(malformed)?;
    let account = account.trim();
    if account.is_empty() {
        return Err(malformed());
    }
    let amount: u128 = amount.trim().parse().map_err(|_| malformed())?;
    let amount = Number::from_u128(amount).ok_or_else(malformed)?;

    Ok(Value::Array(vec![
        Value::String(account.to_string()),
        Value::Number(amount),
    ]))
}

pub fn parse_balances<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Value>> {
    entries
        .iter()
        .map(|entry| parse_balance(entry.as_ref()))
        .collect()
}
