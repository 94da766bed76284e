//! JSON portfolio file adapter.
//!
//! A portfolio is a JSON array of `{"symbol": ..., "purchaseDate": ...}`
//! objects; order is preserved.

use crate::domain::error::AnnualizeError;
use crate::domain::trade::Trade;
use std::fs;
use std::path::Path;

pub fn load_trades<P: AsRef<Path>>(path: P) -> Result<Vec<Trade>, AnnualizeError> {
    let path = path.as_ref();
    let file = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| AnnualizeError::TradeFile {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let trades: Vec<Trade> =
        serde_json::from_str(&content).map_err(|e| AnnualizeError::TradeFile {
            file: file.clone(),
            reason: e.to_string(),
        })?;

    if let Some(position) = trades.iter().position(|t| t.symbol.trim().is_empty()) {
        return Err(AnnualizeError::TradeFile {
            file,
            reason: format!("empty symbol at index {position}"),
        });
    }

    Ok(trades)
}
