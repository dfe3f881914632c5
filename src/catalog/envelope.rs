//! The result envelope: the checked subset of a catalog, in catalog order.
//!
//! The engine serializes an envelope once and writes it to the result
//! channel; the orchestrator parses it back and re-maps the ids onto its own
//! catalog copies, so the final output is guaranteed to be an order-preserving
//! subsequence with field values identical to the input.

use crate::error::{PickerError, Result};

use super::record::Copilot;

/// Build the envelope from checked catalog indices.
///
/// Indices are deduplicated and emitted in ascending catalog order, so the
/// result is always a subsequence of the catalog.
pub fn from_checked_indices(catalog: &[Copilot], indices: &[usize]) -> Vec<Copilot> {
    let mut sorted: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| i < catalog.len())
        .collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.into_iter().map(|i| catalog[i].clone()).collect()
}

/// Serialize an envelope to its wire form (a JSON array).
pub fn to_json(envelope: &[Copilot]) -> Result<String> {
    serde_json::to_string(envelope).map_err(|e| PickerError::Other(e.into()))
}

/// Parse an engine payload and resolve it against the catalog.
///
/// Accepts only envelopes whose ids form an order-preserving subsequence of
/// the catalog, and returns the orchestrator's own record copies rather than
/// trusting the payload's field values.
pub fn resolve(catalog: &[Copilot], payload: &str, tier: &str) -> Result<Vec<Copilot>> {
    let bad = |message: String| PickerError::EngineFailed {
        tier: tier.to_string(),
        message,
    };

    let records: Vec<Copilot> = serde_json::from_str(payload)
        .map_err(|e| bad(format!("malformed result envelope: {e}")))?;

    let mut resolved = Vec::with_capacity(records.len());
    let mut cursor = 0usize;
    for record in &records {
        let position = catalog[cursor..]
            .iter()
            .position(|c| c.copilot_id == record.copilot_id)
            .ok_or_else(|| {
                bad(format!(
                    "envelope entry '{}' is not an in-order catalog member",
                    record.copilot_id
                ))
            })?;
        cursor += position;
        resolved.push(catalog[cursor].clone());
        cursor += 1;
    }
    Ok(resolved)
}
