use anchor_lang::prelude::*;

use crate::events::{Actor, AuditAction, AuditLogEntry};

/// Appends an entry to the audit trail.
///
/// The entry lands in the transaction log, so it is persisted exactly when the
/// instruction that records it succeeds. Recording itself cannot fail.
pub fn record(actor: Actor, action: AuditAction, round_id: u64, details: String) {
    let timestamp = Clock::get().map(|clock| clock.unix_timestamp).unwrap_or_default();
    emit!(entry(actor, action, round_id, details, timestamp));
}

pub fn entry(
    actor: Actor,
    action: AuditAction,
    round_id: u64,
    details: String,
    timestamp: i64,
) -> AuditLogEntry {
    AuditLogEntry {
        actor,
        action,
        round_id,
        details,
        timestamp,
    }
}
