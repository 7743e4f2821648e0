use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Actor {
    Admin,
    Player,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuditAction {
    CreateRound,
    DeleteRound,
    ArchiveRound,
    SelectNumber,
    ApproveSelection,
    RejectSelection,
    CommitDraw,
    RevealDraw,
    RunDraw,
    CloseSelection,
    CloseDrawResult,
}

/// One entry of the audit trail. Emitted by every state-changing instruction
/// and indexed off-chain from the transaction logs.
#[event]
#[derive(Clone, Debug)]
pub struct AuditLogEntry {
    pub actor: Actor,
    pub action: AuditAction,
    pub round_id: u64,
    pub details: String,
    pub timestamp: i64,
}

/// Emitted once per winner by `run_draw`; the feed for winner notifications.
#[event]
#[derive(Clone, Debug)]
pub struct WinnerDrawn {
    pub round: Pubkey,
    pub round_id: u64,
    pub prize_tier: u8,
    pub winning_number: u16,
    pub player: Pubkey,
    pub player_name: String,
    pub prize_amount: u64,
}
