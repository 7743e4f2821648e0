use anchor_lang::prelude::*;

// ===== PDA SEEDS =====
#[constant]
pub const CONFIG_SEED: &[u8] = b"config";
#[constant]
pub const ROUND_SEED: &[u8] = b"round";
#[constant]
pub const SELECTION_SEED: &[u8] = b"selection";
#[constant]
pub const DRAW_SEED: &[u8] = b"draw";

// ===== ROUND LIMITS =====
pub const MAX_ROUND_NAME_LEN: usize = 32;
pub const MAX_PLAYER_NAME_LEN: usize = 32;
pub const MAX_GRID_SIZE: u16 = 1_000;

// ===== DRAW =====
pub const WINNER_COUNT: usize = 3;
pub const MIN_CONFIRMED_PLAYERS: u32 = WINNER_COUNT as u32;

/// Tier payouts in basis points of the prize pool (1st, 2nd, 3rd).
/// The remaining 3_000 bps stay with the house.
pub const TIER_BPS: [u64; WINNER_COUNT] = [4_000, 2_000, 1_000];
pub const BPS_DENOMINATOR: u64 = 10_000;

// ===== QUERIES =====
pub const MAX_QUERY_LIMIT: usize = 50;
pub const DEFAULT_RECENT_WINNERS: usize = 5;
pub const DEFAULT_HISTORY_ROUNDS: usize = 3;
