use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYER_NAME_LEN;
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum SelectionStatus {
    Pending,
    Confirmed,
}

/// A player's claim on one number of a round.
///
/// The account lives at `["selection", round, number]`, so its address is the
/// unique index over `(round, number)`: while it exists nobody else can hold
/// that number. Rejection closes it.
#[account]
#[derive(InitSpace)]
pub struct Selection {
    pub id: u64,
    pub round: Pubkey,
    pub round_id: u64,
    pub number: u16,
    /// Signing key of the player, used as the user id.
    pub player: Pubkey,
    #[max_len(32)]
    pub player_name: String,
    pub status: SelectionStatus,
    pub created_at: i64,
    pub bump: u8,
}

impl Selection {
    /// A freshly allocated account has never been written by `reserve_number`.
    pub fn is_vacant(&self) -> bool {
        self.round == Pubkey::default()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == SelectionStatus::Confirmed
    }

    pub fn ensure_pending(&self) -> Result<()> {
        require!(
            !self.is_vacant() && self.status == SelectionStatus::Pending,
            ErrorCode::NotPending
        );
        Ok(())
    }
}

pub fn is_valid_player_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= MAX_PLAYER_NAME_LEN
}
