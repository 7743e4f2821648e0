use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct LotteryConfig {
    /// The operator allowed to create rounds, review selections and run draws.
    pub authority: Pubkey,

    /// Identifier of the most recently created round; the next round gets `round_count + 1`.
    pub round_count: u64,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
}
