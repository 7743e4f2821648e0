use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct Winner {
    /// 1, 2 or 3, in draw order.
    pub prize_tier: u8,
    pub winning_number: u16,
    pub player: Pubkey,
    #[max_len(32)]
    pub player_name: String,
    pub prize_amount: u64,
}

/// Outcome of a round's draw. Created exactly once per round by `run_draw`.
#[account]
#[derive(InitSpace)]
pub struct DrawResult {
    pub round: Pubkey,
    pub round_id: u64,

    /// `confirmed_count * price` at the time of the draw.
    pub prize_pool: u64,

    /// Part of the pool not paid out to the three tiers.
    pub house_share: u64,

    /// Revealed randomness the winners were derived from, kept for audit.
    pub seed: [u8; 32],

    pub drawn_at: i64,

    #[max_len(3)]
    pub winners: Vec<Winner>,

    pub bump: u8,
}
