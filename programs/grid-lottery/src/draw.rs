//! Winner selection and prize split for a round's draw.
//!
//! Everything here is a pure function of the round snapshot and the revealed
//! seed, so a client can compute the winning numbers ahead of `run_draw` and
//! pass the matching selection accounts.

use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::Round;

/// Deterministic stream of `u64`s expanded from a 32-byte seed with
/// `sha256(seed || counter)`.
pub struct SeedStream {
    seed: [u8; 32],
    counter: u64,
}

impl SeedStream {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    pub fn next_u64(&mut self) -> u64 {
        let digest = hashv(&[self.seed.as_ref(), self.counter.to_le_bytes().as_ref()]).to_bytes();
        self.counter += 1;
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }

    /// Uniform value in `0..bound` by rejection sampling.
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        // largest multiple of `bound` that fits, so every residue is equally likely
        let zone = u64::MAX - (u64::MAX % bound + 1) % bound;
        loop {
            let value = self.next_u64();
            if value <= zone {
                return value % bound;
            }
        }
    }
}

/// Draws `count` distinct indices out of `0..population` uniformly without
/// replacement (partial Fisher-Yates). Order is the draw order.
pub fn sample_distinct(seed: [u8; 32], population: usize, count: usize) -> Vec<usize> {
    let count = count.min(population);
    let mut pool: Vec<usize> = (0..population).collect();
    let mut stream = SeedStream::new(seed);

    for i in 0..count {
        let j = i + stream.below((population - i) as u64) as usize;
        pool.swap(i, j);
    }

    pool.truncate(count);
    pool
}

/// Picks the three winning numbers, 1st prize first.
pub fn select_winners(seed: [u8; 32], confirmed: &[u16]) -> Result<[u16; WINNER_COUNT]> {
    require_gte!(
        confirmed.len(),
        WINNER_COUNT,
        ErrorCode::InsufficientPlayers
    );

    let picks = sample_distinct(seed, confirmed.len(), WINNER_COUNT);
    let mut winners = [0u16; WINNER_COUNT];
    for (slot, index) in winners.iter_mut().zip(picks) {
        *slot = confirmed[index];
    }
    Ok(winners)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrizeSplit {
    pub pool: u64,
    /// Payout per tier, 1st prize first.
    pub tiers: [u64; WINNER_COUNT],
    /// 30% of the pool plus rounding remainder; never distributed.
    pub house: u64,
}

pub fn prize_split(confirmed_count: u32, price: u64) -> Result<PrizeSplit> {
    let pool = price
        .checked_mul(u64::from(confirmed_count))
        .ok_or(ErrorCode::Overflow)?;

    let mut tiers = [0u64; WINNER_COUNT];
    for (amount, bps) in tiers.iter_mut().zip(TIER_BPS) {
        // u128 so that pool * bps cannot overflow
        *amount = (u128::from(pool) * u128::from(bps) / u128::from(BPS_DENOMINATOR)) as u64;
    }

    let paid: u64 = tiers.iter().sum();
    Ok(PrizeSplit {
        pool,
        tiers,
        house: pool - paid,
    })
}

/// Everything `run_draw` commits, derived from the round alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawPlan {
    pub seed: [u8; 32],
    pub winning_numbers: [u16; WINNER_COUNT],
    pub split: PrizeSplit,
}

/// Checks the draw preconditions and computes winners and prizes.
/// Does not modify the round.
pub fn plan_draw(round: &Round) -> Result<DrawPlan> {
    round.ensure_open()?;
    round.ensure_enough_players()?;
    let seed = round.draw_seed.ok_or(ErrorCode::DrawNotCommitted)?;

    let confirmed = round.confirmed_numbers();
    let winning_numbers = select_winners(seed, &confirmed)?;
    let split = prize_split(round.confirmed_count, round.price)?;

    Ok(DrawPlan {
        seed,
        winning_numbers,
        split,
    })
}
