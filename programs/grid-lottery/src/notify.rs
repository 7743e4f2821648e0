//! Best-effort winner notifications.
//!
//! Runs off-chain after `run_draw` has committed. A delivery failure is logged
//! and skipped; it never touches the draw.

use std::fmt::Display;

use anchor_lang::prelude::*;

use crate::query::list_winners;
use crate::state::{DrawResult, Round, Winner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinnerNotice {
    pub round_id: u64,
    pub round_name: String,
    pub prize_tier: u8,
    pub winning_number: u16,
    pub player: Pubkey,
    pub player_name: String,
    pub prize_amount: u64,
}

impl WinnerNotice {
    pub fn new(round: &Round, winner: &Winner) -> Self {
        Self {
            round_id: round.id,
            round_name: round.name.clone(),
            prize_tier: winner.prize_tier,
            winning_number: winner.winning_number,
            player: winner.player,
            player_name: winner.player_name.clone(),
            prize_amount: winner.prize_amount,
        }
    }

    /// Text sent to the winner.
    pub fn message(&self) -> String {
        format!(
            "Congratulations, {}!\n\n\
             You have won in the lottery round: {}.\n\n\
             Your Rank: {}\n\
             Your Winning Number: {}\n\
             Your Prize: {}\n\n\
             We will be in contact with you shortly regarding your prize.",
            self.player_name, self.round_name, self.prize_tier, self.winning_number, self.prize_amount
        )
    }
}

/// Delivery channel to players (chat bot, mail, push).
pub trait WinnerNotifier {
    type Error: Display;

    fn deliver(&self, notice: &WinnerNotice) -> std::result::Result<(), Self::Error>;
}

/// Sends one notice per winner, 1st prize first. Returns how many were delivered.
pub fn notify_winners<N: WinnerNotifier>(notifier: &N, round: &Round, draw: &DrawResult) -> usize {
    let mut delivered = 0;
    for winner in list_winners(draw) {
        let notice = WinnerNotice::new(round, winner);
        match notifier.deliver(&notice) {
            Ok(()) => delivered += 1,
            Err(err) => msg!(
                "Could not notify {} (tier {}, round {}): {}",
                notice.player,
                notice.prize_tier,
                notice.round_id,
                err
            ),
        }
    }
    delivered
}
