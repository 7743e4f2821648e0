//! Read-side views for the service layer in front of the program.
//!
//! These work on accounts fetched from the cluster (rounds, selections, draw
//! results) and on audit entries indexed from transaction logs. Nothing here
//! runs on-chain or changes state.
//!
//! ```rust,ignore
//! let open = query::list_open_rounds(&rounds).collect::<Vec<_>>();
//! let state = query::round_state(&round, &selections);
//! let recent = query::recent_winners(&rounds, &draws, Some(10));
//! ```

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::AuditLogEntry;
use crate::state::{DrawResult, NumberStatus, Round, RoundStatus, Selection, SelectionStatus, Winner};

/// An open round with the number of confirmed players in it.
#[derive(Clone, Copy)]
pub struct OpenRound<'a> {
    pub round: &'a Round,
    pub confirmed_players: u32,
}

/// Who holds a number and how far along the claim is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberClaim {
    pub status: NumberStatus,
    pub player_name: Option<String>,
}

/// A round and the status of every claimed number in it.
#[derive(Clone)]
pub struct RoundState<'a> {
    pub round: &'a Round,
    pub numbers: BTreeMap<u16, NumberClaim>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentWinner {
    pub round_id: u64,
    pub round_name: String,
    pub prize_tier: u8,
    pub player_name: String,
    pub prize_amount: u64,
    pub drawn_at: i64,
}

#[derive(Clone)]
pub struct RoundWinners<'a> {
    pub round: &'a Round,
    pub winners: Vec<&'a Winner>,
}

fn newest_first(rounds: &[Round]) -> Vec<&Round> {
    let mut sorted: Vec<&Round> = rounds.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    sorted
}

fn capped(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).min(MAX_QUERY_LIMIT)
}

/// All rounds, newest first; archived rounds only when asked for.
pub fn list_rounds(rounds: &[Round], include_archived: bool) -> impl Iterator<Item = &Round> {
    newest_first(rounds)
        .into_iter()
        .filter(move |round| include_archived || round.status != RoundStatus::Archived)
}

/// Open rounds, newest first, with their confirmed player counts.
pub fn list_open_rounds(rounds: &[Round]) -> impl Iterator<Item = OpenRound<'_>> {
    newest_first(rounds)
        .into_iter()
        .filter(|round| round.is_open())
        .map(|round| OpenRound {
            round,
            confirmed_players: round.confirmed_count,
        })
}

/// Number-by-number view of a round. Numbers without a claim are left out.
///
/// `selections` may hold selections of any round; only those of `round`
/// contribute player names.
pub fn round_state<'a>(round: &'a Round, selections: &[Selection]) -> RoundState<'a> {
    let names: BTreeMap<u16, &str> = selections
        .iter()
        .filter(|selection| selection.round_id == round.id)
        .map(|selection| (selection.number, selection.player_name.as_str()))
        .collect();

    let numbers = round
        .slots
        .iter()
        .zip(1u16..)
        .filter(|(status, _)| **status != NumberStatus::Free)
        .map(|(status, number)| {
            let claim = NumberClaim {
                status: *status,
                player_name: names.get(&number).map(|name| name.to_string()),
            };
            (number, claim)
        })
        .collect();

    RoundState { round, numbers }
}

/// Pending selections of a round awaiting the operator, lowest number first.
pub fn list_pending<'a>(
    round: &Round,
    selections: &'a [Selection],
) -> impl Iterator<Item = &'a Selection> {
    let round_id = round.id;
    let mut pending: Vec<&Selection> = selections
        .iter()
        .filter(|selection| {
            selection.round_id == round_id && selection.status == SelectionStatus::Pending
        })
        .collect();
    pending.sort_by_key(|selection| selection.number);
    pending.into_iter()
}

/// Winners of one draw, 1st prize first.
pub fn list_winners(draw: &DrawResult) -> impl Iterator<Item = &Winner> {
    let mut winners: Vec<&Winner> = draw.winners.iter().collect();
    winners.sort_by_key(|winner| winner.prize_tier);
    winners.into_iter()
}

/// Latest winners across all rounds, most recent draw first.
/// `limit` defaults to 5 and is capped at 50.
pub fn recent_winners(
    rounds: &[Round],
    draws: &[DrawResult],
    limit: Option<usize>,
) -> impl Iterator<Item = RecentWinner> {
    let names: BTreeMap<u64, &str> = rounds
        .iter()
        .map(|round| (round.id, round.name.as_str()))
        .collect();

    let mut sorted: Vec<&DrawResult> = draws.iter().collect();
    sorted.sort_by(|a, b| b.drawn_at.cmp(&a.drawn_at).then(b.round_id.cmp(&a.round_id)));

    let recent: Vec<RecentWinner> = sorted
        .into_iter()
        .flat_map(|draw| list_winners(draw).map(move |winner| (draw, winner)))
        .map(|(draw, winner)| RecentWinner {
            round_id: draw.round_id,
            round_name: names.get(&draw.round_id).copied().unwrap_or_default().to_string(),
            prize_tier: winner.prize_tier,
            player_name: winner.player_name.clone(),
            prize_amount: winner.prize_amount,
            drawn_at: draw.drawn_at,
        })
        .take(capped(limit, DEFAULT_RECENT_WINNERS))
        .collect();
    recent.into_iter()
}

/// Full winner lists of the last `last_rounds` drawn rounds (default 3),
/// highest round id first.
pub fn winner_history<'a>(
    rounds: &'a [Round],
    draws: &'a [DrawResult],
    last_rounds: Option<usize>,
) -> impl Iterator<Item = RoundWinners<'a>> {
    let mut drawn: Vec<&Round> = rounds
        .iter()
        .filter(|round| round.status != RoundStatus::Open)
        .collect();
    drawn.sort_by(|a, b| b.id.cmp(&a.id));
    drawn.truncate(capped(last_rounds, DEFAULT_HISTORY_ROUNDS));

    drawn.into_iter().map(move |round| RoundWinners {
        round,
        winners: draws
            .iter()
            .find(|draw| draw.round_id == round.id)
            .map(|draw| list_winners(draw).collect())
            .unwrap_or_default(),
    })
}

/// Audit entries, newest first. `entries` is in log order; `limit` is capped at 50.
pub fn recent_audit_logs(
    entries: &[AuditLogEntry],
    limit: usize,
) -> impl Iterator<Item = &AuditLogEntry> {
    entries.iter().rev().take(limit.min(MAX_QUERY_LIMIT))
}

/// Looks up a round by id.
pub fn find_round(rounds: &[Round], round_id: u64) -> Result<&Round> {
    rounds
        .iter()
        .find(|round| round.id == round_id)
        .ok_or_else(|| error!(crate::error::ErrorCode::NotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit;
    use crate::error::{assert_error, ErrorCode};
    use crate::events::{Actor, AuditAction};

    fn round(id: u64, created_at: i64, status: RoundStatus) -> Round {
        let mut round = Round::open(id, format!("Round {id}"), 10, 30, created_at, 1).unwrap();
        round.status = status;
        round
    }

    fn selection(round_id: u64, number: u16, name: &str, status: SelectionStatus) -> Selection {
        Selection {
            id: u64::from(number),
            round: Pubkey::default(),
            round_id,
            number,
            player: Pubkey::new_unique(),
            player_name: name.to_string(),
            status,
            created_at: 0,
            bump: 0,
        }
    }

    fn draw(round_id: u64, drawn_at: i64, names: [&str; 3]) -> DrawResult {
        DrawResult {
            round: Pubkey::default(),
            round_id,
            prize_pool: 30,
            house_share: 9,
            seed: [0; 32],
            drawn_at,
            // stored out of tier order on purpose
            winners: vec![
                winner(3, names[2], 3),
                winner(1, names[0], 12),
                winner(2, names[1], 6),
            ],
            bump: 0,
        }
    }

    fn winner(prize_tier: u8, name: &str, prize_amount: u64) -> Winner {
        Winner {
            prize_tier,
            winning_number: u16::from(prize_tier),
            player: Pubkey::new_unique(),
            player_name: name.to_string(),
            prize_amount,
        }
    }

    #[test]
    fn rounds_are_listed_newest_first() {
        let rounds = vec![
            round(1, 100, RoundStatus::Archived),
            round(2, 300, RoundStatus::Open),
            round(3, 200, RoundStatus::Completed),
        ];

        let ids: Vec<u64> = list_rounds(&rounds, false).map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        let ids: Vec<u64> = list_rounds(&rounds, true).map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn open_rounds_carry_confirmed_counts() {
        let mut busy = round(1, 100, RoundStatus::Open);
        for number in [4, 5] {
            busy.reserve_number(number).unwrap();
            busy.confirm_number(number).unwrap();
        }
        busy.reserve_number(6).unwrap();
        let rounds = vec![busy, round(2, 200, RoundStatus::Open), round(3, 300, RoundStatus::Completed)];

        let open: Vec<(u64, u32)> = list_open_rounds(&rounds)
            .map(|open| (open.round.id, open.confirmed_players))
            .collect();
        assert_eq!(open, vec![(2, 0), (1, 2)]);
    }

    #[test]
    fn round_state_maps_claimed_numbers() {
        let mut r = round(7, 0, RoundStatus::Open);
        r.reserve_number(3).unwrap();
        r.reserve_number(9).unwrap();
        r.confirm_number(9).unwrap();
        let selections = vec![
            selection(7, 3, "ann", SelectionStatus::Pending),
            selection(7, 9, "bo", SelectionStatus::Confirmed),
            selection(8, 3, "other round", SelectionStatus::Pending),
        ];

        let state = round_state(&r, &selections);
        assert_eq!(state.numbers.len(), 2);
        assert_eq!(
            state.numbers[&3],
            NumberClaim {
                status: NumberStatus::Pending,
                player_name: Some("ann".into())
            }
        );
        assert_eq!(state.numbers[&9].status, NumberStatus::Confirmed);
        assert!(!state.numbers.contains_key(&1));
    }

    #[test]
    fn pending_list_skips_confirmed_and_other_rounds() {
        let r = round(7, 0, RoundStatus::Open);
        let selections = vec![
            selection(7, 12, "c", SelectionStatus::Pending),
            selection(7, 2, "a", SelectionStatus::Pending),
            selection(7, 5, "b", SelectionStatus::Confirmed),
            selection(8, 1, "x", SelectionStatus::Pending),
        ];
        let numbers: Vec<u16> = list_pending(&r, &selections).map(|s| s.number).collect();
        assert_eq!(numbers, vec![2, 12]);
    }

    #[test]
    fn winners_come_in_tier_order() {
        let d = draw(1, 10, ["a", "b", "c"]);
        let tiers: Vec<(u8, u64)> = list_winners(&d).map(|w| (w.prize_tier, w.prize_amount)).collect();
        assert_eq!(tiers, vec![(1, 12), (2, 6), (3, 3)]);
    }

    #[test]
    fn recent_winners_newest_draw_first_and_capped() {
        let rounds = vec![round(1, 0, RoundStatus::Completed), round(2, 0, RoundStatus::Archived)];
        let draws = vec![draw(1, 100, ["a", "b", "c"]), draw(2, 200, ["d", "e", "f"])];

        let recent: Vec<RecentWinner> = recent_winners(&rounds, &draws, None).collect();
        assert_eq!(recent.len(), DEFAULT_RECENT_WINNERS);
        assert_eq!(recent[0].round_name, "Round 2");
        assert_eq!(recent[0].player_name, "d");
        assert_eq!(recent[3].player_name, "a");

        let all: Vec<RecentWinner> = recent_winners(&rounds, &draws, Some(500)).collect();
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn history_covers_last_drawn_rounds() {
        let rounds: Vec<Round> = (1..=5)
            .map(|id| {
                let status = if id == 5 { RoundStatus::Open } else { RoundStatus::Completed };
                round(id, id as i64, status)
            })
            .collect();
        let draws: Vec<DrawResult> = (1..=4).map(|id| draw(id, id as i64, ["a", "b", "c"])).collect();

        let history: Vec<RoundWinners> = winner_history(&rounds, &draws, None).collect();
        let ids: Vec<u64> = history.iter().map(|h| h.round.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert!(history.iter().all(|h| h.winners.len() == 3));
        assert_eq!(history[0].winners[0].prize_tier, 1);
    }

    #[test]
    fn audit_logs_newest_first_capped_at_fifty() {
        let entries: Vec<AuditLogEntry> = (0..60)
            .map(|i| {
                audit::entry(
                    Actor::Player,
                    AuditAction::SelectNumber,
                    1,
                    format!("entry {i}"),
                    i,
                )
            })
            .collect();

        let recent: Vec<&AuditLogEntry> = recent_audit_logs(&entries, 100).collect();
        assert_eq!(recent.len(), MAX_QUERY_LIMIT);
        assert_eq!(recent[0].details, "entry 59");
        assert_eq!(recent[49].timestamp, 10);

        assert_eq!(recent_audit_logs(&entries, 3).count(), 3);
    }

    #[test]
    fn unknown_round_is_not_found() {
        let rounds = vec![round(1, 0, RoundStatus::Open)];
        assert_eq!(find_round(&rounds, 1).unwrap().id, 1);
        assert_error(find_round(&rounds, 2), ErrorCode::NotFound);
    }
}
