//! Number ledger: keeps a round's slot map and its selection accounts in step.
//!
//! The instructions hand in the already-loaded accounts; the runtime holds a
//! write lock on both for the whole transaction, so each function here runs as
//! one atomic step with respect to other transactions on the same round.

use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::{is_valid_player_name, Round, Selection, SelectionStatus};

/// Identity of a newly claimed number.
pub struct Reservation {
    pub round: Pubkey,
    pub number: u16,
    pub player: Pubkey,
    pub player_name: String,
    pub created_at: i64,
    pub bump: u8,
}

/// Claims `reservation.number` for the player as a pending selection.
///
/// `selection` is the account at the `(round, number)` address. If it is
/// already populated the number is taken, whatever the slot map says.
pub fn reserve(round: &mut Round, selection: &mut Selection, reservation: Reservation) -> Result<()> {
    if !is_valid_player_name(&reservation.player_name) {
        msg!("Player name must be 1-32 characters");
        return err!(ErrorCode::InvalidInput);
    }
    require!(selection.is_vacant(), ErrorCode::NumberUnavailable);

    let id = round.reserve_number(reservation.number)?;

    *selection = Selection {
        id,
        round: reservation.round,
        round_id: round.id,
        number: reservation.number,
        player: reservation.player,
        player_name: reservation.player_name,
        status: SelectionStatus::Pending,
        created_at: reservation.created_at,
        bump: reservation.bump,
    };
    Ok(())
}

/// Promotes a pending selection to confirmed.
pub fn confirm(round: &mut Round, selection: &mut Selection) -> Result<()> {
    selection.ensure_pending()?;
    require!(selection.round_id == round.id, ErrorCode::NotFound);

    round.confirm_number(selection.number)?;
    selection.status = SelectionStatus::Confirmed;
    Ok(())
}

/// Frees the number held by a pending selection. The caller closes the account.
pub fn release(round: &mut Round, selection: &Selection) -> Result<()> {
    selection.ensure_pending()?;
    require!(selection.round_id == round.id, ErrorCode::NotFound);

    round.release_number(selection.number)
}

/// Checks a selection may be closed for its rent. Only archived rounds give
/// their selections back; the slot map keeps the round's history.
pub fn reclaim(round: &Round, selection: &Selection) -> Result<()> {
    round.ensure_archived()?;
    require!(selection.round_id == round.id, ErrorCode::NotFound);
    Ok(())
}
