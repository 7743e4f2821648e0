use anchor_lang::prelude::*;

use crate::audit;
use crate::constants::*;
use crate::events::{Actor, AuditAction};
use crate::ledger::{self, Reservation};
use crate::state::{Round, Selection};

/// Accounts required to reserve a number in a round.
///
/// The selection PDA is derived from `(round, number)`, so at most one can
/// exist per number. `init_if_needed` lets the handler tell a taken number
/// apart from other failures instead of surfacing a raw "already in use".
#[derive(Accounts)]
#[instruction(number: u16)]
pub struct ReserveNumber<'info> {
    /// The player claiming the number; their key is the selection's user id.
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        init_if_needed,
        payer = player,
        space = 8 + Selection::INIT_SPACE,
        seeds = [SELECTION_SEED, round.key().as_ref(), number.to_le_bytes().as_ref()],
        bump
    )]
    pub selection: Account<'info, Selection>,

    pub system_program: Program<'info, System>,
}

/// Reserves `number` for the calling player as a pending selection.
///
/// # Arguments
/// * `ctx` - Context containing ReserveNumber accounts
/// * `number` - Number within `1..=grid_size`
/// * `player_name` - Display name shown to the operator and on the winner list
pub fn process_reserve_number(
    ctx: Context<ReserveNumber>,
    number: u16,
    player_name: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let round_key = ctx.accounts.round.key();
    let player = ctx.accounts.player.key();

    ledger::reserve(
        &mut ctx.accounts.round,
        &mut ctx.accounts.selection,
        Reservation {
            round: round_key,
            number,
            player,
            player_name,
            created_at: clock.unix_timestamp,
            bump: ctx.bumps.selection,
        },
    )?;

    let round = &ctx.accounts.round;
    let selection = &ctx.accounts.selection;
    msg!(
        "Selection {} for number {} in round {} is pending approval",
        selection.id,
        number,
        round.id
    );
    audit::record(
        Actor::Player,
        AuditAction::SelectNumber,
        round.id,
        format!(
            "User {} selected #{} in round {}",
            selection.player_name, number, round.id
        ),
    );
    Ok(())
}
