use anchor_lang::prelude::*;

use crate::audit;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction};
use crate::ledger;
use crate::state::{DrawResult, LotteryConfig, Round, Selection};

/// Accounts required to close a selection of an archived round.
/// The rent goes back to the player who paid for it.
#[derive(Accounts)]
pub struct CloseSelection<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        close = player,
        seeds = [SELECTION_SEED, round.key().as_ref(), selection.number.to_le_bytes().as_ref()],
        bump = selection.bump,
        constraint = selection.round == round.key() @ ErrorCode::NotFound,
    )]
    pub selection: Account<'info, Selection>,

    #[account(mut, address = selection.player @ ErrorCode::NotFound)]
    pub player: SystemAccount<'info>,
}

/// Accounts required to close the draw result of an archived round.
#[derive(Accounts)]
pub struct CloseDrawResult<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        close = authority,
        seeds = [DRAW_SEED, round.key().as_ref()],
        bump = draw_result.bump,
    )]
    pub draw_result: Account<'info, DrawResult>,
}

/// Returns a selection's rent to its player once the round is archived.
pub fn process_close_selection(ctx: Context<CloseSelection>) -> Result<()> {
    let round = &ctx.accounts.round;
    let selection = &ctx.accounts.selection;
    ledger::reclaim(round, selection)?;

    msg!(
        "Selection {} (#{}) of round {} closed",
        selection.id,
        selection.number,
        round.id
    );
    audit::record(
        Actor::Admin,
        AuditAction::CloseSelection,
        round.id,
        format!(
            "Closed selection ID {} (#{} for {})",
            selection.id, selection.number, selection.player_name
        ),
    );
    Ok(())
}

/// Returns the draw result's rent to the operator once the round is archived.
/// The winners stay available in the `WinnerDrawn` events.
pub fn process_close_draw_result(ctx: Context<CloseDrawResult>) -> Result<()> {
    let round = &ctx.accounts.round;
    round.ensure_archived()?;

    msg!("Draw result of round {} closed", round.id);
    audit::record(
        Actor::Admin,
        AuditAction::CloseDrawResult,
        round.id,
        format!("Closed draw result of round ID {}", round.id),
    );
    Ok(())
}
