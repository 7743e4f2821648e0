use anchor_lang::prelude::*;

use crate::audit;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction};
use crate::ledger;
use crate::state::{LotteryConfig, Round, Selection};

/// Accounts required to approve a pending selection.
#[derive(Accounts)]
pub struct ApproveSelection<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [SELECTION_SEED, round.key().as_ref(), selection.number.to_le_bytes().as_ref()],
        bump = selection.bump,
        constraint = selection.round == round.key() @ ErrorCode::NotFound,
    )]
    pub selection: Account<'info, Selection>,
}

/// Accounts required to reject a pending selection.
/// The selection account is closed and its rent goes back to the player.
#[derive(Accounts)]
pub struct RejectSelection<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        mut,
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

    /// The player who paid for the selection.
    #[account(mut, address = selection.player @ ErrorCode::NotFound)]
    pub player: SystemAccount<'info>,
}

/// Confirms a pending selection. Approving it a second time fails with `NotPending`.
pub fn process_approve_selection(ctx: Context<ApproveSelection>) -> Result<()> {
    ledger::confirm(&mut ctx.accounts.round, &mut ctx.accounts.selection)?;

    let round = &ctx.accounts.round;
    let selection = &ctx.accounts.selection;
    msg!(
        "Selection {} (#{}) confirmed, round {} has {} confirmed players",
        selection.id,
        selection.number,
        round.id,
        round.confirmed_count
    );
    audit::record(
        Actor::Admin,
        AuditAction::ApproveSelection,
        round.id,
        format!(
            "Approved selection ID {} (#{} for {})",
            selection.id, selection.number, selection.player_name
        ),
    );
    Ok(())
}

/// Rejects a pending selection and frees its number.
/// A selection that was already rejected no longer exists, so a repeat fails
/// during account loading.
pub fn process_reject_selection(ctx: Context<RejectSelection>) -> Result<()> {
    ledger::release(&mut ctx.accounts.round, &ctx.accounts.selection)?;

    let round = &ctx.accounts.round;
    let selection = &ctx.accounts.selection;
    msg!(
        "Selection {} rejected, number {} is free again",
        selection.id,
        selection.number
    );
    audit::record(
        Actor::Admin,
        AuditAction::RejectSelection,
        round.id,
        format!(
            "Disapproved selection ID {} (#{} for {})",
            selection.id, selection.number, selection.player_name
        ),
    );
    Ok(())
}
