use anchor_lang::prelude::*;

use crate::audit;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction};
use crate::state::{LotteryConfig, Round};

/// Accounts required to initialize the lottery configuration.
/// The payer becomes the operator of every round.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Program-wide configuration holding the operator key and round counter.
    #[account(
        init,
        payer = payer,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, LotteryConfig>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to open a new round.
#[derive(Accounts)]
#[instruction(name: String, price: u64, grid_size: u16)]
pub struct CreateRound<'info> {
    /// The operator, paying for the round account.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    /// The new round, addressed by the next round id.
    #[account(
        init,
        payer = authority,
        space = Round::space(grid_size),
        seeds = [ROUND_SEED, (config.round_count + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to archive a completed round.
#[derive(Accounts)]
pub struct ArchiveRound<'info> {
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
}

/// Accounts required to delete a round; the account is closed to the operator.
#[derive(Accounts)]
pub struct DeleteRound<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        close = authority,
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,
}

/// Sets up the configuration account and makes the payer the operator.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
pub fn process_initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.payer.key();
    config.round_count = 0;
    config.bump = ctx.bumps.config;

    msg!("Lottery configured, operator: {}", config.authority);
    Ok(())
}

/// Opens a new round after validating its name, price and grid size.
///
/// # Arguments
/// * `ctx` - Context holding the CreateRound accounts
/// * `name` - Display name, `[A-Za-z0-9 .-]` only
/// * `price` - Cost of a single number
/// * `grid_size` - Numbers on offer are `1..=grid_size`
pub fn process_create_round(
    ctx: Context<CreateRound>,
    name: String,
    price: u64,
    grid_size: u16,
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    let id = config.round_count.checked_add(1).ok_or(ErrorCode::Overflow)?;

    let round = Round::open(
        id,
        name,
        price,
        grid_size,
        clock.unix_timestamp,
        ctx.bumps.round,
    )?;
    let details = format!("Created round {:?} with ID {}", round.name, id);

    ctx.accounts.round.set_inner(round);
    config.round_count = id;

    msg!("Round {} opened: {} numbers at {} each", id, grid_size, price);
    audit::record(Actor::Admin, AuditAction::CreateRound, id, details);
    Ok(())
}

/// Deletes an open round nobody has selected a number in.
pub fn process_delete_round(ctx: Context<DeleteRound>) -> Result<()> {
    let round = &ctx.accounts.round;
    round.ensure_deletable()?;

    msg!("Round {} deleted", round.id);
    audit::record(
        Actor::Admin,
        AuditAction::DeleteRound,
        round.id,
        format!("Deleted round ID {}", round.id),
    );
    Ok(())
}

/// Moves a completed round to the archive.
pub fn process_archive_round(ctx: Context<ArchiveRound>) -> Result<()> {
    let round = &mut ctx.accounts.round;
    round.archive()?;

    msg!("Round {} archived", round.id);
    audit::record(
        Actor::Admin,
        AuditAction::ArchiveRound,
        round.id,
        format!("Archived round ID {}", round.id),
    );
    Ok(())
}
