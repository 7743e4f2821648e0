use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::audit;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction};
use crate::state::{LotteryConfig, Round};

/// Accounts required to commit a randomness account for a round's draw.
///
/// Ensures:
/// 1. Only the operator can commit the randomness.
/// 2. The round is open and has enough confirmed players.
/// 3. The randomness account is fresh and has not been revealed.
#[derive(Accounts)]
pub struct CommitDraw<'info> {
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

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Binds the Switchboard randomness to the round and freezes its entries.
/// From here on no number can be reserved or approved in this round.
pub fn process_commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
    let clock = Clock::get()?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;

    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        msg!("Current slot: {}", clock.slot);
        msg!("Seed slot: {}", randomness_data.seed_slot);
        return err!(ErrorCode::RandomnessAlreadyRevealed);
    }

    let round = &mut ctx.accounts.round;
    round.commit_randomness(
        ctx.accounts.randomness_account_data.key(),
        randomness_data.seed_slot,
    )?;

    msg!(
        "Draw committed for round {} with {} confirmed players, entries frozen",
        round.id,
        round.confirmed_count
    );
    audit::record(
        Actor::Admin,
        AuditAction::CommitDraw,
        round.id,
        format!(
            "Committed randomness {} for round {}",
            round.randomness_account, round.id
        ),
    );
    Ok(())
}
