use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::audit;
use crate::constants::*;
use crate::draw;
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction};
use crate::state::{LotteryConfig, Round};

/// Accounts required to reveal the committed randomness of a round.
///
/// This ensures that:
/// 1. Only the operator can reveal.
/// 2. The randomness account provided matches the one committed.
/// 3. The seed has not been revealed before.
#[derive(Accounts)]
pub struct RevealDraw<'info> {
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

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Stores the revealed randomness on the round.
///
/// The winners follow deterministically from the stored seed and the frozen
/// entries, so once this succeeds anyone can compute them with
/// `draw::select_winners` before calling `run_draw`.
pub fn process_reveal_draw(ctx: Context<RevealDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let round = &mut ctx.accounts.round;

    require!(round.is_draw_committed(), ErrorCode::DrawNotCommitted);
    require_keys_eq!(
        ctx.accounts.randomness_account_data.key(),
        round.randomness_account,
        ErrorCode::IncorrectRandomnessAccount
    );

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;
    require!(
        randomness_data.seed_slot == round.commit_slot,
        ErrorCode::IncorrectRandomnessAccount
    );

    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;

    round.reveal_seed(revealed_random_value)?;

    let winners = draw::select_winners(revealed_random_value, &round.confirmed_numbers())?;
    msg!("Randomness revealed for round {}", round.id);
    msg!("Winning numbers: {:?}", winners);

    audit::record(
        Actor::Admin,
        AuditAction::RevealDraw,
        round.id,
        format!("Revealed draw seed for round {}", round.id),
    );
    Ok(())
}
