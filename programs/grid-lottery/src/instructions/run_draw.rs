use anchor_lang::prelude::*;

use crate::audit;
use crate::constants::*;
use crate::draw::{self, DrawPlan};
use crate::error::ErrorCode;
use crate::events::{Actor, AuditAction, WinnerDrawn};
use crate::state::{DrawResult, LotteryConfig, Round, Selection, Winner};

/// Accounts required to run a round's draw.
///
/// The three winning selection accounts follow as remaining accounts, in
/// prize-tier order. The client derives them from the revealed seed with
/// `draw::select_winners`; the handler recomputes and checks every one.
#[derive(Accounts)]
pub struct RunDraw<'info> {
    /// The operator, paying for the draw result account.
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
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    /// One per round. An existing result is loaded rather than re-created so
    /// that a repeated draw reaches the round status check.
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + DrawResult::INIT_SPACE,
        seeds = [DRAW_SEED, round.key().as_ref()],
        bump
    )]
    pub draw_result: Account<'info, DrawResult>,

    pub system_program: Program<'info, System>,
}

/// Selects the three winners, records them with their prizes and closes the round.
///
/// Steps performed:
/// 1. Check the round is open, has at least three confirmed players and a revealed seed.
/// 2. Draw three distinct confirmed numbers and split the prize pool.
/// 3. Match each winning number to its confirmed selection account.
/// 4. Write the draw result and mark the round completed.
///
/// All of it happens in this one instruction, so either the winners and the
/// status change are both stored or neither is. The winners are also set as
/// the instruction's return data, 1st prize first.
pub fn process_run_draw<'info>(
    mut ctx: Context<'_, '_, '_, 'info, RunDraw<'info>>,
) -> Result<Vec<Winner>> {
    let clock = Clock::get()?;
    let round_key = ctx.accounts.round.key();
    let accounts = &mut ctx.accounts;

    let winners = settle_draw(
        &mut accounts.round,
        round_key,
        &mut accounts.draw_result,
        ctx.bumps.draw_result,
        clock.unix_timestamp,
        ctx.program_id,
        ctx.remaining_accounts,
    )?;

    let round = &accounts.round;
    let result = &accounts.draw_result;
    msg!(
        "Draw completed for round {}: pool {}, house keeps {}",
        round.id,
        result.prize_pool,
        result.house_share
    );
    for winner in &winners {
        msg!(
            "Tier {}: #{} {} wins {}",
            winner.prize_tier,
            winner.winning_number,
            winner.player_name,
            winner.prize_amount
        );
        emit!(WinnerDrawn {
            round: round_key,
            round_id: round.id,
            prize_tier: winner.prize_tier,
            winning_number: winner.winning_number,
            player: winner.player,
            player_name: winner.player_name.clone(),
            prize_amount: winner.prize_amount,
        });
    }

    let numbers: Vec<u16> = winners.iter().map(|w| w.winning_number).collect();
    audit::record(
        Actor::Admin,
        AuditAction::RunDraw,
        round.id,
        format!(
            "Draw completed for round {}. Winning numbers {:?}",
            round.id, numbers
        ),
    );
    Ok(winners)
}

/// Plans the draw, resolves the winners and writes the result.
///
/// The round status is checked before anything is written, so a round that
/// was already drawn fails with `RoundNotOpen` and `result` keeps its winners.
pub fn settle_draw(
    round: &mut Round,
    round_key: Pubkey,
    result: &mut DrawResult,
    bump: u8,
    drawn_at: i64,
    program_id: &Pubkey,
    accounts: &[AccountInfo],
) -> Result<Vec<Winner>> {
    let plan = draw::plan_draw(round)?;
    let winners = load_winners(program_id, &round_key, &plan, accounts)?;

    *result = DrawResult {
        round: round_key,
        round_id: round.id,
        prize_pool: plan.split.pool,
        house_share: plan.split.house,
        seed: plan.seed,
        drawn_at,
        winners: winners.clone(),
        bump,
    };
    round.complete()?;
    Ok(winners)
}

/// Reads the winning selections from `accounts` (tier order) and checks each
/// is the confirmed selection for the number drawn at that tier.
fn load_winners(
    program_id: &Pubkey,
    round_key: &Pubkey,
    plan: &DrawPlan,
    accounts: &[AccountInfo],
) -> Result<Vec<Winner>> {
    require_gte!(accounts.len(), WINNER_COUNT, ErrorCode::WinnerAccountMismatch);

    let mut winners = Vec::with_capacity(WINNER_COUNT);
    for (tier, ((number, amount), info)) in plan
        .winning_numbers
        .iter()
        .zip(plan.split.tiers)
        .zip(accounts)
        .enumerate()
    {
        let (expected, _) = Pubkey::find_program_address(
            &[SELECTION_SEED, round_key.as_ref(), number.to_le_bytes().as_ref()],
            program_id,
        );
        require_keys_eq!(info.key(), expected, ErrorCode::WinnerAccountMismatch);
        require_keys_eq!(*info.owner, *program_id, ErrorCode::WinnerAccountMismatch);

        let data = info.try_borrow_data()?;
        let selection = Selection::try_deserialize(&mut &data[..])?;
        require!(
            selection.is_confirmed() && selection.number == *number,
            ErrorCode::WinnerAccountMismatch
        );

        winners.push(Winner {
            prize_tier: (tier + 1) as u8,
            winning_number: *number,
            player: selection.player,
            player_name: selection.player_name,
            prize_amount: amount,
        });
    }
    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_error;
    use crate::state::SelectionStatus;
    use solana_program::hash::hashv;

    /// Backing storage for a selection `AccountInfo`.
    struct SelectionAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl SelectionAccount {
        fn new(round_key: &Pubkey, number: u16, status: SelectionStatus) -> Self {
            let (key, bump) = Pubkey::find_program_address(
                &[SELECTION_SEED, round_key.as_ref(), number.to_le_bytes().as_ref()],
                &crate::ID,
            );
            let selection = Selection {
                id: u64::from(number),
                round: *round_key,
                round_id: 9,
                number,
                player: Pubkey::new_unique(),
                player_name: format!("player{number}"),
                status,
                created_at: 0,
                bump,
            };
            let mut data = Vec::new();
            selection.try_serialize(&mut data).unwrap();
            Self {
                key,
                owner: crate::ID,
                lamports: 1_000_000,
                data,
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                false,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn revealed_round() -> Round {
        let mut round = Round::open(9, "Test Round".into(), 10, 50, 0, 1).unwrap();
        for number in [5, 6, 7, 21] {
            round.reserve_number(number).unwrap();
        }
        for number in [5, 6, 7] {
            round.confirm_number(number).unwrap();
        }
        round.commit_randomness(Pubkey::new_unique(), 1).unwrap();
        round
            .reveal_seed(hashv(&[b"run-draw-test".as_ref()]).to_bytes())
            .unwrap();
        round
    }

    /// Confirmed selection accounts for the planned winners, 1st prize first.
    fn winner_accounts(round_key: &Pubkey, plan: &DrawPlan) -> Vec<SelectionAccount> {
        plan.winning_numbers
            .iter()
            .map(|number| SelectionAccount::new(round_key, *number, SelectionStatus::Confirmed))
            .collect()
    }

    fn empty_result() -> DrawResult {
        DrawResult {
            round: Pubkey::default(),
            round_id: 0,
            prize_pool: 0,
            house_share: 0,
            seed: [0; 32],
            drawn_at: 0,
            winners: Vec::new(),
            bump: 0,
        }
    }

    #[test]
    fn winners_come_out_in_tier_order() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();

        let winners = load_winners(&crate::ID, &round_key, &plan, &infos).unwrap();
        let tiers: Vec<u8> = winners.iter().map(|w| w.prize_tier).collect();
        let prizes: Vec<u64> = winners.iter().map(|w| w.prize_amount).collect();
        let numbers: Vec<u16> = winners.iter().map(|w| w.winning_number).collect();
        assert_eq!(tiers, [1, 2, 3]);
        assert_eq!(prizes, [12, 6, 3]);
        assert_eq!(numbers, plan.winning_numbers);
        assert_eq!(winners[0].player_name, format!("player{}", numbers[0]));
    }

    #[test]
    fn missing_winner_account_is_rejected() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        let infos: Vec<AccountInfo> = accounts.iter_mut().take(2).map(SelectionAccount::info).collect();

        assert_error(
            load_winners(&crate::ID, &round_key, &plan, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
    }

    #[test]
    fn accounts_out_of_tier_order_are_rejected() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        accounts.swap(0, 1);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();

        assert_error(
            load_winners(&crate::ID, &round_key, &plan, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
    }

    #[test]
    fn selection_of_another_round_is_rejected() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&Pubkey::new_unique(), &plan);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();

        assert_error(
            load_winners(&crate::ID, &round_key, &plan, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
    }

    #[test]
    fn pending_winner_selection_is_rejected() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        accounts[2] =
            SelectionAccount::new(&round_key, plan.winning_numbers[2], SelectionStatus::Pending);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();

        assert_error(
            load_winners(&crate::ID, &round_key, &plan, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
    }

    #[test]
    fn winner_account_owned_elsewhere_is_rejected() {
        let round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        accounts[1].owner = Pubkey::new_unique();
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();

        assert_error(
            load_winners(&crate::ID, &round_key, &plan, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
    }

    #[test]
    fn second_draw_fails_with_round_not_open() {
        let mut round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(SelectionAccount::info).collect();
        let mut result = empty_result();

        let winners =
            settle_draw(&mut round, round_key, &mut result, 254, 1_700, &crate::ID, &infos)
                .unwrap();
        assert!(!round.is_open());
        assert_eq!(result.winners, winners);
        assert_eq!(result.prize_pool, 30);
        assert_eq!(result.house_share, 9);
        let stored = result.try_to_vec().unwrap();

        assert_error(
            settle_draw(&mut round, round_key, &mut result, 254, 1_800, &crate::ID, &infos),
            ErrorCode::RoundNotOpen,
        );
        assert_eq!(result.try_to_vec().unwrap(), stored);

        round.archive().unwrap();
        assert_error(
            settle_draw(&mut round, round_key, &mut result, 254, 1_900, &crate::ID, &infos),
            ErrorCode::RoundNotOpen,
        );
        assert_eq!(result.try_to_vec().unwrap(), stored);
    }

    #[test]
    fn failed_winner_check_leaves_round_open() {
        let mut round = revealed_round();
        let round_key = Pubkey::new_unique();
        let plan = draw::plan_draw(&round).unwrap();
        let mut accounts = winner_accounts(&round_key, &plan);
        let infos: Vec<AccountInfo> = accounts.iter_mut().take(1).map(SelectionAccount::info).collect();
        let mut result = empty_result();

        assert_error(
            settle_draw(&mut round, round_key, &mut result, 254, 1_700, &crate::ID, &infos),
            ErrorCode::WinnerAccountMismatch,
        );
        assert!(round.is_open());
        assert!(result.winners.is_empty());
    }
}
