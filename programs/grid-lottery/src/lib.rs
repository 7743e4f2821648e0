#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod audit;
pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod notify;
pub mod query;
pub mod state;

use instructions::*;

declare_id!("6mCqDgPH96bSRXnpC7REj4Sa6qAv5Pgzbfk7mumPdhZz");

#[program]
pub mod grid_lottery {
    use super::*;

    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        process_initialize_config(ctx)
    }

    pub fn create_round(
        ctx: Context<CreateRound>,
        name: String,
        price: u64,
        grid_size: u16,
    ) -> Result<()> {
        process_create_round(ctx, name, price, grid_size)
    }

    pub fn delete_round(ctx: Context<DeleteRound>) -> Result<()> {
        process_delete_round(ctx)
    }

    pub fn archive_round(ctx: Context<ArchiveRound>) -> Result<()> {
        process_archive_round(ctx)
    }

    pub fn reserve_number(
        ctx: Context<ReserveNumber>,
        number: u16,
        player_name: String,
    ) -> Result<()> {
        process_reserve_number(ctx, number, player_name)
    }

    pub fn approve_selection(ctx: Context<ApproveSelection>) -> Result<()> {
        process_approve_selection(ctx)
    }

    pub fn reject_selection(ctx: Context<RejectSelection>) -> Result<()> {
        process_reject_selection(ctx)
    }

    pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
        process_commit_draw(ctx)
    }

    pub fn reveal_draw(ctx: Context<RevealDraw>) -> Result<()> {
        process_reveal_draw(ctx)
    }

    /// Remaining accounts: the three winning selections, 1st prize first.
    /// Returns the winners in the same order.
    pub fn run_draw<'info>(
        ctx: Context<'_, '_, '_, 'info, RunDraw<'info>>,
    ) -> Result<Vec<state::Winner>> {
        process_run_draw(ctx)
    }

    pub fn close_selection(ctx: Context<CloseSelection>) -> Result<()> {
        process_close_selection(ctx)
    }

    pub fn close_draw_result(ctx: Context<CloseDrawResult>) -> Result<()> {
        process_close_draw_result(ctx)
    }
}
