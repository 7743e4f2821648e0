use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RoundStatus {
    Open,      // accepting reservations
    Completed, // draw committed, winners recorded
    Archived,  // hidden from the default round listing
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum NumberStatus {
    Free,
    Pending,
    Confirmed,
}

/// One lottery round over the numbers `1..=grid_size`.
///
/// The round carries the status of every number in `slots` so the draw can read
/// the confirmed entries from a single account, and so every write to the ledger
/// of this round is serialized by the runtime's lock on this account.
#[account]
pub struct Round {
    /// Sequential identifier issued by `LotteryConfig`, also part of the PDA seeds.
    pub id: u64,

    /// Display name, restricted to `[A-Za-z0-9 .-]`.
    pub name: String,

    /// Cost of a single number.
    pub price: u64,

    /// Numbers on offer are `1..=grid_size`.
    pub grid_size: u16,

    pub status: RoundStatus,

    /// UNIX timestamp of creation.
    pub created_at: i64,

    /// Identifier handed to the next selection of this round.
    pub next_selection_id: u64,

    pub pending_count: u32,
    pub confirmed_count: u32,

    /// Switchboard randomness account bound by `commit_draw`.
    /// `Pubkey::default()` until a draw is committed.
    pub randomness_account: Pubkey,

    /// Slot the committed randomness was seeded in.
    pub commit_slot: u64,

    /// Revealed randomness used by `run_draw`.
    pub draw_seed: Option<[u8; 32]>,

    pub bump: u8,

    /// Status of number `n` lives at index `n - 1`.
    pub slots: Vec<NumberStatus>,
}

impl Round {
    pub const BASE_SIZE: usize = 8 // discriminator
        + 8                          // id
        + 4 + MAX_ROUND_NAME_LEN     // name
        + 8                          // price
        + 2                          // grid_size
        + 1                          // status
        + 8                          // created_at
        + 8                          // next_selection_id
        + 4                          // pending_count
        + 4                          // confirmed_count
        + 32                         // randomness_account
        + 8                          // commit_slot
        + 1 + 32                     // draw_seed
        + 1                          // bump
        + 4; // slots prefix

    /// Account size for a round with `grid_size` numbers.
    /// Clamped so that an out-of-range request still allocates and is then
    /// rejected by `Round::open` with a typed error.
    pub fn space(grid_size: u16) -> usize {
        Self::BASE_SIZE + grid_size.clamp(1, MAX_GRID_SIZE) as usize
    }

    /// Validates the round parameters and builds a fresh `Open` round.
    pub fn open(
        id: u64,
        name: String,
        price: u64,
        grid_size: u16,
        created_at: i64,
        bump: u8,
    ) -> Result<Self> {
        if !is_safe_name(&name) {
            msg!("Round name {:?} must be 1-{} characters of [A-Za-z0-9 .-]", name, MAX_ROUND_NAME_LEN);
            return err!(ErrorCode::InvalidInput);
        }
        if price == 0 {
            msg!("Round price must be greater than 0");
            return err!(ErrorCode::InvalidInput);
        }
        if grid_size == 0 || grid_size > MAX_GRID_SIZE {
            msg!("Grid size {} must be within 1-{}", grid_size, MAX_GRID_SIZE);
            return err!(ErrorCode::InvalidInput);
        }

        Ok(Self {
            id,
            name,
            price,
            grid_size,
            status: RoundStatus::Open,
            created_at,
            next_selection_id: 1,
            pending_count: 0,
            confirmed_count: 0,
            randomness_account: Pubkey::default(),
            commit_slot: 0,
            draw_seed: None,
            bump,
            slots: vec![NumberStatus::Free; grid_size as usize],
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == RoundStatus::Open
    }

    pub fn is_draw_committed(&self) -> bool {
        self.randomness_account != Pubkey::default()
    }

    /// Pending plus confirmed selections.
    pub fn selection_count(&self) -> u32 {
        self.pending_count.saturating_add(self.confirmed_count)
    }

    pub fn ensure_open(&self) -> Result<()> {
        require!(self.is_open(), ErrorCode::RoundNotOpen);
        Ok(())
    }

    /// Reservations and approvals are accepted only while the round is open
    /// and no draw has been committed.
    pub fn ensure_accepting_entries(&self) -> Result<()> {
        self.ensure_open()?;
        require!(!self.is_draw_committed(), ErrorCode::EntriesFrozen);
        Ok(())
    }

    pub fn number_status(&self, number: u16) -> Option<NumberStatus> {
        let index = usize::from(number).checked_sub(1)?;
        self.slots.get(index).copied()
    }

    fn slot_index(&self, number: u16) -> Result<usize> {
        if number == 0 || number > self.grid_size {
            msg!("Number {} is outside 1-{}", number, self.grid_size);
            return err!(ErrorCode::InvalidInput);
        }
        Ok(usize::from(number) - 1)
    }

    /// Moves `number` from `Free` to `Pending` and returns the id for the new selection.
    pub fn reserve_number(&mut self, number: u16) -> Result<u64> {
        let index = self.slot_index(number)?;
        self.ensure_accepting_entries()?;
        require!(
            self.slots[index] == NumberStatus::Free,
            ErrorCode::NumberUnavailable
        );

        let selection_id = self.next_selection_id;
        self.next_selection_id = selection_id.checked_add(1).ok_or(ErrorCode::Overflow)?;
        self.pending_count = self.pending_count.checked_add(1).ok_or(ErrorCode::Overflow)?;
        self.slots[index] = NumberStatus::Pending;
        Ok(selection_id)
    }

    pub fn confirm_number(&mut self, number: u16) -> Result<()> {
        let index = self.slot_index(number)?;
        require!(
            self.slots[index] == NumberStatus::Pending,
            ErrorCode::NotPending
        );
        self.ensure_accepting_entries()?;

        self.slots[index] = NumberStatus::Confirmed;
        self.pending_count -= 1;
        self.confirmed_count = self.confirmed_count.checked_add(1).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    pub fn release_number(&mut self, number: u16) -> Result<()> {
        let index = self.slot_index(number)?;
        require!(
            self.slots[index] == NumberStatus::Pending,
            ErrorCode::NotPending
        );

        self.slots[index] = NumberStatus::Free;
        self.pending_count -= 1;
        Ok(())
    }

    /// Confirmed numbers in ascending order.
    pub fn confirmed_numbers(&self) -> Vec<u16> {
        self.slots
            .iter()
            .zip(1u16..)
            .filter(|(status, _)| **status == NumberStatus::Confirmed)
            .map(|(_, number)| number)
            .collect()
    }

    pub fn ensure_enough_players(&self) -> Result<()> {
        if self.confirmed_count < MIN_CONFIRMED_PLAYERS {
            msg!(
                "Need at least {} confirmed players, have {}",
                MIN_CONFIRMED_PLAYERS,
                self.confirmed_count
            );
        }
        require_gte!(
            self.confirmed_count,
            MIN_CONFIRMED_PLAYERS,
            ErrorCode::InsufficientPlayers
        );
        Ok(())
    }

    pub fn ensure_deletable(&self) -> Result<()> {
        require!(self.is_open(), ErrorCode::InvalidTransition);
        if self.selection_count() > 0 {
            msg!(
                "Round {} still has {} selections",
                self.id,
                self.selection_count()
            );
            return err!(ErrorCode::HasSelections);
        }
        Ok(())
    }

    /// Binds the committed randomness and freezes the ledger.
    /// Re-committing is allowed until a seed has been revealed.
    pub fn commit_randomness(&mut self, randomness_account: Pubkey, seed_slot: u64) -> Result<()> {
        self.ensure_open()?;
        require!(self.draw_seed.is_none(), ErrorCode::DrawAlreadyRevealed);
        self.ensure_enough_players()?;
        require!(
            randomness_account != Pubkey::default(),
            ErrorCode::InvalidRandomnessAccount
        );

        self.randomness_account = randomness_account;
        self.commit_slot = seed_slot;
        Ok(())
    }

    pub fn reveal_seed(&mut self, seed: [u8; 32]) -> Result<()> {
        self.ensure_open()?;
        require!(self.is_draw_committed(), ErrorCode::DrawNotCommitted);
        require!(self.draw_seed.is_none(), ErrorCode::DrawAlreadyRevealed);

        self.draw_seed = Some(seed);
        Ok(())
    }

    pub fn complete(&mut self) -> Result<()> {
        require!(self.is_open(), ErrorCode::RoundNotOpen);
        self.status = RoundStatus::Completed;
        Ok(())
    }

    pub fn archive(&mut self) -> Result<()> {
        require!(
            self.status == RoundStatus::Completed,
            ErrorCode::InvalidTransition
        );
        self.status = RoundStatus::Archived;
        Ok(())
    }

    /// Selections and the draw result can only be reclaimed once the round is archived.
    pub fn ensure_archived(&self) -> Result<()> {
        require!(
            self.status == RoundStatus::Archived,
            ErrorCode::InvalidTransition
        );
        Ok(())
    }
}

/// Round names may only contain ASCII letters, digits, spaces, `.` and `-`.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_ROUND_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '.' || c == '-')
}
