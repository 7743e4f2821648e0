use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // --- input ---
    #[msg("Invalid input: check round name, price, grid size, number and player name")]
    InvalidInput,
    #[msg("Round or selection not found")]
    NotFound,

    // --- ledger ---
    #[msg("Number is not available")]
    NumberUnavailable,
    #[msg("Selection is not pending")]
    NotPending,
    #[msg("Entries are frozen while a draw is in progress")]
    EntriesFrozen,

    // --- lifecycle ---
    #[msg("Cannot delete a round with player selections")]
    HasSelections,
    #[msg("Round status does not allow this transition")]
    InvalidTransition,
    #[msg("Round is not open")]
    RoundNotOpen,
    #[msg("Not authorized")]
    NotAuthorized,

    // --- draw ---
    #[msg("Not enough confirmed players for a draw")]
    InsufficientPlayers,
    #[msg("No randomness has been committed for this round")]
    DrawNotCommitted,
    #[msg("Draw randomness has already been revealed")]
    DrawAlreadyRevealed,
    #[msg("Randomness account does not match the committed account")]
    IncorrectRandomnessAccount,
    #[msg("Invalid or empty randomness account")]
    InvalidRandomnessAccount,
    #[msg("Randomness already revealed, cannot commit")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not yet resolved by oracle")]
    RandomnessNotResolved,
    #[msg("Winner selection account does not match the drawn number")]
    WinnerAccountMismatch,
    #[msg("Arithmetic overflow")]
    Overflow,
}

#[cfg(test)]
pub(crate) fn assert_error<T>(result: Result<T>, expected: ErrorCode) {
    match result {
        Ok(_) => panic!("expected {:?}, got Ok", expected),
        Err(Error::AnchorError(err)) => assert_eq!(
            err.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            err.error_name
        ),
        Err(other) => panic!("expected {:?}, got {:?}", expected, other),
    }
}
