pub mod admin;
pub mod close_accounts;
pub mod commit_draw;
pub mod reserve_number;
pub mod reveal_draw;
pub mod review_selection;
pub mod run_draw;

pub use admin::*;
pub use close_accounts::*;
pub use commit_draw::*;
pub use reserve_number::*;
pub use reveal_draw::*;
pub use review_selection::*;
pub use run_draw::*;
