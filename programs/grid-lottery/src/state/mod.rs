pub mod config;
pub mod draw_result;
pub mod round;
pub mod selection;

pub use config::*;
pub use draw_result::*;
pub use round::*;
pub use selection::*;
