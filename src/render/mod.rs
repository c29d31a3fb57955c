// Rendering side: the current result set and its text form.

pub mod board;
pub mod card;

pub use board::ResultBoard;
pub use card::format_card;
