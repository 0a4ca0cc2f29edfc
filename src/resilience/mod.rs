pub mod attempt;
pub mod retry;
