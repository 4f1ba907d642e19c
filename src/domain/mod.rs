pub mod account;
pub mod category;
pub mod recommendation;
