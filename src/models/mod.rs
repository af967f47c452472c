pub mod question;
pub mod choice;
pub mod vote;
pub mod user;
