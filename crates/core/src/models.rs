pub mod account;
pub mod application;
pub mod reminder;
pub mod todo;
