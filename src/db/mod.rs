pub mod catalog;
pub mod password_reset_codes;
pub mod sets;
pub mod users;
