pub mod answered_record;
pub mod question;
pub mod quiz_state;
