pub mod cookie;
pub mod token;
