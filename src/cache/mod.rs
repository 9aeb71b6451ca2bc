pub mod refresh_policy;
pub mod token;
pub mod token_state;
