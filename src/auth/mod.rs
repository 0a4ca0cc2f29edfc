pub mod authenticator;
pub mod credential;
pub mod token_manager;
