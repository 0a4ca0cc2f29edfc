pub mod common;

mod entity_decoding;
mod token_cache;
mod validation_rules;
