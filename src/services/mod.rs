//! Typed operations over the upstream endpoints. Every request is validated
//! locally before anything is sent.

pub mod order;
pub mod rate;
pub mod scan_form;
pub mod shipping_label;
pub mod user;
