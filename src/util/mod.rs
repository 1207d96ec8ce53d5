//! Utility functions.

pub mod env;
pub mod format;

pub use format::{
    format_cost, format_param, format_rate, format_signed_cost, format_signed_percent,
    format_words,
};
