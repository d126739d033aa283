//! Ready-made rounded controls built on [`crate::control::RoundedControl`].

pub mod button;
pub mod toggle;
