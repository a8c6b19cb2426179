//! Shared helper utilities

pub mod mime;
