//! Wire and domain types shared by the directory client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
