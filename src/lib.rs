//! Block cipher modes of operation and the chosen-text attacks against them

#![no_std]

extern crate alloc;

pub mod break_cbc;
pub mod break_ecb;
pub mod bytes;
pub mod cbc;
pub mod cipher;
pub mod ctr;
pub mod detect;
pub mod ecb;
pub mod error;
pub mod oracle;
pub mod pkcs7;

pub use error::{Error, Result};
