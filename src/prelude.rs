//! Prelude module for convenient imports.
//!
//! ```rust
//! use snmp_codec::prelude::*;
//! ```
//!
//! This imports:
//! - Codec types: [`GetRequest`], [`GetResponse`], [`Oid`], [`Value`], [`VarBind`]
//! - The [`Client`] for talking to an agent
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for literal OIDs

pub use crate::client::Client;
pub use crate::error::{Error, Result};
pub use crate::message::{GetRequest, GetResponse, PduType};
pub use crate::oid::Oid;
pub use crate::value::Value;
pub use crate::varbind::VarBind;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
