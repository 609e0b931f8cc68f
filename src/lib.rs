pub mod error;
pub mod identifier;
pub mod json;
pub mod order;
mod helper;


pub use crate::{
    error::{Error, Result},
    helper::{host_address, to_ace},
    identifier::{AcmeIdentifier, TYPE_DNS, TYPE_IP},
    json::{Json, JsonBuilder},
    order::AcmeOrderRequest,
};
