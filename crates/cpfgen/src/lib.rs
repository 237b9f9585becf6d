#![doc = include_str!("../README.md")]

mod checksum;
mod cpf;
mod enumerate;
mod error;
mod region;

pub use crate::checksum::*;
pub use crate::cpf::*;
pub use crate::enumerate::*;
pub use crate::error::*;
pub use crate::region::*;
