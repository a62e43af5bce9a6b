//! Types shared between the dashboard controller and its presentation layer.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod status;
