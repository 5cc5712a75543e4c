//! Data Transfer Objects for REST request deserialization.

pub mod view_dto;

pub use view_dto::*;
