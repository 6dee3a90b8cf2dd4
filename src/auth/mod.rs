//! Authorization policy.

pub mod policy;

pub use policy::{authorize, is_allowed, Action, Resource};
