//! Domain and wire types shared by the registration client and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
