//! HTX spot market clients.

pub mod accountws;
pub mod marketws;
pub mod ws;
