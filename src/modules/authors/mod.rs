//! Authors, each owned by the user that created it.
//!
//! Reads are public. Writes and `/api/mine` sit behind the token gate, and
//! only the owner may update or delete an author.

pub mod controller;
pub mod router;
pub mod service;
