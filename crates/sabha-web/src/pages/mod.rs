//! Server-rendered pages.

pub mod new_session;
