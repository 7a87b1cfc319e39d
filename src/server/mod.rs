//! Listening socket ownership and static file resolution.

pub mod listener;
pub mod static_files;
