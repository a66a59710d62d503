// quinta_server/src/services/mod.rs

pub mod sessions;
