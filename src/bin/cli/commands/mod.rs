pub mod art;
pub mod market;
pub mod mint;
pub mod phase;
pub mod scratch;
pub mod whitelist;
