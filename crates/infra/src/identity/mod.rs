//! Identity provider adapters

pub mod memory;

pub use memory::InMemoryIdentityProvider;
