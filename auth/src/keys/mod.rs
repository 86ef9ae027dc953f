pub mod errors;
pub mod provider;

pub use errors::KeyError;
pub use provider::FileKeyProvider;
pub use provider::KeyProvider;
pub use provider::KeySlot;
pub use provider::StaticKeyProvider;

#[cfg(test)]
pub use provider::MockKeyProvider;
