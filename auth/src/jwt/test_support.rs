use std::sync::Arc;

use crate::keys::StaticKeyProvider;

pub const PRIMARY_PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/ec256-primary-pri.pem");
pub const PRIMARY_SEC1_PRIVATE_KEY: &[u8] =
    include_bytes!("../../tests/fixtures/ec256-primary-sec1.pem");
pub const PRIMARY_PUBLIC_KEY: &[u8] = include_bytes!("../../tests/fixtures/ec256-primary-pub.pem");
pub const OTHER_PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/ec256-other-pri.pem");
pub const OTHER_PUBLIC_KEY: &[u8] = include_bytes!("../../tests/fixtures/ec256-other-pub.pem");

pub fn primary_keys() -> Arc<StaticKeyProvider> {
    Arc::new(StaticKeyProvider::new(PRIMARY_PRIVATE_KEY, PRIMARY_PUBLIC_KEY))
}

pub fn other_keys() -> Arc<StaticKeyProvider> {
    Arc::new(StaticKeyProvider::new(OTHER_PRIVATE_KEY, OTHER_PUBLIC_KEY))
}
