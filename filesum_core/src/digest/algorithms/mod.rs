//! Digest engine implementations

use super::registry::AlgorithmRegistry;

mod crc32;
mod md4;
mod md5;
mod sha1;
mod sha2;

/// Register all built-in engines. Registration order is emission order for
/// digest-ready events, so it is fixed here.
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(crc32::Crc32Engine);
    registry.register(md4::Md4Engine);
    registry.register(md5::Md5Engine);
    registry.register(sha1::Sha1Engine);
    registry.register(sha2::Sha256Engine);
    registry.register(sha2::Sha512Engine);
}
