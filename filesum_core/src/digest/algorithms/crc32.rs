//! CRC32 checksum engine

use crate::digest::DigestAlgorithm;
use crate::digest::traits::{DigestEngine, StreamingDigest};
use crate::error::{Result, ValidationError};
use crc32fast::Hasher as Crc32Hasher;

pub(super) struct Crc32Engine;

struct Crc32State {
    inner: Crc32Hasher,
}

impl StreamingDigest for Crc32State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        // Big-endian so the hex rendering matches the conventional form
        self.inner.finalize().to_be_bytes().to_vec()
    }
}

impl DigestEngine for Crc32Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Crc32
    }

    fn display_name(&self) -> &'static str {
        "CRC32"
    }

    fn digest_len(&self) -> usize {
        4
    }

    fn supports_keyed(&self) -> bool {
        false
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        if key.is_some() {
            return Err(ValidationError::unsupported_mode(self.algorithm()).into());
        }
        Ok(Box::new(Crc32State {
            inner: Crc32Hasher::new(),
        }))
    }
}
