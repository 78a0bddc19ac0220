//! SHA-2 family digest engines (SHA-256 and SHA-512)

use crate::digest::DigestAlgorithm;
use crate::digest::traits::{DigestEngine, StreamingDigest};
use crate::error::Result;
use hmac::{Hmac, Mac};
use sha2::{Digest as _, Sha256, Sha512};

pub(super) struct Sha256Engine;
pub(super) struct Sha512Engine;

struct Sha256State {
    inner: Sha256,
}

struct Sha512State {
    inner: Sha512,
}

struct KeyedSha256State {
    inner: Hmac<Sha256>,
}

struct KeyedSha512State {
    inner: Hmac<Sha512>,
}

impl StreamingDigest for Sha256State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

impl StreamingDigest for Sha512State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

impl StreamingDigest for KeyedSha256State {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}

impl StreamingDigest for KeyedSha512State {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}

impl DigestEngine for Sha256Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha256
    }

    fn display_name(&self) -> &'static str {
        "SHA-256"
    }

    fn digest_len(&self) -> usize {
        32
    }

    fn supports_keyed(&self) -> bool {
        true
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        Ok(match key {
            Some(key) => Box::new(KeyedSha256State {
                inner: Hmac::<Sha256>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length"),
            }),
            None => Box::new(Sha256State {
                inner: Sha256::new(),
            }),
        })
    }
}

impl DigestEngine for Sha512Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha512
    }

    fn display_name(&self) -> &'static str {
        "SHA-512"
    }

    fn digest_len(&self) -> usize {
        64
    }

    fn supports_keyed(&self) -> bool {
        true
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        Ok(match key {
            Some(key) => Box::new(KeyedSha512State {
                inner: Hmac::<Sha512>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length"),
            }),
            None => Box::new(Sha512State {
                inner: Sha512::new(),
            }),
        })
    }
}
