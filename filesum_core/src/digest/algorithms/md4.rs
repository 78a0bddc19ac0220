//! MD4 digest engine

use crate::digest::DigestAlgorithm;
use crate::digest::traits::{DigestEngine, StreamingDigest};
use crate::error::Result;
use hmac::{Hmac, Mac};
use md4::{Digest as _, Md4};

pub(super) struct Md4Engine;

struct Md4State {
    inner: Md4,
}

struct KeyedMd4State {
    inner: Hmac<Md4>,
}

impl StreamingDigest for Md4State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

impl StreamingDigest for KeyedMd4State {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}

impl DigestEngine for Md4Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Md4
    }

    fn display_name(&self) -> &'static str {
        "MD4"
    }

    fn digest_len(&self) -> usize {
        16
    }

    fn supports_keyed(&self) -> bool {
        true
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        Ok(match key {
            Some(key) => Box::new(KeyedMd4State {
                inner: Hmac::<Md4>::new_from_slice(key).expect("HMAC accepts keys of any length"),
            }),
            None => Box::new(Md4State { inner: Md4::new() }),
        })
    }
}
