//! SHA-1 digest engine

use crate::digest::DigestAlgorithm;
use crate::digest::traits::{DigestEngine, StreamingDigest};
use crate::error::Result;
use hmac::{Hmac, Mac};
use sha1::{Digest as _, Sha1};

pub(super) struct Sha1Engine;

struct Sha1State {
    inner: Sha1,
}

struct KeyedSha1State {
    inner: Hmac<Sha1>,
}

impl StreamingDigest for Sha1State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

impl StreamingDigest for KeyedSha1State {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}

impl DigestEngine for Sha1Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha1
    }

    fn display_name(&self) -> &'static str {
        "SHA-1"
    }

    fn digest_len(&self) -> usize {
        20
    }

    fn supports_keyed(&self) -> bool {
        true
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        Ok(match key {
            Some(key) => Box::new(KeyedSha1State {
                inner: Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts keys of any length"),
            }),
            None => Box::new(Sha1State { inner: Sha1::new() }),
        })
    }
}
