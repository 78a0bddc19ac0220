//! MD5 digest engine

use crate::digest::DigestAlgorithm;
use crate::digest::traits::{DigestEngine, StreamingDigest};
use crate::error::Result;
use hmac::{Hmac, Mac};
use md5::{Digest as _, Md5};

pub(super) struct Md5Engine;

struct Md5State {
    inner: Md5,
}

struct KeyedMd5State {
    inner: Hmac<Md5>,
}

impl StreamingDigest for Md5State {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

impl StreamingDigest for KeyedMd5State {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.inner, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}

impl DigestEngine for Md5Engine {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Md5
    }

    fn display_name(&self) -> &'static str {
        "MD5"
    }

    fn digest_len(&self) -> usize {
        16
    }

    fn supports_keyed(&self) -> bool {
        true
    }

    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>> {
        Ok(match key {
            Some(key) => Box::new(KeyedMd5State {
                inner: Hmac::<Md5>::new_from_slice(key).expect("HMAC accepts keys of any length"),
            }),
            None => Box::new(Md5State { inner: Md5::new() }),
        })
    }
}
