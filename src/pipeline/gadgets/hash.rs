//! Hash gadgets: MD5, SHA-1 and SHA-2 (SHA-256) digests.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

pub fn md5(input: &[u8]) -> Vec<u8> {
    Md5::digest(input).to_vec()
}

pub fn sha1(input: &[u8]) -> Vec<u8> {
    Sha1::digest(input).to_vec()
}

pub fn sha256(input: &[u8]) -> Vec<u8> {
    Sha256::digest(input).to_vec()
}
