//! AES-CBC cipher for encrypted DC-09 sessions.
//!
//! Inbound content is decrypted with a fixed all-zero IV, as the DC-09
//! standard prescribes. The only thing the receiver ever encrypts is the ACK
//! terminator block, and that uses a random IV.
//!
//! Chaining comes from the `cbc` crate without padding; DC-09 pads the
//! plaintext itself, at the front.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use sia_core::constants::{AES_BLOCK_SIZE, ENCRYPTED_TERMINATOR_PLAINTEXT, ZERO_IV};
use sia_core::{EncryptionKey, Error, KeySize, Result};
use std::fmt;

fn cbc_decrypt<C>(key: &[u8], data: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    cbc::Decryptor::<C>::new_from_slices(key, &ZERO_IV)
        .map_err(|e| Error::Internal(format!("cannot key decryptor: {e}")))?
        .decrypt_padded_vec_mut::<NoPadding>(data)
        .map_err(|e| Error::DecryptionFailed(e.to_string()))
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8; AES_BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    Ok(cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| Error::Internal(format!("cannot key encryptor: {e}")))?
        .encrypt_padded_vec_mut::<NoPadding>(data))
}

/// Per-account AES-CBC cipher.
///
/// # Example
///
/// ```
/// use sia_core::EncryptionKey;
/// use sia_protocol::SessionCipher;
///
/// let key = EncryptionKey::parse("AAAAAAAAAAAAAAAA").unwrap();
/// let cipher = SessionCipher::new(&key).unwrap();
///
/// let block = *b"0000000|Nri1/OP5";
/// let encrypted = cipher.encrypt(&block, &[0u8; 16]).unwrap();
/// assert_eq!(cipher.decrypt(&encrypted).unwrap(), block);
/// ```
pub struct SessionCipher {
    key: EncryptionKey,
}

impl SessionCipher {
    /// Key a cipher for `key`.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the AES implementation rejects the key.
    pub fn new(key: &EncryptionKey) -> Result<Self> {
        let bytes = key.as_bytes();
        let keyed = match key.size() {
            KeySize::Aes128 => Aes128::new_from_slice(bytes).map(drop),
            KeySize::Aes192 => Aes192::new_from_slice(bytes).map(drop),
            KeySize::Aes256 => Aes256::new_from_slice(bytes).map(drop),
        };
        keyed.map_err(|_| Error::InvalidKey(format!("cannot key {} cipher", key.size())))?;

        Ok(Self { key: key.clone() })
    }

    /// AES variant in use.
    pub fn key_size(&self) -> KeySize {
        self.key.size()
    }

    /// Decrypt `ciphertext` in CBC mode with the all-zero IV.
    ///
    /// No padding is removed; DC-09 content is padded at the front, up to the
    /// first `|`.
    ///
    /// # Errors
    /// Returns `Error::DecryptionFailed` if the input is empty or not a whole
    /// number of blocks.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::DecryptionFailed(format!(
                "ciphertext length {} is not a positive multiple of {AES_BLOCK_SIZE}",
                ciphertext.len()
            )));
        }

        let key = self.key.as_bytes();
        match self.key.size() {
            KeySize::Aes128 => cbc_decrypt::<Aes128>(key, ciphertext),
            KeySize::Aes192 => cbc_decrypt::<Aes192>(key, ciphertext),
            KeySize::Aes256 => cbc_decrypt::<Aes256>(key, ciphertext),
        }
    }

    /// Hex-decode `text` and [`decrypt`](Self::decrypt) it.
    ///
    /// Hex digits are accepted in either case.
    ///
    /// # Errors
    /// Returns `Error::DecryptionFailed` on invalid hex or a bad block count.
    pub fn decrypt_hex(&self, text: &str) -> Result<Vec<u8>> {
        let ciphertext =
            hex::decode(text).map_err(|e| Error::DecryptionFailed(format!("invalid hex: {e}")))?;
        self.decrypt(&ciphertext)
    }

    /// Encrypt `plaintext` in CBC mode with an explicit IV.
    ///
    /// # Errors
    /// Returns `Error::Internal` if the plaintext is not a whole number of
    /// blocks.
    pub fn encrypt(&self, plaintext: &[u8], iv: &[u8; AES_BLOCK_SIZE]) -> Result<Vec<u8>> {
        if plaintext.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::Internal(format!(
                "plaintext length {} is not a multiple of {AES_BLOCK_SIZE}",
                plaintext.len()
            )));
        }

        let key = self.key.as_bytes();
        match self.key.size() {
            KeySize::Aes128 => cbc_encrypt::<Aes128>(key, iv, plaintext),
            KeySize::Aes192 => cbc_encrypt::<Aes192>(key, iv, plaintext),
            KeySize::Aes256 => cbc_encrypt::<Aes256>(key, iv, plaintext),
        }
    }

    /// Build the hex terminator appended to encrypted-session ACKs.
    ///
    /// A fresh random IV is drawn on every call. Callers build it once per
    /// account and cache the result.
    ///
    /// # Errors
    /// Propagates [`encrypt`](Self::encrypt) errors.
    pub fn build_encrypted_terminator(&self) -> Result<String> {
        let iv: [u8; AES_BLOCK_SIZE] = rand::random();
        let encrypted = self.encrypt(ENCRYPTED_TERMINATOR_PLAINTEXT, &iv)?;
        Ok(hex::encode_upper(encrypted))
    }
}

impl fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SessionCipher")
            .field("key_size", &self.key.size())
            .finish_non_exhaustive()
    }
}
