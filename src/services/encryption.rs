use crate::error::AppError;
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// AES-GCM nonce size (96 bits).
const NONCE_LEN: usize = 12;

/// Server-managed symmetric encryption for confidential columns.
///
/// Stored form is `base64(nonce || ciphertext)` in a TEXT column; a fresh
/// random nonce is generated per call. The key comes from process
/// configuration and never leaves this service.
#[derive(Clone)]
pub struct EncryptionService {
    master_key: [u8; 32],
}

impl EncryptionService {
    pub fn new(master_key: [u8; 32]) -> Self {
        Self { master_key }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, AppError> {
        let cipher = Aes256Gcm::new_from_slice(&self.master_key)
            .map_err(|e| AppError::Encryption(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| AppError::Encryption(format!("RNG failure: {e}")))?;
        let nonce = GenericArray::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| AppError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    pub fn decrypt(&self, stored: &str) -> Result<Vec<u8>, AppError> {
        let sealed = STANDARD
            .decode(stored)
            .map_err(|e| AppError::Encryption(format!("invalid ciphertext encoding: {e}")))?;
        if sealed.len() < NONCE_LEN {
            return Err(AppError::Encryption("ciphertext too short".into()));
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&self.master_key)
            .map_err(|e| AppError::Encryption(e.to_string()))?;
        let nonce = GenericArray::from_slice(nonce_bytes);

        // aead::Error is deliberately opaque; tampered data, a wrong key and
        // corrupt storage are indistinguishable here.
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| AppError::Encryption("authentication failed".into()))
    }

    /// Decrypt a stored column into UTF-8 text.
    pub fn decrypt_to_string(&self, stored: &str) -> Result<String, AppError> {
        let plaintext = self.decrypt(stored)?;
        String::from_utf8(plaintext)
            .map_err(|e| AppError::Encryption(format!("invalid utf8: {e}")))
    }
}
