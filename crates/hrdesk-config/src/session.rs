// ── Session store ──
//
// A small JSON file of string values shared with the web console: the
// bearer token and the tenant identifiers. Values written by the browser
// may be encrypted, JSON-encoded strings, or plain text.
//
// Encrypted values use the OpenSSL salted format the browser's AES helper
// emits: base64("Salted__" ‖ salt[8] ‖ AES-256-CBC ciphertext), with key
// and IV from EVP_BytesToKey(MD5, passphrase, salt). The base64 of
// "Salted__" always starts with "U2F", which is how encrypted values are
// recognized.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use md5::{Digest, Md5};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::ConfigError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const ENCRYPTED_PREFIX: &str = "U2F";
const SALT_MAGIC: &[u8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

/// Well-known session keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Token,
    EmployeeCompanyId,
    EmployeeId,
    CurrentCompanyId,
}

impl SessionKey {
    pub const ALL: [Self; 4] = [
        Self::Token,
        Self::EmployeeCompanyId,
        Self::EmployeeId,
        Self::CurrentCompanyId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::EmployeeCompanyId => "employeeCompanyId",
            Self::EmployeeId => "employeeId",
            Self::CurrentCompanyId => "currentCompanyId",
        }
    }
}

/// File-backed session values, optionally encrypted with a passphrase.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    passphrase: Option<SecretString>,
}

impl SessionStore {
    /// Open a session file. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>, passphrase: Option<SecretString>) -> Result<Self, ConfigError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| ConfigError::Session {
                message: format!("{} is not a JSON object of strings: {e}", path.display()),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "session opened");
        Ok(Self {
            path,
            entries,
            passphrase,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_encrypted(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Read and decode a value.
    pub fn get(&self, key: SessionKey) -> Result<Option<String>, ConfigError> {
        self.entries
            .get(key.as_str())
            .map(|raw| self.decode(raw))
            .transpose()
    }

    /// Store a value, encrypting it when the store has a passphrase.
    pub fn set(&mut self, key: SessionKey, value: &str) -> Result<(), ConfigError> {
        let stored = match &self.passphrase {
            Some(pass) => encrypt(pass, value)?,
            None => value.to_owned(),
        };
        self.entries.insert(key.as_str().to_owned(), stored);
        Ok(())
    }

    pub fn remove(&mut self, key: SessionKey) -> bool {
        self.entries.remove(key.as_str()).is_some()
    }

    /// Drop every known key.
    pub fn clear(&mut self) {
        for key in SessionKey::ALL {
            self.entries.remove(key.as_str());
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&self.entries).map_err(|e| ConfigError::Session {
            message: format!("cannot encode session: {e}"),
        })?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }

    fn decode(&self, raw: &str) -> Result<String, ConfigError> {
        if raw.starts_with(ENCRYPTED_PREFIX) {
            let pass = self.passphrase.as_ref().ok_or_else(|| ConfigError::Session {
                message: "value is encrypted but no session passphrase is configured".into(),
            })?;
            return decrypt(pass, raw).map(|plain| unquote(&plain));
        }
        Ok(unquote(raw))
    }
}

// Older writers stored JSON-encoded strings, encrypted or not.
fn unquote(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_owned())
}

/// OpenSSL `EVP_BytesToKey` with MD5 and one iteration: key ‖ IV.
fn derive_key_iv(pass: &SecretString, salt: &[u8]) -> Vec<u8> {
    let mut derived = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
    let mut block: Vec<u8> = Vec::new();
    while derived.len() < KEY_LEN + IV_LEN {
        block = Md5::new()
            .chain_update(&block)
            .chain_update(pass.expose_secret().as_bytes())
            .chain_update(salt)
            .finalize()
            .to_vec();
        derived.extend_from_slice(&block);
    }
    derived.truncate(KEY_LEN + IV_LEN);
    derived
}

fn encrypt(pass: &SecretString, plaintext: &str) -> Result<String, ConfigError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key_iv = derive_key_iv(pass, &salt);
    let (key, iv) = key_iv.split_at(KEY_LEN);
    let ciphertext = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|_| ConfigError::Session {
            message: "encryption failed".into(),
        })?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut blob = Vec::with_capacity(SALT_MAGIC.len() + SALT_LEN + ciphertext.len());
    blob.extend_from_slice(SALT_MAGIC);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(blob))
}

fn decrypt(pass: &SecretString, value: &str) -> Result<String, ConfigError> {
    let malformed = |what: &str| ConfigError::Session {
        message: format!("encrypted value is malformed: {what}"),
    };

    let blob = STANDARD
        .decode(value.trim())
        .map_err(|_| malformed("not base64"))?;
    let rest = blob
        .strip_prefix(SALT_MAGIC)
        .ok_or_else(|| malformed("missing salt header"))?;
    if rest.len() <= SALT_LEN {
        return Err(malformed("too short"));
    }
    let (salt, ciphertext) = rest.split_at(SALT_LEN);

    let key_iv = derive_key_iv(pass, salt);
    let (key, iv) = key_iv.split_at(KEY_LEN);
    let plaintext = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| malformed("bad key length"))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| ConfigError::Session {
            message: "cannot decrypt session value; wrong passphrase?".into(),
        })?;
    String::from_utf8(plaintext).map_err(|_| malformed("plaintext is not UTF-8"))
}
