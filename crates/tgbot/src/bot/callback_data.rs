//! Signed callback data
//!
//! Telegram limits `callback_data` to 64 bytes. [`CallbackDataCache`] keeps the
//! real payload on the bot side and puts a short signed token on the button
//! instead. A token is a 32 char hex key followed by a 22 char base64url
//! HMAC-SHA256 prefix computed over the key and the chat the button was sent to.
use crate::config::CONFIG;
use crate::error::CallbackDataError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::result::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace, warn};

type HmacSha256 = Hmac<Sha256>;

/// Length of the cache key part of a token
pub const KEY_LEN: usize = 32;
/// Length of the signature part of a token
pub const SIGNATURE_LEN: usize = 22;
/// Total length of a signed token
pub const TOKEN_LEN: usize = KEY_LEN + SIGNATURE_LEN;

/// Bytes of the MAC kept in a token
const TAG_LEN: usize = 16;

/// Cached payload together with the metadata it was signed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedCallbackData {
    /// Chat the keyboard was sent to, `None` for inline messages
    pub chat_id: Option<i64>,
    /// Unix time the entry was created
    pub created_at: u64,
    pub payload: String,
}

/// Outcome of [`CallbackDataCache::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Data does not have the token shape and is used as is
    NotSigned,
    /// Original payload
    Found(String),
    /// Key is unknown and validation is disabled
    Missing,
}

#[derive(Debug)]
struct Slot {
    entry: CachedCallbackData,
    tick: u64,
}

/// Entries plus a recency index: every use takes a new tick, the smallest
/// tick is the least recently used key
#[derive(Debug, Default)]
struct CacheInner {
    data: HashMap<String, Slot>,
    order: BTreeMap<u64, String>,
    tick: u64,
}

impl CacheInner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn touch(&mut self, key: &str) {
        let tick = self.next_tick();
        if let Some(slot) = self.data.get_mut(key) {
            self.order.remove(&slot.tick);
            slot.tick = tick;
            self.order.insert(tick, key.to_string());
        }
    }

    fn insert(&mut self, key: String, entry: CachedCallbackData) {
        let tick = self.next_tick();
        if let Some(old) = self.data.insert(key.clone(), Slot { entry, tick }) {
            self.order.remove(&old.tick);
        }
        self.order.insert(tick, key);
    }

    fn evict_lru(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.data.remove(&key);
        Some(key)
    }

    fn forget(&mut self, key: &str) -> bool {
        match self.data.remove(key) {
            Some(slot) => {
                self.order.remove(&slot.tick);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.data.clear();
        self.order.clear();
    }
}

/// ### Bounded store for signed callback data
///
/// - Entries and the recency index live behind one [`Mutex`], so insert,
///   eviction and lookup never interleave
/// - Least recently used entries are evicted once `maxsize` is reached
/// - Validation can be switched off at runtime, see [`Self::set_validate`]
///
/// Construct it once and share it with [`std::sync::Arc`].
pub struct CallbackDataCache {
    mac: HmacSha256,
    maxsize: usize,
    validate: AtomicBool,
    inner: Mutex<CacheInner>,
}

impl fmt::Debug for CallbackDataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackDataCache")
            .field("maxsize", &self.maxsize)
            .field("validate", &self.validate())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl CallbackDataCache {
    /// Create a new cache
    /// ## Parameters
    /// - `secret`: key used to sign tokens, usually the bot token
    /// - `maxsize`: maximum number of entries, at least one is kept
    /// - `validate`: reject tokens that fail verification
    pub fn new(secret: impl AsRef<[u8]>, maxsize: usize, validate: bool) -> Self {
        debug!(
            "Creating callback data cache with maxsize: {}, validate: {}",
            maxsize, validate
        );
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .unwrap_or_else(|_| unreachable!("HMAC key of any length is valid"));
        Self {
            mac,
            maxsize: maxsize.max(1),
            validate: AtomicBool::new(validate),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Create a cache with `maxsize` and `validate` from the `callback_data`
    /// config section
    pub fn from_config(secret: impl AsRef<[u8]>) -> Self {
        let cfg = &CONFIG.callback_data;
        Self::new(secret, cfg.maxsize, cfg.validate)
    }

    pub fn maxsize(&self) -> usize {
        self.maxsize
    }

    /// Whether tokens are verified on [`Self::resolve`]
    pub fn validate(&self) -> bool {
        self.validate.load(Ordering::SeqCst)
    }

    pub fn set_validate(&self, validate: bool) {
        debug!("Callback data validation set to {}", validate);
        self.validate.store(validate, Ordering::SeqCst);
    }

    /// Store `payload` and return the token to put on the button
    ///
    /// ## Errors
    /// - `CallbackDataError::LockPoisoned` - cache lock is poisoned
    #[tracing::instrument(skip(self, payload))]
    pub fn sign(
        &self,
        chat_id: Option<i64>,
        payload: impl Into<String>,
    ) -> Result<String, CallbackDataError> {
        let key = uuid::Uuid::new_v4().simple().to_string();
        let token = format!("{}{}", key, self.signature(&key, chat_id));
        self.insert_raw(key, chat_id, payload)?;
        trace!("Signed callback data, token length: {}", token.len());
        Ok(token)
    }

    /// Insert an entry under an explicit key, evicting the least recently
    /// used entries when the cache is full
    ///
    /// ## Errors
    /// - `CallbackDataError::LockPoisoned` - cache lock is poisoned
    pub fn insert_raw(
        &self,
        key: impl Into<String>,
        chat_id: Option<i64>,
        payload: impl Into<String>,
    ) -> Result<(), CallbackDataError> {
        let key = key.into();
        let entry = CachedCallbackData {
            chat_id,
            created_at: unix_now(),
            payload: payload.into(),
        };
        let mut inner = self.lock()?;
        if !inner.data.contains_key(&key) {
            while inner.data.len() >= self.maxsize {
                match inner.evict_lru() {
                    Some(evicted) => debug!("Evicting callback data entry {}", evicted),
                    None => break,
                }
            }
        }
        inner.insert(key, entry);
        Ok(())
    }

    /// Look up the payload behind `data`
    ///
    /// With validation enabled the signature, the key and the chat must all
    /// match. With validation disabled only the key is looked up and an
    /// unknown key yields [`Resolution::Missing`].
    ///
    /// ## Errors
    /// - `CallbackDataError::SignatureMismatch` - token was not signed by this cache
    /// - `CallbackDataError::UnknownKey` - key was evicted or never existed
    /// - `CallbackDataError::ChatMismatch` - entry was signed for another chat
    /// - `CallbackDataError::LockPoisoned` - cache lock is poisoned
    #[tracing::instrument(skip(self, data))]
    pub fn resolve(
        &self,
        data: &str,
        chat_id: Option<i64>,
    ) -> Result<Resolution, CallbackDataError> {
        let Some((key, signature)) = split_token(data) else {
            trace!("Callback data is not a signed token");
            return Ok(Resolution::NotSigned);
        };
        let validate = self.validate();
        if validate && !self.verify(key, chat_id, signature) {
            warn!("Callback data signature mismatch for key {}", key);
            return Err(CallbackDataError::SignatureMismatch);
        }

        let mut inner = self.lock()?;
        let Some(entry) = inner.data.get(key).map(|slot| slot.entry.clone()) else {
            if validate {
                warn!("Callback data key {} is not in the cache", key);
                return Err(CallbackDataError::UnknownKey);
            }
            debug!("Callback data key {} is not in the cache", key);
            return Ok(Resolution::Missing);
        };
        if validate && entry.chat_id != chat_id {
            warn!("Callback data key {} was signed for another chat", key);
            return Err(CallbackDataError::ChatMismatch {
                expected: entry.chat_id,
                actual: chat_id,
            });
        }
        inner.touch(key);
        Ok(Resolution::Found(entry.payload))
    }

    /// Entry stored under `key`
    pub fn get(&self, key: &str) -> Result<Option<CachedCallbackData>, CallbackDataError> {
        Ok(self.lock()?.data.get(key).map(|slot| slot.entry.clone()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock()
            .map(|inner| inner.data.contains_key(key))
            .unwrap_or(false)
    }

    /// Remove the entry stored under `key`, returns whether it existed
    pub fn drop_entry(&self, key: &str) -> Result<bool, CallbackDataError> {
        Ok(self.lock()?.forget(key))
    }

    /// Remove entries created before `cutoff` (unix seconds), returns how
    /// many were removed
    pub fn clear_older_than(&self, cutoff: u64) -> Result<usize, CallbackDataError> {
        let mut inner = self.lock()?;
        let stale: Vec<String> = inner
            .data
            .iter()
            .filter(|(_, slot)| slot.entry.created_at < cutoff)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            inner.forget(key);
        }
        debug!("Removed {} stale callback data entries", stale.len());
        Ok(stale.len())
    }

    pub fn clear(&self) -> Result<(), CallbackDataError> {
        self.lock()?.clear();
        Ok(())
    }

    /// Keys ordered from most to least recently used
    pub fn keys(&self) -> Vec<String> {
        self.lock()
            .map(|inner| inner.order.values().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheInner>, CallbackDataError> {
        self.inner
            .lock()
            .map_err(|_| CallbackDataError::LockPoisoned)
    }

    fn keyed_mac(&self, key: &str, chat_id: Option<i64>) -> HmacSha256 {
        let chat = chat_id.map(|id| id.to_string()).unwrap_or_default();
        let mut mac = self.mac.clone();
        mac.update(key.as_bytes());
        mac.update(b":");
        mac.update(chat.as_bytes());
        mac
    }

    fn signature(&self, key: &str, chat_id: Option<i64>) -> String {
        let tag = self.keyed_mac(key, chat_id).finalize().into_bytes();
        URL_SAFE_NO_PAD.encode(&tag[..TAG_LEN])
    }

    fn verify(&self, key: &str, chat_id: Option<i64>, signature: &str) -> bool {
        if signature.len() != SIGNATURE_LEN {
            return false;
        }
        match URL_SAFE_NO_PAD.decode(signature) {
            Ok(tag) if tag.len() == TAG_LEN => self
                .keyed_mac(key, chat_id)
                .verify_truncated_left(&tag)
                .is_ok(),
            _ => false,
        }
    }
}

/// Split `data` into key and signature if it has the token shape
pub fn split_token(data: &str) -> Option<(&str, &str)> {
    let bytes = data.as_bytes();
    if bytes.len() <= KEY_LEN {
        return None;
    }
    if !bytes[..KEY_LEN]
        .iter()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return None;
    }
    Some(data.split_at(KEY_LEN))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
