//! Identifier sanitization and corpus-wide unique allocation

use hive_domain::{Hex, MAX_HEX_ID_LEN};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Prefix of identifiers generated when sanitization leaves nothing
pub const FALLBACK_PREFIX: &str = "hex-";

const FALLBACK_RANDOM_LEN: usize = 8;

/// Turn an arbitrary string into a well-formed hex identifier.
///
/// Lowercases, replaces everything outside `[a-z0-9-]` with `-`, collapses
/// hyphen runs, trims hyphens at both ends and caps the length at 50. An input
/// with nothing usable gets a random `hex-xxxxxxxx` identifier instead.
pub fn sanitize(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && (id.is_empty() || id.ends_with('-')) {
            continue;
        }
        id.push(c);
    }

    // Only ASCII remains, so byte truncation is safe
    id.truncate(MAX_HEX_ID_LEN);
    let id = id.trim_end_matches('-');

    if id.is_empty() {
        fallback_id()
    } else {
        id.to_string()
    }
}

fn fallback_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", FALLBACK_PREFIX, &random[..FALLBACK_RANDOM_LEN])
}

/// Return `candidate`, or the first free `candidate-N` (N = 1, 2, ...), and
/// record the result in `used`.
///
/// The base is shortened when a suffix would push the identifier past 50
/// characters.
pub fn allocate_unique(candidate: &str, used: &mut HashSet<String>) -> String {
    if used.insert(candidate.to_string()) {
        return candidate.to_string();
    }

    let mut n: u64 = 1;
    loop {
        let suffix = format!("-{}", n);
        let keep = MAX_HEX_ID_LEN.saturating_sub(suffix.len());
        let base = truncate_chars(candidate, keep).trim_end_matches('-');
        let id = format!("{}{}", base, suffix);
        if used.insert(id.clone()) {
            return id;
        }
        n += 1;
    }
}

/// First edge identifier based on `base` that `hex` does not use yet
pub fn unique_edge_id(hex: &Hex, base: &str) -> String {
    let mut taken: HashSet<String> = hex.edges.iter().map(|e| e.id.clone()).collect();
    allocate_unique(base, &mut taken)
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shared set of identifiers taken in the current run.
///
/// Clones share the same set. Sanitizing and reserving happen under one lock,
/// so concurrent chunk extractions never hand out the same identifier.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    used: Arc<Mutex<HashSet<String>>>,
}

impl IdAllocator {
    /// Create an allocator that treats `ids` as already taken
    pub fn seeded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: Arc::new(Mutex::new(ids.into_iter().map(Into::into).collect())),
        }
    }

    /// Sanitize `raw` and reserve a unique identifier for it
    pub fn allocate(&self, raw: &str) -> String {
        self.reserve(&sanitize(raw))
    }

    /// Reserve a unique identifier for an already sanitized candidate
    pub fn reserve(&self, candidate: &str) -> String {
        allocate_unique(candidate, &mut self.lock())
    }

    /// Whether `id` is taken
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    /// Number of identifiers taken
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no identifier is taken
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.used.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
