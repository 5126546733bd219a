// The shifted-window encoding (spec §4.1) and the per-processor interned
// string table it's built on (spec §3's "interned mapping from string keys
// to the base feature id of a 2w+1 window").

use crate::codec::{Decoder, Encoder};
use crate::error::Result;
use std::collections::HashMap;
use std::io;

/// Returned by a processor when it has no feature to contribute at a given
/// token (e.g. a gazetteer/cluster map miss). Distinct from the reserved
/// empty-string-key value `lookup("")` returns (see `FeatureProcessorBase::lookup`),
/// which is a real, constant feature id rather than a "don't emit" marker.
pub const UNKNOWN: u32 = u32::MAX;

/// The base state every `FeatureProcessor` variant embeds: its window
/// half-width and its own interned string → feature-id table. Both are
/// always serialized (spec §4.2, §6).
#[derive(Debug, Default, Clone)]
pub struct FeatureProcessorBase {
  pub window: u32,
  // Insertion order matters for `save` (spec §6: entries are written in the
  // order they were registered), so we keep it alongside the index.
  entries: Vec<(String, u32)>,
  index: HashMap<String, u32>,
}

impl FeatureProcessorBase {
  pub fn new(window: u32) -> Self {
    Self {
      window,
      entries: Vec::new(),
      index: HashMap::new(),
    }
  }

  /// `lookup(key, &mut total_features)`: for an empty key, returns the
  /// sentinel `window` without touching `total_features` or the table — a
  /// deliberate no-op, never silently allocated (spec §3/§9). For a new
  /// key, reserves `2w+1` consecutive ids and returns the center.
  pub fn lookup(&mut self, key: &str, total_features: &mut u32) -> u32 {
    if key.is_empty() {
      return self.window;
    }
    if let Some(&id) = self.index.get(key) {
      return id;
    }
    let id = *total_features + self.window;
    *total_features += 2 * self.window + 1;
    self.entries.push((key.to_string(), id));
    self.index.insert(key.to_string(), id);
    id
  }

  /// Read-only variant for inference-time lookups against an already
  /// trained table; a miss returns `UNKNOWN` rather than allocating.
  pub fn get(&self, key: &str) -> u32 {
    if key.is_empty() {
      return self.window;
    }
    self.index.get(key).copied().unwrap_or(UNKNOWN)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn save(&self, encoder: &mut Encoder<impl io::Write>) -> io::Result<()> {
    encoder.write_u32(self.window)?;
    encoder.write_u32(self.entries.len() as u32)?;
    for (key, id) in &self.entries {
      encoder.write_string(key)?;
      encoder.write_u32(*id)?;
    }
    Ok(())
  }

  pub fn load(decoder: &mut Decoder<impl io::Read>) -> Result<Self> {
    let window = decoder.read_u32()?;
    let count = decoder.read_u32()?;
    let mut base = Self::new(window);
    for _ in 0..count {
      let key = decoder.read_string()?;
      let id = decoder.read_u32()?;
      base.entries.push((key.clone(), id));
      base.index.insert(key, id);
    }
    Ok(base)
  }
}

/// Clips `[i+l, i+r]` to `[0, size)` and writes `f + (p - i)` into every
/// clipped position's feature list. `i` is allowed to be negative or
/// `>= size` (the "outer window" callers rely on this); the clip alone
/// decides which, if any, real positions are touched.
pub fn emit(features: &mut [Vec<u32>], i: i64, f: u32, l: i32, r: i32) {
  if f == UNKNOWN {
    return;
  }
  let size = features.len() as i64;
  if size == 0 {
    return;
  }
  let lo = (i + l as i64).max(0);
  let hi = (i + r as i64).min(size - 1);
  if lo > hi {
    return;
  }
  for p in lo..=hi {
    let offset = p - i;
    features[p as usize].push((f as i64 + offset) as u32);
  }
}

/// The common case: emit in the symmetric `±w` window around token `i`.
pub fn emit_in_window(features: &mut [Vec<u32>], i: usize, f: u32, w: u32) {
  emit(features, i as i64, f, -(w as i32), w as i32);
}

/// Forward-only window `[1, w]` — used by `PreviousStage`, which must only
/// be visible to tokens to its right (spec §4.6).
pub fn emit_forward_window(features: &mut [Vec<u32>], i: usize, f: u32, w: u32) {
  emit(features, i as i64, f, 1, w as i32);
}

/// Emit with an explicit, possibly asymmetric range (used by gazetteers,
/// which anchor at one position but emit across `[g, g]` for each `g` in a
/// match span — see spec §4.8).
pub fn emit_range(features: &mut [Vec<u32>], i: usize, f: u32, l: i32, r: i32) {
  emit(features, i as i64, f, l, r);
}

/// Outer-window emission (spec §4.1): the same id at virtual positions
/// `-1..-w` and `size..size+w-1`, each contributing its own `±w` window
/// clipped back onto the real sentence — so only the edge tokens are
/// touched, each possibly more than once.
pub fn emit_outer_window(features: &mut [Vec<u32>], f: u32, w: u32) {
  let size = features.len() as i64;
  if size == 0 {
    return;
  }
  for k in 1..=w as i64 {
    emit(features, -k, f, -(w as i32), w as i32);
    emit(features, size - 1 + k, f, -(w as i32), w as i32);
  }
}

/// Hex-encodes a signed integer as a sign prefix (`-` if negative) followed
/// by its nibbles low-to-high using `"0123456789abcdef"` — the scratch-key
/// encoding `PreviousStage` uses to fold `(bilou, entity)` into one string
/// (spec §4.6).
pub fn hex_encode(n: i64) -> String {
  const DIGITS: &[u8; 16] = b"0123456789abcdef";
  let negative = n < 0;
  let mut magnitude = n.unsigned_abs();
  let mut out = String::new();
  if negative {
    out.push('-');
  }
  if magnitude == 0 {
    out.push('0');
  }
  while magnitude > 0 {
    out.push(DIGITS[(magnitude & 0xf) as usize] as char);
    magnitude >>= 4;
  }
  out
}
