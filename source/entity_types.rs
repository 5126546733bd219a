use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io;

/// An interned entity-type tag (e.g. `pf`, `P`, `URL`). Stable across a
/// model's training and inference lifetime, like feature ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityType(pub u32);

impl EntityType {
  /// Out-of-band sentinel for "no entity type" (spec §4.9: a zeroed BILOU
  /// slot's `entity` is `unknown`), the same way `window::UNKNOWN` is kept
  /// outside the real feature id space. `EntityTypeTable::intern` assigns
  /// real ids sequentially starting at 0, so 0 is never safe to overload
  /// for this — whichever name is interned first would alias it.
  pub const UNKNOWN: EntityType = EntityType(u32::MAX);
}

impl Default for EntityType {
  fn default() -> Self {
    EntityType::UNKNOWN
  }
}

/// Global table of entity-type names shared by every processor that needs
/// one, mirroring the shared `total_features` counter: two processors
/// naming the same entity type (e.g. `CzechAddContainers`'s `pf`/`ps` and
/// some other processor's container labels) must resolve to the same id.
#[derive(Debug, Default)]
pub struct EntityTypeTable {
  names: Vec<String>,
  by_name: HashMap<String, EntityType>,
}

impl EntityTypeTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Interns `name`, allocating a fresh id the first time it's seen.
  pub fn intern(&mut self, name: &str) -> EntityType {
    if let Some(&id) = self.by_name.get(name) {
      return id;
    }
    let id = EntityType(self.names.len() as u32);
    self.names.push(name.to_string());
    self.by_name.insert(name.to_string(), id);
    id
  }

  /// Resolves an already-registered name, failing otherwise (used when a
  /// processor's configuration must reference a type registered earlier).
  pub fn resolve(&self, name: &str) -> Result<EntityType> {
    self
      .by_name
      .get(name)
      .copied()
      .ok_or_else(|| Error::UnknownEntityType {
        name: name.to_string(),
      })
  }

  pub fn name(&self, entity_type: EntityType) -> &str {
    &self.names[entity_type.0 as usize]
  }

  pub fn save(&self, encoder: &mut Encoder<impl io::Write>) -> io::Result<()> {
    encoder.write_u32(self.names.len() as u32)?;
    for name in &self.names {
      encoder.write_string(name)?;
    }
    Ok(())
  }

  pub fn load(decoder: &mut Decoder<impl io::Read>) -> Result<Self> {
    let count = decoder.read_u32()?;
    let mut table = Self::new();
    for _ in 0..count {
      let name = decoder.read_string()?;
      table.intern(&name);
    }
    Ok(table)
  }
}
