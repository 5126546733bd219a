// CzechAddContainers (spec §4.10): a post-prediction pass over already
// decoded entities that synthesizes two "container" entity types — `P`
// (person, from an abutting `pf+ ps+` run) and `T` (time, from a `td tm`
// or bare `tm ty` run) — and prepends them at their trigger position
// while keeping every original entity untouched.

use crate::entity_types::{EntityType, EntityTypeTable};
use crate::error::{Error, Result};
use crate::sentence::{NamedEntity, Sentence};
use crate::window::FeatureProcessorBase;
use std::collections::HashMap;
use std::io;

#[derive(Debug, Default, Clone)]
pub struct CzechAddContainers {
  pub base: FeatureProcessorBase,
  pf: EntityType,
  ps: EntityType,
  td: EntityType,
  tm: EntityType,
  ty: EntityType,
  p_container: EntityType,
  t_container: EntityType,
}

impl CzechAddContainers {
  pub fn parse(
    window: u32,
    args: &[String],
    entities: &mut EntityTypeTable,
    _total_features: &mut u32,
  ) -> Result<Self> {
    if window != 0 {
      return Err(Error::WindowConstraint {
        processor: "CzechAddContainers".to_string(),
        message: "window must be 0".to_string(),
      });
    }
    if !args.is_empty() {
      return Err(Error::ConfigArity {
        processor: "CzechAddContainers".to_string(),
        expected: "0",
        got: args.len(),
      });
    }
    Ok(Self {
      base: FeatureProcessorBase::new(0),
      pf: entities.intern("pf"),
      ps: entities.intern("ps"),
      td: entities.intern("td"),
      tm: entities.intern("tm"),
      ty: entities.intern("ty"),
      p_container: entities.intern("P"),
      t_container: entities.intern("T"),
    })
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)
  }

  /// The entity-type ids aren't re-serialized (spec §6 lists no extra
  /// bytes for this processor) — they're re-resolved against the model's
  /// already-loaded `EntityTypeTable`, which is populated before the
  /// processor list in the saved file.
  pub fn load(
    decoder: &mut crate::codec::Decoder<impl io::Read>,
    entities: &EntityTypeTable,
  ) -> Result<Self> {
    let base = FeatureProcessorBase::load(decoder)?;
    Ok(Self {
      base,
      pf: entities.resolve("pf")?,
      ps: entities.resolve("ps")?,
      td: entities.resolve("td")?,
      tm: entities.resolve("tm")?,
      ty: entities.resolve("ty")?,
      p_container: entities.resolve("P")?,
      t_container: entities.resolve("T")?,
    })
  }

  pub fn process_entities(&mut self, _sentence: &mut Sentence, entities: &mut Vec<NamedEntity>) {
    let input = entities.clone();
    let n = input.len();
    let mut containers: HashMap<usize, Vec<NamedEntity>> = HashMap::new();

    let mut k = 0;
    while k < n {
      if input[k].entity_type == self.pf
        && !(k > 0 && input[k - 1].entity_type == self.pf && input[k - 1].abuts(&input[k]))
      {
        let mut idx = k;
        while idx + 1 < n
          && input[idx + 1].entity_type == self.pf
          && input[idx].abuts(&input[idx + 1])
        {
          idx += 1;
        }
        if idx + 1 < n && input[idx + 1].entity_type == self.ps && input[idx].abuts(&input[idx + 1])
        {
          let mut end = idx + 1;
          while end + 1 < n
            && input[end + 1].entity_type == self.ps
            && input[end].abuts(&input[end + 1])
          {
            end += 1;
          }
          containers.entry(k).or_default().push(NamedEntity {
            start: input[k].start,
            length: input[end].end() - input[k].start,
            entity_type: self.p_container,
          });
        }
      }
      k += 1;
    }

    for k in 0..n {
      if input[k].entity_type == self.td
        && k + 1 < n
        && input[k + 1].entity_type == self.tm
        && input[k].abuts(&input[k + 1])
      {
        let mut end = k + 1;
        if end + 1 < n && input[end + 1].entity_type == self.ty && input[end].abuts(&input[end + 1])
        {
          end += 1;
        }
        containers.entry(k).or_default().push(NamedEntity {
          start: input[k].start,
          length: input[end].end() - input[k].start,
          entity_type: self.t_container,
        });
      }
    }

    for k in 0..n {
      if input[k].entity_type == self.tm
        && !(k > 0 && input[k - 1].entity_type == self.td && input[k - 1].abuts(&input[k]))
        && k + 1 < n
        && input[k + 1].entity_type == self.ty
        && input[k].abuts(&input[k + 1])
      {
        containers.entry(k).or_default().push(NamedEntity {
          start: input[k].start,
          length: input[k + 1].end() - input[k].start,
          entity_type: self.t_container,
        });
      }
    }

    if containers.is_empty() {
      return;
    }

    let mut merged = Vec::with_capacity(n + containers.values().map(Vec::len).sum::<usize>());
    for (index, original) in input.iter().enumerate() {
      if let Some(found) = containers.get(&index) {
        merged.extend(found.iter().copied());
      }
      merged.push(*original);
    }
    *entities = merged;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn setup() -> (CzechAddContainers, EntityTypeTable) {
    let mut entities = EntityTypeTable::new();
    let mut total = 0;
    let processor = CzechAddContainers::parse(0, &[], &mut entities, &mut total).unwrap();
    (processor, entities)
  }

  fn entity(start: usize, length: usize, entity_type: EntityType) -> NamedEntity {
    NamedEntity {
      start,
      length,
      entity_type,
    }
  }

  #[test]
  fn rejects_nonzero_window() {
    let mut entities = EntityTypeTable::new();
    let mut total = 0;
    assert!(matches!(
      CzechAddContainers::parse(1, &[], &mut entities, &mut total),
      Err(Error::WindowConstraint { .. })
    ));
  }

  #[test]
  fn builds_person_and_time_containers_at_trigger_positions() {
    let (mut processor, _entities) = setup();
    let mut sentence = Sentence::default();
    let mut list = vec![
      entity(0, 1, processor.pf),
      entity(1, 1, processor.pf),
      entity(2, 1, processor.ps),
      entity(5, 1, processor.td),
      entity(6, 1, processor.tm),
      entity(7, 1, processor.ty),
    ];
    processor.process_entities(&mut sentence, &mut list);

    assert_eq!(8, list.len());
    assert_eq!(entity(0, 3, processor.p_container), list[0]);
    assert_eq!(entity(0, 1, processor.pf), list[1]);
    assert_eq!(entity(1, 1, processor.pf), list[2]);
    assert_eq!(entity(2, 1, processor.ps), list[3]);
    assert_eq!(entity(5, 3, processor.t_container), list[4]);
    assert_eq!(entity(5, 1, processor.td), list[5]);
    assert_eq!(entity(6, 1, processor.tm), list[6]);
    assert_eq!(entity(7, 1, processor.ty), list[7]);
  }

  #[test]
  fn bare_tm_ty_without_a_preceding_td_also_triggers_a_time_container() {
    let (mut processor, _entities) = setup();
    let mut sentence = Sentence::default();
    let mut list = vec![entity(0, 1, processor.tm), entity(1, 1, processor.ty)];
    processor.process_entities(&mut sentence, &mut list);
    assert_eq!(3, list.len());
    assert_eq!(entity(0, 2, processor.t_container), list[0]);
  }

  #[test]
  fn unrelated_entities_produce_no_containers() {
    let (mut processor, mut entities) = setup();
    let other = entities.intern("org");
    let mut sentence = Sentence::default();
    let mut list = vec![entity(0, 1, other)];
    processor.process_entities(&mut sentence, &mut list);
    assert_eq!(1, list.len());
  }
}
