//! The trained model: an ordered list of processors plus the shared
//! `total_features` counter and entity-type table every `parse` call
//! draws from (spec §3: "the assignment order of processors during
//! training is part of the model and must be preserved exactly").

use crate::codec::{Decoder, Encoder};
use crate::config;
use crate::entity_types::EntityTypeTable;
use crate::error::Result;
use crate::processors::Processor;
use crate::sentence::{NamedEntity, Sentence};
use std::io;

#[derive(Debug, Default)]
pub struct Pipeline {
  processors: Vec<Processor>,
  total_features: u32,
  entity_types: EntityTypeTable,
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn total_features(&self) -> u32 {
    self.total_features
  }

  pub fn entity_types(&self) -> &EntityTypeTable {
    &self.entity_types
  }

  /// Parses one training-configuration line and appends the resulting
  /// processor, preserving registration order (spec §6).
  pub fn parse_line(&mut self, line: &str) -> Result<()> {
    let parsed = config::parse_line(line)?;
    let before = self.total_features;
    let processor = Processor::parse(
      &parsed.name,
      parsed.window,
      &parsed.args,
      &mut self.entity_types,
      &mut self.total_features,
    )?;
    log::debug!(
      "registered {} (window {}), allocated {} feature id(s), total now {}",
      processor.name(),
      parsed.window,
      self.total_features - before,
      self.total_features
    );
    self.processors.push(processor);
    Ok(())
  }

  /// Binary model layout (spec §6), with the entity-type table and the
  /// running feature counter placed ahead of the processor list — neither
  /// is named in the literal byte table, but `CzechAddContainers::load`
  /// and continued training both need them reconstructed first.
  pub fn save(&self, encoder: &mut Encoder<impl io::Write>) -> io::Result<()> {
    self.entity_types.save(encoder)?;
    encoder.write_u32(self.total_features)?;
    encoder.write_u32(self.processors.len() as u32)?;
    for processor in &self.processors {
      encoder.write_string(processor.name())?;
      processor.save(encoder)?;
    }
    Ok(())
  }

  pub fn load(decoder: &mut Decoder<impl io::Read>) -> Result<Self> {
    let entity_types = EntityTypeTable::load(decoder)?;
    let total_features = decoder.read_u32()?;
    let count = decoder.read_u32()?;
    let mut processors = Vec::with_capacity(count as usize);
    for _ in 0..count {
      let name = decoder.read_string()?;
      processors.push(Processor::load(&name, decoder, &entity_types)?);
    }
    Ok(Self {
      processors,
      total_features,
      entity_types,
    })
  }

  /// Runs every processor over `sentence` in registration order (spec
  /// §4.2, §5: single-threaded per sentence).
  pub fn process_sentence(&mut self, sentence: &mut Sentence) {
    for processor in &mut self.processors {
      processor.process_sentence(sentence, &mut self.total_features);
    }
  }

  pub fn process_entities(&mut self, sentence: &mut Sentence, entities: &mut Vec<NamedEntity>) {
    for processor in &mut self.processors {
      processor.process_entities(sentence, entities);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sentence::Word;

  #[test]
  fn registration_order_is_preserved_across_a_save_load_round_trip() {
    let mut pipeline = Pipeline::new();
    pipeline.parse_line("Form 1").unwrap();
    pipeline.parse_line("Tag 2").unwrap();
    let names_before: Vec<&str> = pipeline.processors.iter().map(Processor::name).collect();

    let mut bytes = Vec::new();
    {
      let mut encoder = Encoder::new(&mut bytes);
      pipeline.save(&mut encoder).unwrap();
    }
    let mut decoder = Decoder::new(&bytes[..]);
    let loaded = Pipeline::load(&mut decoder).unwrap();
    let names_after: Vec<&str> = loaded.processors.iter().map(Processor::name).collect();

    assert_eq!(names_before, names_after);
    assert_eq!(pipeline.total_features, loaded.total_features);
  }

  #[test]
  fn unknown_processor_name_fails_without_mutating_the_pipeline() {
    let mut pipeline = Pipeline::new();
    assert!(pipeline.parse_line("NotAProcessor 1").is_err());
    assert!(pipeline.processors.is_empty());
  }

  #[test]
  fn process_sentence_runs_every_registered_processor() {
    let mut pipeline = Pipeline::new();
    pipeline.parse_line("Form 1").unwrap();
    pipeline.parse_line("Tag 1").unwrap();
    let mut sentence = Sentence::new(vec![Word {
      form: "Prague".into(),
      tag: "NNP".into(),
      ..Default::default()
    }]);
    pipeline.process_sentence(&mut sentence);
    // A single-token sentence is narrower than the window, so the outer
    // border emission (spec §4.1) touches this token from both virtual
    // sides in addition to its own in-window lookup: 3 ids per processor.
    assert_eq!(6, sentence.features[0].len());
  }
}
