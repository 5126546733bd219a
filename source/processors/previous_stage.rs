// PreviousStage (spec §4.6): folds an upstream predictor's per-token BILOU
// label and entity type into a single scratch key, looked up and emitted
// only in the forward window `[1, w]` — a token must never see its own or
// an earlier token's previous-stage label, only what's ahead of it.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::io;

#[derive(Debug, Default, Clone)]
pub struct PreviousStage {
  pub base: FeatureProcessorBase,
}

impl PreviousStage {
  pub fn parse(window: u32, args: &[String], _total_features: &mut u32) -> Result<Self> {
    if !args.is_empty() {
      return Err(Error::ConfigArity {
        processor: "PreviousStage".to_string(),
        expected: "0",
        got: args.len(),
      });
    }
    Ok(Self {
      base: FeatureProcessorBase::new(window),
    })
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)
  }

  pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
    Ok(Self {
      base: FeatureProcessorBase::load(decoder)?,
    })
  }

  pub fn process_sentence(&mut self, sentence: &mut Sentence, total_features: &mut u32) {
    let w = self.base.window;
    for i in 0..sentence.size() {
      let stage = sentence.previous_stage[i];
      // Only a known previous-stage label contributes a feature (spec §4.6:
      // "for each token with a known previous_stage[i].bilou"); `Unknown`
      // means the upstream predictor didn't label this token at all.
      if stage.bilou.as_label().is_none() {
        continue;
      }
      let key = format!(
        "{} {}",
        window::hex_encode(stage.bilou.code()),
        window::hex_encode(stage.entity.0 as i64)
      );
      let f = self.base.lookup(&key, total_features);
      window::emit_forward_window(&mut sentence.features, i, f, w);
    }
  }
}
