use crate::entity_types::EntityType;

/// A single token's read-only morphological fields (spec §3). All of these
/// come from the external tokenizer/morphological analyzer; this crate
/// never constructs or mutates them, only reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Word {
  pub form: String,
  pub raw_lemma: String,
  pub lemma_id: String,
  pub lemma_comments: String,
  pub tag: String,
}

/// The five real BILOU labels, used to index `Probabilities::local`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BilouLabel {
  B,
  I,
  L,
  O,
  U,
}

impl BilouLabel {
  pub const ALL: [BilouLabel; 5] = [
    BilouLabel::B,
    BilouLabel::I,
    BilouLabel::L,
    BilouLabel::O,
    BilouLabel::U,
  ];

  pub fn index(self) -> usize {
    match self {
      BilouLabel::B => 0,
      BilouLabel::I => 1,
      BilouLabel::L => 2,
      BilouLabel::O => 3,
      BilouLabel::U => 4,
    }
  }
}

/// `previous_stage[i].bilou`: the six-state tagged enum from spec §3,
/// `Unknown` meaning the upstream predictor didn't label this token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bilou {
  Unknown,
  B,
  I,
  L,
  O,
  U,
}

impl Bilou {
  /// Integer encoding used by `PreviousStage`'s scratch key (spec §4.6):
  /// `Unknown` never reaches that code path, so it has no meaningful value
  /// here, but a stable mapping keeps `Bilou` cheap to encode uniformly.
  pub fn code(self) -> i64 {
    match self {
      Bilou::Unknown => -1,
      Bilou::B => 0,
      Bilou::I => 1,
      Bilou::L => 2,
      Bilou::O => 3,
      Bilou::U => 4,
    }
  }

  pub fn as_label(self) -> Option<BilouLabel> {
    match self {
      Bilou::Unknown => None,
      Bilou::B => Some(BilouLabel::B),
      Bilou::I => Some(BilouLabel::I),
      Bilou::L => Some(BilouLabel::L),
      Bilou::O => Some(BilouLabel::O),
      Bilou::U => Some(BilouLabel::U),
    }
  }
}

/// `previous_stage[i]`: read by `PreviousStage` only (spec §3).
#[derive(Clone, Copy, Debug, Default)]
pub struct PreviousStage {
  pub bilou: Bilou,
  pub entity: EntityType,
}

impl Default for Bilou {
  fn default() -> Self {
    Bilou::Unknown
  }
}

/// One of the five BILOU slots in `Probabilities::local`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalBilouSlot {
  pub probability: f64,
  pub entity: EntityType,
}

/// `probabilities[i]`: written by `URLEmailDetector` only (spec §3).
#[derive(Clone, Copy, Debug, Default)]
pub struct Probabilities {
  pub local: [LocalBilouSlot; 5],
  pub local_filled: bool,
}

impl Probabilities {
  pub fn slot(&self, label: BilouLabel) -> &LocalBilouSlot {
    &self.local[label.index()]
  }

  pub fn slot_mut(&mut self, label: BilouLabel) -> &mut LocalBilouSlot {
    &mut self.local[label.index()]
  }
}

/// A tokenized, morphologically annotated sentence plus the per-token
/// accumulators the feature processors fill in (spec §3).
#[derive(Clone, Debug, Default)]
pub struct Sentence {
  pub words: Vec<Word>,
  pub features: Vec<Vec<u32>>,
  pub previous_stage: Vec<PreviousStage>,
  pub probabilities: Vec<Probabilities>,
}

impl Sentence {
  pub fn new(words: Vec<Word>) -> Self {
    let size = words.len();
    Self {
      words,
      features: vec![Vec::new(); size],
      previous_stage: vec![PreviousStage::default(); size],
      probabilities: vec![Probabilities::default(); size],
    }
  }

  pub fn size(&self) -> usize {
    self.words.len()
  }
}

/// An entity span in token coordinates — `start`/`length` count tokens, not
/// bytes (spec §3, §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedEntity {
  pub start: usize,
  pub length: usize,
  pub entity_type: EntityType,
}

impl NamedEntity {
  pub fn end(&self) -> usize {
    self.start + self.length
  }

  /// `a.start + a.length == b.start` — the token-index adjacency test used
  /// throughout `CzechAddContainers` (spec §4.10, §9).
  pub fn abuts(&self, other: &NamedEntity) -> bool {
    self.end() == other.start
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_sentence_allocates_parallel_arrays() {
    let sentence = Sentence::new(vec![Word::default(), Word::default()]);
    assert_eq!(2, sentence.size());
    assert_eq!(2, sentence.features.len());
    assert_eq!(2, sentence.previous_stage.len());
    assert_eq!(2, sentence.probabilities.len());
  }

  #[test]
  fn abuts_is_exact_token_adjacency() {
    let a = NamedEntity {
      start: 0,
      length: 2,
      entity_type: EntityType(0),
    };
    let b = NamedEntity {
      start: 2,
      length: 1,
      entity_type: EntityType(0),
    };
    let c = NamedEntity {
      start: 3,
      length: 1,
      entity_type: EntityType(0),
    };
    assert!(a.abuts(&b));
    assert!(!a.abuts(&c));
  }
}
