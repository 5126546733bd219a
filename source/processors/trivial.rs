// The lookup-only processors (spec §4.3): `Form`, `Lemma`, `RawLemma`,
// `Tag` each just project one word field through the window, plus the
// reserved empty-string feature at the sentence borders. `CzechLemmaTerm`
// is the same shape but scans `lemma_comments` for `"_;"` markers first.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::io;

fn require_no_args(processor: &'static str, args: &[String]) -> Result<()> {
  if args.is_empty() {
    Ok(())
  } else {
    Err(Error::ConfigArity {
      processor: processor.to_string(),
      expected: "0",
      got: args.len(),
    })
  }
}

macro_rules! lookup_only_processor {
  ($name:ident, $field:ident, $label:literal) => {
    #[derive(Debug, Default, Clone)]
    pub struct $name {
      pub base: FeatureProcessorBase,
    }

    impl $name {
      pub fn parse(window: u32, args: &[String], _total_features: &mut u32) -> Result<Self> {
        require_no_args($label, args)?;
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
          let key = sentence.words[i].$field.clone();
          let f = self.base.lookup(&key, total_features);
          window::emit_in_window(&mut sentence.features, i, f, w);
        }
        let border = self.base.lookup("", total_features);
        window::emit_outer_window(&mut sentence.features, border, w);
      }
    }
  };
}

lookup_only_processor!(Form, form, "Form");
lookup_only_processor!(Lemma, lemma_id, "Lemma");
lookup_only_processor!(RawLemma, raw_lemma, "RawLemma");
lookup_only_processor!(Tag, tag, "Tag");

/// Scans `lemma_comments` for each occurrence of the literal `"_;"` marker
/// and emits `lookup(<following char>)` in the window — Czech lemma
/// semantic-class features (spec §4.3).
#[derive(Debug, Default, Clone)]
pub struct CzechLemmaTerm {
  pub base: FeatureProcessorBase,
}

impl CzechLemmaTerm {
  pub fn parse(window: u32, args: &[String], _total_features: &mut u32) -> Result<Self> {
    require_no_args("CzechLemmaTerm", args)?;
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
      let comments = sentence.words[i].lemma_comments.clone();
      for position in memchr::memmem::find_iter(comments.as_bytes(), b"_;") {
        let after = &comments[position + 2..];
        if let Some(term) = after.chars().next() {
          let key = term.to_string();
          let f = self.base.lookup(&key, total_features);
          window::emit_in_window(&mut sentence.features, i, f, w);
        }
      }
    }
  }
}
