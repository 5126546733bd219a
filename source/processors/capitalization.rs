// FormCapitalization / RawLemmaCapitalization (spec §4.4): three reserved
// features — first-letter uppercase (`f`), all-uppercase (`a`), mixed case
// (`m`) — derived from Unicode general category. Per spec §1, unicode
// category tables are assumed available; `unicode-properties` (as used by
// `llm_utils::splitting::rule_based` for the same Lu/Lt/Ll distinction)
// provides that classification.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::io;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

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

fn is_upper(ch: char) -> bool {
  matches!(
    ch.general_category(),
    GeneralCategory::UppercaseLetter | GeneralCategory::TitlecaseLetter
  )
}

fn is_lower(ch: char) -> bool {
  matches!(ch.general_category(), GeneralCategory::LowercaseLetter)
}

/// `(first letter is upper, all-upper with no lower seen, both seen)`.
fn classify(text: &str) -> (bool, bool, bool) {
  let first_is_upper = text.chars().next().map(is_upper).unwrap_or(false);
  let (mut was_upper, mut was_lower) = (false, false);
  for ch in text.chars() {
    was_upper |= is_upper(ch);
    was_lower |= is_lower(ch);
  }
  (first_is_upper, was_upper && !was_lower, was_upper && was_lower)
}

macro_rules! capitalization_processor {
  ($name:ident, $field:ident, $label:literal) => {
    #[derive(Debug, Clone)]
    pub struct $name {
      pub base: FeatureProcessorBase,
      first_upper: u32,
      all_upper: u32,
      mixed: u32,
    }

    impl $name {
      pub fn parse(window: u32, args: &[String], total_features: &mut u32) -> Result<Self> {
        require_no_args($label, args)?;
        let mut base = FeatureProcessorBase::new(window);
        let first_upper = base.lookup("f", total_features);
        let all_upper = base.lookup("a", total_features);
        let mixed = base.lookup("m", total_features);
        Ok(Self {
          base,
          first_upper,
          all_upper,
          mixed,
        })
      }

      pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
        self.base.save(encoder)
      }

      pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
        let base = FeatureProcessorBase::load(decoder)?;
        let first_upper = base.get("f");
        let all_upper = base.get("a");
        let mixed = base.get("m");
        Ok(Self {
          base,
          first_upper,
          all_upper,
          mixed,
        })
      }

      pub fn process_sentence(&mut self, sentence: &mut Sentence, _total_features: &mut u32) {
        let w = self.base.window;
        for i in 0..sentence.size() {
          let (first_upper, all_upper, mixed) = classify(&sentence.words[i].$field);
          if first_upper {
            window::emit_in_window(&mut sentence.features, i, self.first_upper, w);
          }
          if all_upper {
            window::emit_in_window(&mut sentence.features, i, self.all_upper, w);
          }
          if mixed {
            window::emit_in_window(&mut sentence.features, i, self.mixed, w);
          }
        }
      }
    }
  };
}

capitalization_processor!(FormCapitalization, form, "FormCapitalization");
capitalization_processor!(RawLemmaCapitalization, raw_lemma, "RawLemmaCapitalization");

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sentence::Word;

  fn word(form: &str) -> Word {
    Word {
      form: form.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn classifies_first_upper_all_upper_and_mixed() {
    assert_eq!((true, false, false), classify("Prague"));
    assert_eq!((true, true, false), classify("IS"));
    assert_eq!((false, false, false), classify("nice"));
    assert_eq!((false, false, true), classify("mIxEd"));
  }

  #[test]
  fn pipeline_scenario_from_spec() {
    let mut processor = FormCapitalization::parse(2, &[], &mut 0).unwrap();
    let mut total = 0;
    let mut sentence = Sentence::new(vec![
      word("Prague"),
      word("IS"),
      word("nice"),
      word("mIxEd"),
    ]);
    processor.process_sentence(&mut sentence, &mut total);
    // "Prague" -> f only
    assert!(sentence.features[0].contains(&processor.first_upper));
    assert!(!sentence.features[0].contains(&processor.all_upper));
    assert!(!sentence.features[0].contains(&processor.mixed));
    // "IS" -> f and a
    assert!(sentence.features[1].contains(&processor.first_upper));
    assert!(sentence.features[1].contains(&processor.all_upper));
    // "nice" -> nothing
    assert!(!sentence.features[2].contains(&processor.first_upper));
    assert!(!sentence.features[2].contains(&processor.all_upper));
    assert!(!sentence.features[2].contains(&processor.mixed));
    // "mIxEd" -> m only (first char lowercase)
    assert!(!sentence.features[3].contains(&processor.first_upper));
    assert!(sentence.features[3].contains(&processor.mixed));
  }
}
