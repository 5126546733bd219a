// NumericTimeValue (spec §4.5): classifies the leading ASCII digit run of
// a token's form into hour/minute/day/month/year bands when the whole
// token is digits, or into a "time" feature when it's two digit runs
// joined by `.`/`:` with the first run under 24 and the second under 60.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::io;

#[derive(Debug, Clone)]
pub struct NumericTimeValue {
  pub base: FeatureProcessorBase,
  hour: u32,
  minute: u32,
  time: u32,
  day: u32,
  month: u32,
  year: u32,
}

/// Splits the leading run of ASCII digits off `text`, returning the parsed
/// value and the remainder. `None` if `text` doesn't start with a digit.
fn leading_digits(text: &str) -> Option<(u64, &str)> {
  let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
  if end == 0 {
    return None;
  }
  text[..end].parse().ok().map(|value| (value, &text[end..]))
}

impl NumericTimeValue {
  pub fn parse(window: u32, args: &[String], total_features: &mut u32) -> Result<Self> {
    if !args.is_empty() {
      return Err(Error::ConfigArity {
        processor: "NumericTimeValue".to_string(),
        expected: "0",
        got: args.len(),
      });
    }
    let mut base = FeatureProcessorBase::new(window);
    let hour = base.lookup("H", total_features);
    let minute = base.lookup("M", total_features);
    let time = base.lookup("t", total_features);
    let day = base.lookup("d", total_features);
    let month = base.lookup("m", total_features);
    let year = base.lookup("y", total_features);
    Ok(Self {
      base,
      hour,
      minute,
      time,
      day,
      month,
      year,
    })
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)
  }

  pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
    let base = FeatureProcessorBase::load(decoder)?;
    Ok(Self {
      hour: base.get("H"),
      minute: base.get("M"),
      time: base.get("t"),
      day: base.get("d"),
      month: base.get("m"),
      year: base.get("y"),
      base,
    })
  }

  pub fn process_sentence(&mut self, sentence: &mut Sentence, _total_features: &mut u32) {
    let w = self.base.window;
    for i in 0..sentence.size() {
      let form = sentence.words[i].form.clone();
      let Some((value, rest)) = leading_digits(&form) else {
        continue;
      };
      if rest.is_empty() {
        if value < 24 {
          window::emit_in_window(&mut sentence.features, i, self.hour, w);
        }
        if value < 60 {
          window::emit_in_window(&mut sentence.features, i, self.minute, w);
        }
        if (1..=31).contains(&value) {
          window::emit_in_window(&mut sentence.features, i, self.day, w);
        }
        if (1..=12).contains(&value) {
          window::emit_in_window(&mut sentence.features, i, self.month, w);
        }
        if (1000..=2200).contains(&value) {
          window::emit_in_window(&mut sentence.features, i, self.year, w);
        }
        continue;
      }
      if value >= 24 {
        continue;
      }
      let mut chars = rest.chars();
      if !matches!(chars.next(), Some('.') | Some(':')) {
        continue;
      }
      let Some((second, remainder)) = leading_digits(&rest[1..]) else {
        continue;
      };
      if remainder.is_empty() && second < 60 {
        window::emit_in_window(&mut sentence.features, i, self.time, w);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sentence::Word;

  fn numeric(form: &str) -> Word {
    Word {
      form: form.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn leading_digits_splits_number_and_remainder() {
    assert_eq!(Some((12, ":45")), leading_digits("12:45"));
    assert_eq!(Some((1999, "")), leading_digits("1999"));
    assert_eq!(None, leading_digits("abc"));
  }

  #[test]
  fn whole_digit_tokens_fire_every_matching_band() {
    let mut processor = NumericTimeValue::parse(2, &[], &mut 0).unwrap();
    let mut total = 0;
    let mut sentence = Sentence::new(vec![
      numeric("7"),
      numeric("30"),
      numeric("1999"),
      numeric("2300"),
    ]);
    processor.process_sentence(&mut sentence, &mut total);
    // "7": hour, minute, day, month all apply to a value under every bound.
    assert!(sentence.features[0].contains(&processor.hour));
    assert!(sentence.features[0].contains(&processor.minute));
    assert!(sentence.features[0].contains(&processor.day));
    assert!(sentence.features[0].contains(&processor.month));
    assert!(!sentence.features[0].contains(&processor.year));
    // "30": too big for hour/month, fits minute and day.
    assert!(!sentence.features[1].contains(&processor.hour));
    assert!(sentence.features[1].contains(&processor.minute));
    assert!(sentence.features[1].contains(&processor.day));
    assert!(!sentence.features[1].contains(&processor.month));
    // "1999": only year.
    assert!(!sentence.features[2].contains(&processor.day));
    assert!(!sentence.features[2].contains(&processor.month));
    assert!(sentence.features[2].contains(&processor.year));
    // "2300": outside every band.
    assert!(sentence.features[3].is_empty());
  }

  #[test]
  fn time_feature_needs_first_run_under_24_and_second_under_60() {
    let mut processor = NumericTimeValue::parse(2, &[], &mut 0).unwrap();
    let mut total = 0;
    let mut sentence = Sentence::new(vec![numeric("12:45"), numeric("13.70")]);
    processor.process_sentence(&mut sentence, &mut total);
    assert!(sentence.features[0].contains(&processor.time));
    assert!(!sentence.features[1].contains(&processor.time)); // 70 >= 60
  }

  #[test]
  fn digit_run_followed_by_something_other_than_dot_or_colon_is_inert() {
    let mut processor = NumericTimeValue::parse(2, &[], &mut 0).unwrap();
    let mut total = 0;
    let mut sentence = Sentence::new(vec![numeric("12x45")]);
    processor.process_sentence(&mut sentence, &mut total);
    assert!(sentence.features[0].is_empty());
  }
}
