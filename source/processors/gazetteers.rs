// Gazetteers (spec §4.8): whitespace-tokenized phrase lists, interned
// prefix-by-prefix so a longest-match lookup at inference can walk from a
// single-token anchor out to the longest phrase that still matches,
// tagging each covered position with its role (generic/unigram/begin/
// inside/last) in the match.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

// Position roles (spec §4.8, §GLOSSARY): generic, unigram, begin, inside, last.
const ROLE_G: u32 = 0;
const ROLE_U: u32 = 1;
const ROLE_B: u32 = 2;
const ROLE_L: u32 = 3;
const ROLE_I: u32 = 4;

#[derive(Debug, Default, Clone)]
struct GazetteerEntry {
  features: Vec<u32>,
  prefix_of_longer: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Gazetteers {
  pub base: FeatureProcessorBase,
  entries: Vec<GazetteerEntry>,
  map: HashMap<String, usize>,
}

fn slots_per_length(longest: usize) -> u32 {
  match longest {
    0 => 0,
    1 => 2, // G, U
    2 => 4, // G, U, B, L
    _ => 5, // G, U, B, L, I
  }
}

impl Gazetteers {
  pub fn parse(window: u32, args: &[String], total_features: &mut u32) -> Result<Self> {
    if args.is_empty() {
      return Err(Error::ConfigArity {
        processor: "Gazetteers".to_string(),
        expected: "at least 1",
        got: args.len(),
      });
    }
    let mut processor = Self {
      base: FeatureProcessorBase::new(window),
      ..Default::default()
    };
    for path in args {
      processor.load_file(Path::new(path), window, total_features)?;
    }
    Ok(processor)
  }

  fn load_file(&mut self, path: &Path, window: u32, total_features: &mut u32) -> Result<()> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
      path: path.to_path_buf(),
      source,
    })?;
    let mut longest = 0usize;
    for line in BufReader::new(file).lines() {
      let line = line.map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
      })?;
      let tokens: Vec<&str> = line.split_whitespace().collect();
      if tokens.is_empty() {
        continue;
      }
      longest = longest.max(tokens.len());
      let mut phrase = String::new();
      for (position, token) in tokens.iter().enumerate() {
        if position > 0 {
          phrase.push(' ');
        }
        phrase.push_str(token);
        let index = self.intern(&phrase);
        if position == tokens.len() - 1 {
          let feature = *total_features + window;
          if !self.entries[index].features.contains(&feature) {
            self.entries[index].features.push(feature);
          }
        } else {
          self.entries[index].prefix_of_longer = true;
        }
      }
    }
    *total_features += (2 * window + 1) * slots_per_length(longest);
    log::debug!(
      "loaded {} phrase(s) from {}, longest {} token(s)",
      self.entries.len(),
      path.display(),
      longest
    );
    Ok(())
  }

  fn intern(&mut self, phrase: &str) -> usize {
    if let Some(&index) = self.map.get(phrase) {
      return index;
    }
    let index = self.entries.len();
    self.entries.push(GazetteerEntry::default());
    self.map.insert(phrase.to_string(), index);
    index
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)?;
    encoder.write_u32(self.entries.len() as u32)?;
    for entry in &self.entries {
      encoder.write_u8(entry.prefix_of_longer as u8)?;
      encoder.write_u8(entry.features.len() as u8)?;
      for &feature in &entry.features {
        encoder.write_u32(feature)?;
      }
    }
    encoder.write_u32(self.map.len() as u32)?;
    for (phrase, &index) in &self.map {
      encoder.write_string(phrase)?;
      encoder.write_u32(index as u32)?;
    }
    Ok(())
  }

  pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
    let base = FeatureProcessorBase::load(decoder)?;
    let entry_count = decoder.read_u32()?;
    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
      let prefix_of_longer = decoder.read_u8()? != 0;
      let feature_count = decoder.read_u8()?;
      let mut features = Vec::with_capacity(feature_count as usize);
      for _ in 0..feature_count {
        features.push(decoder.read_u32()?);
      }
      entries.push(GazetteerEntry {
        features,
        prefix_of_longer,
      });
    }
    let map_count = decoder.read_u32()?;
    let mut map = HashMap::with_capacity(map_count as usize);
    for _ in 0..map_count {
      let phrase = decoder.read_string()?;
      let index = decoder.read_u32()? as usize;
      map.insert(phrase, index);
    }
    Ok(Self { base, entries, map })
  }

  pub fn process_sentence(&mut self, sentence: &mut Sentence, _total_features: &mut u32) {
    let w = self.base.window;
    let span = 2 * w + 1;
    for i in 0..sentence.size() {
      let Some(&anchor_index) = self.map.get(&sentence.words[i].raw_lemma) else {
        continue;
      };
      for &feature in &self.entries[anchor_index].features {
        window::emit_in_window(&mut sentence.features, i, feature + ROLE_G * span, w);
        window::emit_in_window(&mut sentence.features, i, feature + ROLE_U * span, w);
      }

      let mut phrase = sentence.words[i].raw_lemma.clone();
      let mut current = anchor_index;
      let mut j = i;
      while self.entries[current].prefix_of_longer && j + 1 < sentence.size() {
        j += 1;
        phrase.push(' ');
        phrase.push_str(&sentence.words[j].raw_lemma);
        let Some(&next_index) = self.map.get(&phrase) else {
          break;
        };
        current = next_index;
        for &feature in &self.entries[current].features {
          for g in i..=j {
            let role = if g == i {
              ROLE_B
            } else if g == j {
              ROLE_L
            } else {
              ROLE_I
            };
            window::emit_in_window(&mut sentence.features, g, feature + ROLE_G * span, w);
            window::emit_in_window(&mut sentence.features, g, feature + role * span, w);
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sentence::Word;
  use std::io::Write as _;

  fn gazetteer_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
      writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
  }

  fn lemma(text: &str) -> Word {
    Word {
      raw_lemma: text.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn longest_match_extension_tags_every_covered_position() {
    let file = gazetteer_file(&["new york", "new york city", "york"]);
    let args = vec![file.path().to_str().unwrap().to_string()];
    let mut total = 0;
    let mut processor = Gazetteers::parse(2, &args, &mut total).unwrap();
    let mut sentence = Sentence::new(vec![
      lemma("new"),
      lemma("york"),
      lemma("city"),
      lemma("tomorrow"),
    ]);
    processor.process_sentence(&mut sentence, &mut total);
    let span = 2 * 2 + 1;
    let base = 0u32; // first (and only) file, total_features started at 0
    let feature = base + 2; // *total_features + w, w=2

    assert!(sentence.features[0].contains(&(feature + ROLE_G * span)));
    assert!(sentence.features[0].contains(&(feature + ROLE_B * span)));
    assert!(sentence.features[1].contains(&(feature + ROLE_L * span)));
    assert!(sentence.features[1].contains(&(feature + ROLE_I * span)));
    assert!(sentence.features[2].contains(&(feature + ROLE_L * span)));
    assert!(sentence.features[1].contains(&(feature + ROLE_U * span)));
  }

  #[test]
  fn slots_per_length_matches_longest_phrase_in_file() {
    assert_eq!(0, slots_per_length(0));
    assert_eq!(2, slots_per_length(1));
    assert_eq!(4, slots_per_length(2));
    assert_eq!(5, slots_per_length(3));
  }

  #[test]
  fn unmatched_anchor_emits_nothing() {
    let file = gazetteer_file(&["new york"]);
    let args = vec![file.path().to_str().unwrap().to_string()];
    let mut total = 0;
    let mut processor = Gazetteers::parse(2, &args, &mut total).unwrap();
    let mut sentence = Sentence::new(vec![lemma("unrelated")]);
    processor.process_sentence(&mut sentence, &mut total);
    assert!(sentence.features[0].is_empty());
  }
}
