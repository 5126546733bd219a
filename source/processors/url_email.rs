// URLEmailDetector (spec §4.9): seeds local BILOU probabilities with a
// unit-confidence `U` label wherever a token looks like a URL or email
// address, deterministically, via a small `peg` grammar in the style of
// the training-configuration grammar in `config.rs`.

use crate::entity_types::{EntityType, EntityTypeTable};
use crate::error::{Error, Result};
use crate::sentence::{BilouLabel, Sentence};
use crate::window::FeatureProcessorBase;
use std::io;

mod url_detector {
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub enum Detection {
    NoMatch,
    Url,
    Email,
  }

  peg::parser! {
    grammar grammar() for str {
      rule alnum() = ['a'..='z' | 'A'..='Z' | '0'..='9']
      rule local_char() = alnum() / ['.' | '_' | '%' | '+' | '-']
      rule domain_label() = alnum() (alnum() / "-")*
      rule domain() = domain_label() ("." domain_label())+
      rule scheme() = "https://" / "http://" / "ftp://"
      pub rule email() -> () = local_char()+ "@" domain() ![_]
      pub rule url() -> () = (scheme() / "www.") (!['\u{0}'..=' '][_])+ ![_]
    }
  }

  /// Deterministic, single-pass classification of one token. Email is
  /// tried first since an address like `a@b.com` would otherwise also
  /// satisfy a loose URL grammar.
  pub fn detect(token: &str) -> Detection {
    if grammar::email(token).is_ok() {
      return Detection::Email;
    }
    if grammar::url(token).is_ok() {
      return Detection::Url;
    }
    Detection::NoMatch
  }
}

use url_detector::Detection;

#[derive(Debug, Default, Clone)]
pub struct URLEmailDetector {
  pub base: FeatureProcessorBase,
  url: EntityType,
  email: EntityType,
}

impl URLEmailDetector {
  pub fn parse(
    window: u32,
    args: &[String],
    entities: &mut EntityTypeTable,
    _total_features: &mut u32,
  ) -> Result<Self> {
    let [url_name, email_name] = args else {
      return Err(Error::ConfigArity {
        processor: "URLEmailDetector".to_string(),
        expected: "2",
        got: args.len(),
      });
    };
    Ok(Self {
      base: FeatureProcessorBase::new(window),
      url: entities.intern(url_name),
      email: entities.intern(email_name),
    })
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)?;
    encoder.write_u32(self.url.0)?;
    encoder.write_u32(self.email.0)?;
    Ok(())
  }

  pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
    let base = FeatureProcessorBase::load(decoder)?;
    let url = EntityType(decoder.read_u32()?);
    let email = EntityType(decoder.read_u32()?);
    Ok(Self { base, url, email })
  }

  pub fn process_sentence(&mut self, sentence: &mut Sentence, _total_features: &mut u32) {
    for i in 0..sentence.size() {
      if sentence.probabilities[i].local_filled {
        continue;
      }
      let entity_type = match url_detector::detect(&sentence.words[i].form) {
        Detection::NoMatch => continue,
        Detection::Url => self.url,
        Detection::Email => self.email,
      };
      let probabilities = &mut sentence.probabilities[i];
      for label in BilouLabel::ALL {
        let slot = probabilities.slot_mut(label);
        slot.probability = 0.0;
        slot.entity = EntityType::UNKNOWN;
      }
      let unit = probabilities.slot_mut(BilouLabel::U);
      unit.probability = 1.0;
      unit.entity = entity_type;
      probabilities.local_filled = true;
    }
  }
}
