//! The thirteen concrete feature processors (spec §4) and the sealed
//! variant that dispatches across them (spec §4.2, §9: "implement
//! processors as a sealed tagged variant rather than open virtual
//! dispatch").

pub mod brown_clusters;
pub mod capitalization;
pub mod czech_containers;
pub mod gazetteers;
pub mod numeric_time;
pub mod previous_stage;
pub mod trivial;
pub mod url_email;

use crate::codec::{Decoder, Encoder};
use crate::entity_types::EntityTypeTable;
use crate::error::{Error, Result};
use crate::sentence::{NamedEntity, Sentence};
use std::io;

use brown_clusters::BrownClusters;
use capitalization::{FormCapitalization, RawLemmaCapitalization};
use czech_containers::CzechAddContainers;
use gazetteers::Gazetteers;
use numeric_time::NumericTimeValue;
use previous_stage::PreviousStage;
use trivial::{CzechLemmaTerm, Form, Lemma, RawLemma, Tag};
use url_email::URLEmailDetector;

#[derive(Debug, Clone)]
pub enum Processor {
  BrownClusters(BrownClusters),
  CzechAddContainers(CzechAddContainers),
  CzechLemmaTerm(CzechLemmaTerm),
  Form(Form),
  FormCapitalization(FormCapitalization),
  Gazetteers(Gazetteers),
  Lemma(Lemma),
  NumericTimeValue(NumericTimeValue),
  PreviousStage(PreviousStage),
  RawLemma(RawLemma),
  RawLemmaCapitalization(RawLemmaCapitalization),
  Tag(Tag),
  URLEmailDetector(URLEmailDetector),
}

impl Processor {
  pub fn name(&self) -> &'static str {
    match self {
      Processor::BrownClusters(_) => "BrownClusters",
      Processor::CzechAddContainers(_) => "CzechAddContainers",
      Processor::CzechLemmaTerm(_) => "CzechLemmaTerm",
      Processor::Form(_) => "Form",
      Processor::FormCapitalization(_) => "FormCapitalization",
      Processor::Gazetteers(_) => "Gazetteers",
      Processor::Lemma(_) => "Lemma",
      Processor::NumericTimeValue(_) => "NumericTimeValue",
      Processor::PreviousStage(_) => "PreviousStage",
      Processor::RawLemma(_) => "RawLemma",
      Processor::RawLemmaCapitalization(_) => "RawLemmaCapitalization",
      Processor::Tag(_) => "Tag",
      Processor::URLEmailDetector(_) => "URLEmailDetector",
    }
  }

  /// The factory (spec §4.11): a closed match on the thirteen canonical
  /// names, exact and case-sensitive.
  pub fn parse(
    name: &str,
    window: u32,
    args: &[String],
    entities: &mut EntityTypeTable,
    total_features: &mut u32,
  ) -> Result<Self> {
    match name {
      "BrownClusters" => Ok(Processor::BrownClusters(BrownClusters::parse(
        window,
        args,
        total_features,
      )?)),
      "CzechAddContainers" => Ok(Processor::CzechAddContainers(CzechAddContainers::parse(
        window,
        args,
        entities,
        total_features,
      )?)),
      "CzechLemmaTerm" => Ok(Processor::CzechLemmaTerm(CzechLemmaTerm::parse(
        window,
        args,
        total_features,
      )?)),
      "Form" => Ok(Processor::Form(Form::parse(window, args, total_features)?)),
      "FormCapitalization" => Ok(Processor::FormCapitalization(FormCapitalization::parse(
        window,
        args,
        total_features,
      )?)),
      "Gazetteers" => Ok(Processor::Gazetteers(Gazetteers::parse(
        window,
        args,
        total_features,
      )?)),
      "Lemma" => Ok(Processor::Lemma(Lemma::parse(window, args, total_features)?)),
      "NumericTimeValue" => Ok(Processor::NumericTimeValue(NumericTimeValue::parse(
        window,
        args,
        total_features,
      )?)),
      "PreviousStage" => Ok(Processor::PreviousStage(PreviousStage::parse(
        window,
        args,
        total_features,
      )?)),
      "RawLemma" => Ok(Processor::RawLemma(RawLemma::parse(
        window,
        args,
        total_features,
      )?)),
      "RawLemmaCapitalization" => Ok(Processor::RawLemmaCapitalization(
        RawLemmaCapitalization::parse(window, args, total_features)?,
      )),
      "Tag" => Ok(Processor::Tag(Tag::parse(window, args, total_features)?)),
      "URLEmailDetector" => Ok(Processor::URLEmailDetector(URLEmailDetector::parse(
        window,
        args,
        entities,
        total_features,
      )?)),
      other => Err(Error::UnknownProcessorName {
        name: other.to_string(),
      }),
    }
  }

  pub fn save(&self, encoder: &mut Encoder<impl io::Write>) -> io::Result<()> {
    match self {
      Processor::BrownClusters(p) => p.save(encoder),
      Processor::CzechAddContainers(p) => p.save(encoder),
      Processor::CzechLemmaTerm(p) => p.save(encoder),
      Processor::Form(p) => p.save(encoder),
      Processor::FormCapitalization(p) => p.save(encoder),
      Processor::Gazetteers(p) => p.save(encoder),
      Processor::Lemma(p) => p.save(encoder),
      Processor::NumericTimeValue(p) => p.save(encoder),
      Processor::PreviousStage(p) => p.save(encoder),
      Processor::RawLemma(p) => p.save(encoder),
      Processor::RawLemmaCapitalization(p) => p.save(encoder),
      Processor::Tag(p) => p.save(encoder),
      Processor::URLEmailDetector(p) => p.save(encoder),
    }
  }

  pub fn load(
    name: &str,
    decoder: &mut Decoder<impl io::Read>,
    entities: &EntityTypeTable,
  ) -> Result<Self> {
    match name {
      "BrownClusters" => Ok(Processor::BrownClusters(BrownClusters::load(decoder)?)),
      "CzechAddContainers" => Ok(Processor::CzechAddContainers(CzechAddContainers::load(
        decoder, entities,
      )?)),
      "CzechLemmaTerm" => Ok(Processor::CzechLemmaTerm(CzechLemmaTerm::load(decoder)?)),
      "Form" => Ok(Processor::Form(Form::load(decoder)?)),
      "FormCapitalization" => Ok(Processor::FormCapitalization(FormCapitalization::load(
        decoder,
      )?)),
      "Gazetteers" => Ok(Processor::Gazetteers(Gazetteers::load(decoder)?)),
      "Lemma" => Ok(Processor::Lemma(Lemma::load(decoder)?)),
      "NumericTimeValue" => Ok(Processor::NumericTimeValue(NumericTimeValue::load(decoder)?)),
      "PreviousStage" => Ok(Processor::PreviousStage(PreviousStage::load(decoder)?)),
      "RawLemma" => Ok(Processor::RawLemma(RawLemma::load(decoder)?)),
      "RawLemmaCapitalization" => Ok(Processor::RawLemmaCapitalization(
        RawLemmaCapitalization::load(decoder)?,
      )),
      "Tag" => Ok(Processor::Tag(Tag::load(decoder)?)),
      "URLEmailDetector" => Ok(Processor::URLEmailDetector(URLEmailDetector::load(decoder)?)),
      other => Err(Error::UnknownProcessorName {
        name: other.to_string(),
      }),
    }
  }

  /// Default no-op (spec §4.2); every variant but `CzechAddContainers`
  /// contributes features here.
  pub fn process_sentence(&mut self, sentence: &mut Sentence, total_features: &mut u32) {
    match self {
      Processor::BrownClusters(p) => p.process_sentence(sentence, total_features),
      Processor::CzechAddContainers(_) => {}
      Processor::CzechLemmaTerm(p) => p.process_sentence(sentence, total_features),
      Processor::Form(p) => p.process_sentence(sentence, total_features),
      Processor::FormCapitalization(p) => p.process_sentence(sentence, total_features),
      Processor::Gazetteers(p) => p.process_sentence(sentence, total_features),
      Processor::Lemma(p) => p.process_sentence(sentence, total_features),
      Processor::NumericTimeValue(p) => p.process_sentence(sentence, total_features),
      Processor::PreviousStage(p) => p.process_sentence(sentence, total_features),
      Processor::RawLemma(p) => p.process_sentence(sentence, total_features),
      Processor::RawLemmaCapitalization(p) => p.process_sentence(sentence, total_features),
      Processor::Tag(p) => p.process_sentence(sentence, total_features),
      Processor::URLEmailDetector(p) => p.process_sentence(sentence, total_features),
    }
  }

  /// Default no-op (spec §4.2); only `CzechAddContainers` overrides it.
  pub fn process_entities(&mut self, sentence: &mut Sentence, entities: &mut Vec<NamedEntity>) {
    if let Processor::CzechAddContainers(p) = self {
      p.process_entities(sentence, entities);
    }
  }
}
