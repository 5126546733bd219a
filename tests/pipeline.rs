use ner_features::{EntityType, NamedEntity, Pipeline, Sentence, Word};
use pretty_assertions::assert_eq;
use test_log::test;

fn word(form: &str, raw_lemma: &str) -> Word {
  Word {
    form: form.to_string(),
    raw_lemma: raw_lemma.to_string(),
    ..Default::default()
  }
}

#[test]
fn gazetteer_longest_match_fires_across_overlapping_anchors() {
  let mut gazetteer = tempfile::NamedTempFile::new().unwrap();
  use std::io::Write as _;
  writeln!(gazetteer, "new york").unwrap();
  writeln!(gazetteer, "new york city").unwrap();
  writeln!(gazetteer, "york").unwrap();
  gazetteer.flush().unwrap();

  let mut pipeline = Pipeline::new();
  pipeline
    .parse_line(&format!(
      "Gazetteers 2 {}",
      gazetteer.path().to_str().unwrap()
    ))
    .unwrap();

  let mut sentence = Sentence::new(vec![
    word("New", "new"),
    word("York", "york"),
    word("City", "city"),
    word("tomorrow", "tomorrow"),
  ]);
  pipeline.process_sentence(&mut sentence);

  assert!(!sentence.features[0].is_empty());
  assert!(!sentence.features[1].is_empty());
  assert!(!sentence.features[2].is_empty());
  assert!(sentence.features[3].is_empty());
}

#[test]
fn brown_clusters_fire_every_cluster_feature_at_a_known_form() {
  let mut clusters = tempfile::NamedTempFile::new().unwrap();
  use std::io::Write as _;
  writeln!(clusters, "110100\tbank").unwrap();
  clusters.flush().unwrap();

  let mut pipeline = Pipeline::new();
  pipeline
    .parse_line(&format!(
      "BrownClusters 2 {} 4",
      clusters.path().to_str().unwrap()
    ))
    .unwrap();

  let mut sentence = Sentence::new(vec![word("bank", "bank"), word("vault", "vault")]);
  pipeline.process_sentence(&mut sentence);

  assert!(!sentence.features[0].is_empty());
  assert!(sentence.features[1].is_empty());
}

#[test]
fn previous_stage_is_invisible_to_the_token_it_describes() {
  use ner_features::{Bilou, PreviousStage};

  let mut pipeline = Pipeline::new();
  pipeline.parse_line("PreviousStage 2").unwrap();

  let mut sentence = Sentence::new(vec![Word::default(); 5]);
  sentence.previous_stage[2] = PreviousStage {
    bilou: Bilou::B,
    entity: EntityType(3),
  };
  pipeline.process_sentence(&mut sentence);

  assert!(sentence.features[0].is_empty());
  assert!(sentence.features[1].is_empty());
  assert!(sentence.features[2].is_empty());
  assert!(!sentence.features[3].is_empty());
  assert!(!sentence.features[4].is_empty());
}

#[test]
fn czech_add_containers_synthesizes_person_and_time_spans() {
  let mut pipeline = Pipeline::new();
  pipeline.parse_line("CzechAddContainers 0").unwrap();

  let entity_types = pipeline.entity_types();
  let pf = entity_types.resolve("pf").unwrap();
  let ps = entity_types.resolve("ps").unwrap();
  let td = entity_types.resolve("td").unwrap();
  let tm = entity_types.resolve("tm").unwrap();
  let ty = entity_types.resolve("ty").unwrap();
  let person = entity_types.resolve("P").unwrap();
  let time = entity_types.resolve("T").unwrap();

  let mut sentence = Sentence::default();
  let mut entities = vec![
    NamedEntity {
      start: 0,
      length: 1,
      entity_type: pf,
    },
    NamedEntity {
      start: 1,
      length: 1,
      entity_type: pf,
    },
    NamedEntity {
      start: 2,
      length: 1,
      entity_type: ps,
    },
    NamedEntity {
      start: 5,
      length: 1,
      entity_type: td,
    },
    NamedEntity {
      start: 6,
      length: 1,
      entity_type: tm,
    },
    NamedEntity {
      start: 7,
      length: 1,
      entity_type: ty,
    },
  ];
  pipeline.process_entities(&mut sentence, &mut entities);

  assert_eq!(8, entities.len());
  assert_eq!(0, entities[0].start);
  assert_eq!(3, entities[0].length);
  assert_eq!(person, entities[0].entity_type);
  assert_eq!(5, entities[4].start);
  assert_eq!(3, entities[4].length);
  assert_eq!(time, entities[4].entity_type);
}

#[test]
fn url_email_detector_seeds_a_unit_label_only_at_the_matched_token() {
  use ner_features::BilouLabel;

  let mut pipeline = Pipeline::new();
  pipeline.parse_line("URLEmailDetector 2 URL EMAIL").unwrap();

  let mut sentence = Sentence::new(vec![
    word("hello", "hello"),
    word("x@y.z", "x@y.z"),
    word("world", "world"),
  ]);
  pipeline.process_sentence(&mut sentence);

  assert!(!sentence.probabilities[0].local_filled);
  assert!(sentence.probabilities[1].local_filled);
  assert!(!sentence.probabilities[2].local_filled);
  let unit = sentence.probabilities[1].slot(BilouLabel::U);
  assert_eq!(1.0, unit.probability);
}

#[test]
fn pipeline_rejects_malformed_configuration_lines() {
  let mut pipeline = Pipeline::new();
  assert!(pipeline.parse_line("Form notanumber").is_err());
  assert!(pipeline.parse_line("NotARealProcessor 1").is_err());
}
