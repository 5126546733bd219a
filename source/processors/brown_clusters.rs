// BrownClusters (spec §4.7): interns Brown-cluster-bitstring prefixes
// (plus an implicit whole-string prefix) into feature ids using the same
// window-banded interner every processor carries, then maps each observed
// surface form onto the cluster it belongs to.
//
// The `prefixes_map` the spec describes is exactly `FeatureProcessorBase`'s
// own interned table — interning a prefix via `base.lookup` reserves a
// `2w+1` band and returns its center, which is precisely the "next
// reserved band" formula in §4.7.

use crate::error::{Error, Result};
use crate::sentence::Sentence;
use crate::window::{self, FeatureProcessorBase};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct BrownClusters {
  pub base: FeatureProcessorBase,
  clusters: Vec<Vec<u32>>,
  cluster_ids: HashMap<String, usize>,
  map: HashMap<String, usize>,
}

impl BrownClusters {
  pub fn parse(window: u32, args: &[String], total_features: &mut u32) -> Result<Self> {
    let Some(path) = args.first() else {
      return Err(Error::ConfigArity {
        processor: "BrownClusters".to_string(),
        expected: "at least 1",
        got: args.len(),
      });
    };
    let prefix_lengths = args[1..]
      .iter()
      .map(|text| {
        text.parse::<usize>().map_err(|source| Error::BadInteger {
          processor: "BrownClusters".to_string(),
          argument: text.clone(),
          source,
        })
      })
      .collect::<Result<Vec<usize>>>()?;

    let mut processor = Self {
      base: FeatureProcessorBase::new(window),
      ..Default::default()
    };
    processor.load_cluster_file(Path::new(path), &prefix_lengths, total_features)?;
    Ok(processor)
  }

  fn load_cluster_file(
    &mut self,
    path: &Path,
    prefix_lengths: &[usize],
    total_features: &mut u32,
  ) -> Result<()> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
      path: path.to_path_buf(),
      source,
    })?;
    for (number, line) in BufReader::new(file).lines().enumerate() {
      let line = line.map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
      })?;
      if line.is_empty() {
        continue;
      }
      let Some((cluster_bits, form)) = line.split_once('\t') else {
        return Err(Error::FileFormat {
          path: path.to_path_buf(),
          line: number + 1,
          message: format!("expected <cluster_bits>\\t<form>, got {line:?}"),
        });
      };
      if self.map.contains_key(form) {
        return Err(Error::DuplicateKey {
          path: path.to_path_buf(),
          line: number + 1,
          key: form.to_string(),
        });
      }
      let cluster_id = match self.cluster_ids.get(cluster_bits) {
        Some(&id) => id,
        None => {
          let features = self.intern_prefixes(cluster_bits, prefix_lengths, total_features);
          let id = self.clusters.len();
          self.clusters.push(features);
          self.cluster_ids.insert(cluster_bits.to_string(), id);
          id
        }
      };
      self.map.insert(form.to_string(), cluster_id);
    }
    log::debug!(
      "loaded {} form(s) into {} cluster(s) from {}",
      self.map.len(),
      self.clusters.len(),
      path.display()
    );
    Ok(())
  }

  fn intern_prefixes(
    &mut self,
    cluster_bits: &str,
    prefix_lengths: &[usize],
    total_features: &mut u32,
  ) -> Vec<u32> {
    let mut features = Vec::new();
    features.push(self.base.lookup(cluster_bits, total_features));
    for &length in prefix_lengths {
      // Open question in spec §9: skip a requested length that doesn't
      // strictly shorten the cluster string; the implicit full-string
      // entry above already covers that case.
      if length < cluster_bits.len() {
        features.push(self.base.lookup(&cluster_bits[..length], total_features));
      }
    }
    features
  }

  pub fn save(&self, encoder: &mut crate::codec::Encoder<impl io::Write>) -> io::Result<()> {
    self.base.save(encoder)?;
    encoder.write_u32(self.clusters.len() as u32)?;
    for cluster in &self.clusters {
      encoder.write_u32(cluster.len() as u32)?;
      for &feature in cluster {
        encoder.write_u32(feature)?;
      }
    }
    encoder.write_u32(self.map.len() as u32)?;
    for (form, &cluster_id) in &self.map {
      encoder.write_string(form)?;
      encoder.write_u32(cluster_id as u32)?;
    }
    Ok(())
  }

  pub fn load(decoder: &mut crate::codec::Decoder<impl io::Read>) -> Result<Self> {
    let base = FeatureProcessorBase::load(decoder)?;
    let cluster_count = decoder.read_u32()?;
    let mut clusters = Vec::with_capacity(cluster_count as usize);
    for _ in 0..cluster_count {
      let feature_count = decoder.read_u32()?;
      let mut features = Vec::with_capacity(feature_count as usize);
      for _ in 0..feature_count {
        features.push(decoder.read_u32()?);
      }
      clusters.push(features);
    }
    let map_count = decoder.read_u32()?;
    let mut map = HashMap::with_capacity(map_count as usize);
    for _ in 0..map_count {
      let form = decoder.read_string()?;
      let cluster_id = decoder.read_u32()? as usize;
      map.insert(form, cluster_id);
    }
    Ok(Self {
      base,
      clusters,
      cluster_ids: HashMap::new(),
      map,
    })
  }

  pub fn process_sentence(&mut self, sentence: &mut Sentence, _total_features: &mut u32) {
    let w = self.base.window;
    for i in 0..sentence.size() {
      let Some(&cluster_id) = self.map.get(&sentence.words[i].raw_lemma) else {
        continue;
      };
      for &feature in &self.clusters[cluster_id] {
        window::emit_in_window(&mut sentence.features, i, feature, w);
      }
    }
  }
}
