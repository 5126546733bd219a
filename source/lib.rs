//! Feature-extraction layer of a named-entity recognizer: a sealed
//! registry of feature processors that turn a tokenized, morphologically
//! annotated sentence into sparse integer features, plus a binary model
//! format for training those processors once and replaying them at
//! inference. The tokenizer, morphological analyzer, statistical
//! classifier, BILOU decoder, and the top-level model CLI are all
//! external collaborators; this crate only produces and consumes the
//! feature ids, the entity-type table, and the two post-processing
//! passes (`URLEmailDetector`, `CzechAddContainers`) the classifier
//! relies on.

pub mod codec;
pub mod config;
pub mod entity_types;
pub mod error;
pub mod pipeline;
pub mod processors;
pub mod sentence;
pub mod window;

pub use entity_types::{EntityType, EntityTypeTable};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use processors::Processor;
pub use sentence::{
  Bilou, BilouLabel, LocalBilouSlot, NamedEntity, PreviousStage, Probabilities, Sentence, Word,
};
pub use window::{emit, emit_forward_window, emit_in_window, emit_outer_window, emit_range, UNKNOWN};
