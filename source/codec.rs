// Binary model layout (spec §6): little-endian, variable-length, with the
// processor registration order significant. Every length-prefixed field
// uses a 4-byte count; every feature id and every entity type id is a
// plain 4-byte little-endian integer.
//
// `load` assumes a trusted, well-formed file (spec §7): on corruption the
// decoder signals failure through its own contract rather than panicking.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;

pub struct Encoder<W> {
  writer: W,
}

impl<W: io::Write> Encoder<W> {
  pub fn new(writer: W) -> Self {
    Self { writer }
  }

  pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
    self.writer.write_u8(value)
  }

  pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
    self.writer.write_u32::<LittleEndian>(value)
  }

  pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
    self.writer.write_all(bytes)
  }

  pub fn write_string(&mut self, value: &str) -> io::Result<()> {
    self.write_u32(value.len() as u32)?;
    self.write_bytes(value.as_bytes())
  }
}

pub struct Decoder<R> {
  reader: R,
}

impl<R: io::Read> Decoder<R> {
  pub fn new(reader: R) -> Self {
    Self { reader }
  }

  fn truncated(context: &'static str) -> Error {
    Error::Truncated { context }
  }

  pub fn read_u8(&mut self) -> Result<u8> {
    self
      .reader
      .read_u8()
      .map_err(|_| Self::truncated("u8"))
  }

  pub fn read_u32(&mut self) -> Result<u32> {
    self
      .reader
      .read_u32::<LittleEndian>()
      .map_err(|_| Self::truncated("u32"))
  }

  pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    self
      .reader
      .read_exact(&mut buf)
      .map_err(|_| Self::truncated("bytes"))?;
    Ok(buf)
  }

  pub fn read_string(&mut self) -> Result<String> {
    let len = self.read_u32()? as usize;
    let bytes = self.read_bytes(len)?;
    String::from_utf8(bytes).map_err(|_| Self::truncated("utf8 string"))
  }
}
