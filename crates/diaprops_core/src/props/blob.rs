//! Streaming base64 codec for embedded image data.
//!
//! Input arrives in chunks of arbitrary size; both directions carry the
//! bytes (or characters) that do not yet form a full base64 group over to
//! the next chunk so the output equals one-shot encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Incremental base64 encoder.
#[derive(Debug, Default)]
pub struct ChunkedEncoder {
	carry: Vec<u8>,
	out: String,
}

impl ChunkedEncoder {
	/// Empty encoder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Feed the next chunk of raw bytes.
	pub fn push(&mut self, chunk: &[u8]) {
		self.carry.extend_from_slice(chunk);
		let whole = self.carry.len() - self.carry.len() % 3;
		if whole > 0 {
			STANDARD.encode_string(&self.carry[..whole], &mut self.out);
			self.carry.drain(..whole);
		}
	}

	/// Encode the remaining bytes (with padding) and return the text.
	pub fn finish(mut self) -> String {
		if !self.carry.is_empty() {
			STANDARD.encode_string(&self.carry, &mut self.out);
		}
		self.out
	}
}

/// Incremental base64 decoder; whitespace between chunks is ignored.
#[derive(Debug, Default)]
pub struct ChunkedDecoder {
	carry: Vec<u8>,
	out: Vec<u8>,
}

impl ChunkedDecoder {
	/// Empty decoder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Feed the next chunk of base64 text. Non-ASCII bytes fail decoding.
	pub fn push(&mut self, chunk: &[u8]) -> Result<(), base64::DecodeError> {
		self.carry.extend(chunk.iter().copied().filter(|byte| !byte.is_ascii_whitespace()));
		let whole = self.carry.len() - self.carry.len() % 4;
		if whole > 0 {
			STANDARD.decode_vec(&self.carry[..whole], &mut self.out)?;
			self.carry.drain(..whole);
		}
		Ok(())
	}

	/// Decode what is left and return the bytes.
	pub fn finish(mut self) -> Result<Vec<u8>, base64::DecodeError> {
		if !self.carry.is_empty() {
			STANDARD.decode_vec(&self.carry, &mut self.out)?;
		}
		Ok(self.out)
	}
}

/// Encode `bytes`, feeding the encoder `chunk_size` bytes at a time.
pub fn encode_chunked(bytes: &[u8], chunk_size: usize) -> String {
	let mut encoder = ChunkedEncoder::new();
	for chunk in bytes.chunks(chunk_size.max(1)) {
		encoder.push(chunk);
	}
	encoder.finish()
}

/// Decode `text`, feeding the decoder `chunk_size` bytes at a time.
pub fn decode_chunked(text: &str, chunk_size: usize) -> Result<Vec<u8>, base64::DecodeError> {
	let mut decoder = ChunkedDecoder::new();
	for chunk in text.as_bytes().chunks(chunk_size.max(1)) {
		decoder.push(chunk)?;
	}
	decoder.finish()
}
