use std::io::Read;

use crate::props::{PropError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic used by compressed documents.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
/// zstd level used when writing compressed documents.
pub const ZSTD_LEVEL: i32 = 3;

/// Compression mode of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
	/// Plain JSON text.
	#[default]
	None,
	/// zstd-compressed JSON.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

fn looks_like_json(raw: &[u8]) -> bool {
	raw.iter().find(|byte| !byte.is_ascii_whitespace()) == Some(&b'{')
}

/// Detect and decode compression, returning `(mode, json_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if looks_like_json(&raw) {
		return Ok((Compression::None, raw));
	}

	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}

	Err(PropError::UnknownMagic { magic: first4(&raw) })
}

/// Encode JSON bytes with `mode`.
pub fn encode_bytes(json: Vec<u8>, mode: Compression) -> Result<Vec<u8>> {
	match mode {
		Compression::None => Ok(json),
		Compression::Zstd => Ok(zstd::stream::encode_all(json.as_slice(), ZSTD_LEVEL)?),
	}
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(PropError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	if !looks_like_json(&out) {
		return Err(PropError::UnknownMagic { magic: first4(&out) });
	}

	Ok(out)
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}
