use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::props::compression::{decode_bytes, encode_bytes};
use crate::props::{
	CodecOptions, Compression, Diagnostics, ObjectCatalog, ObjectId, ObjectNode, ObjectStore, PropError, PropertyObject, Result, Warning, load_object_props,
	save_object_props,
};

/// Document format version this build reads and writes.
pub const DOCUMENT_VERSION: u32 = 1;

/// Serialized form of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
	/// Format version.
	pub version: u32,
	/// Persisted objects in document order.
	#[serde(default)]
	pub objects: Vec<ObjectNode>,
}

/// Runtime options for reading and writing documents.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
	/// Compression applied when writing.
	pub compression: Compression,
	/// Indent written JSON.
	pub pretty: bool,
	/// Attribute codec settings.
	pub codec: CodecOptions,
}

impl Default for DocumentOptions {
	fn default() -> Self {
		Self {
			compression: Compression::None,
			pretty: true,
			codec: CodecOptions::default(),
		}
	}
}

impl DocumentOptions {
	/// Preset writing compact zstd-compressed JSON.
	pub fn compressed() -> Self {
		Self {
			compression: Compression::Zstd,
			pretty: false,
			..Self::default()
		}
	}
}

/// Ordered set of host objects backed by an object catalog.
pub struct Document {
	catalog: Arc<ObjectCatalog>,
	objects: Vec<Box<dyn PropertyObject>>,
	next_id: u32,
}

impl Document {
	/// Empty document.
	pub fn new(catalog: Arc<ObjectCatalog>) -> Self {
		Self {
			catalog,
			objects: Vec::new(),
			next_id: 1,
		}
	}

	/// Catalog used to create objects.
	pub fn catalog(&self) -> &ObjectCatalog {
		&self.catalog
	}

	/// Add a default-valued object of type `type_name`.
	pub fn create(&mut self, type_name: &str) -> Result<ObjectId> {
		let object = self.catalog.create(type_name, ObjectId(self.next_id))?;
		Ok(self.insert(object))
	}

	/// Add `object`, keeping its id.
	pub fn insert(&mut self, object: Box<dyn PropertyObject>) -> ObjectId {
		let id = object.id();
		self.next_id = self.next_id.max(id.0.saturating_add(1));
		self.objects.push(object);
		id
	}

	/// Object with `id`.
	pub fn get(&self, id: ObjectId) -> Option<&dyn PropertyObject> {
		self.objects.iter().find(|object| object.id() == id).map(|object| object.as_ref())
	}

	/// Mutable object with `id`.
	pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn PropertyObject> {
		self.objects
			.iter_mut()
			.find(|object| object.id() == id)
			.map(|object| object.as_mut() as &mut dyn PropertyObject)
	}

	/// Objects in document order.
	pub fn iter(&self) -> impl Iterator<Item = &dyn PropertyObject> {
		self.objects.iter().map(|object| object.as_ref())
	}

	/// Number of objects.
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// True when the document has no objects.
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// Persist every object.
	pub fn to_tree(&self, opts: &CodecOptions, diag: &mut Diagnostics) -> DocumentTree {
		let objects = self
			.objects
			.iter()
			.map(|object| {
				let mut node = ObjectNode::new(object.type_name(), object.id().0);
				save_object_props(object.as_ref(), &mut node, opts, diag);
				node
			})
			.collect();
		DocumentTree {
			version: DOCUMENT_VERSION,
			objects,
		}
	}

	/// Recreate objects from `tree`. Objects of unknown type, and objects
	/// reusing an id seen earlier, are skipped with a warning.
	pub fn from_tree(catalog: Arc<ObjectCatalog>, tree: &DocumentTree, opts: &CodecOptions, diag: &mut Diagnostics) -> Result<Self> {
		if tree.version != DOCUMENT_VERSION {
			return Err(PropError::UnsupportedVersion {
				version: tree.version,
				expected: DOCUMENT_VERSION,
			});
		}
		let mut document = Self::new(catalog);
		for node in &tree.objects {
			if document.get(ObjectId(node.id)).is_some() {
				diag.warn(Warning::DuplicateObjectId {
					id: node.id,
					type_name: node.type_name.clone(),
				});
				continue;
			}
			let mut object = match document.catalog.create(&node.type_name, ObjectId(node.id)) {
				Ok(object) => object,
				Err(PropError::UnknownObjectType { .. }) => {
					diag.warn(Warning::UnknownObjectType {
						id: node.id,
						type_name: node.type_name.clone(),
					});
					continue;
				}
				Err(err) => return Err(err),
			};
			load_object_props(object.as_mut(), node, opts, diag);
			document.insert(object);
		}
		Ok(document)
	}

	/// Encode the document as JSON, compressed per `opts`.
	pub fn to_bytes(&self, opts: &DocumentOptions, diag: &mut Diagnostics) -> Result<Vec<u8>> {
		let tree = self.to_tree(&opts.codec, diag);
		let json = if opts.pretty { serde_json::to_vec_pretty(&tree)? } else { serde_json::to_vec(&tree)? };
		encode_bytes(json, opts.compression)
	}

	/// Decode a document, detecting its compression.
	pub fn from_bytes(catalog: Arc<ObjectCatalog>, raw: Vec<u8>, opts: &DocumentOptions, diag: &mut Diagnostics) -> Result<(Self, Compression)> {
		let (compression, json) = decode_bytes(raw)?;
		let tree: DocumentTree = serde_json::from_slice(&json)?;
		Ok((Self::from_tree(catalog, &tree, &opts.codec, diag)?, compression))
	}

	/// Read a document from disk.
	pub fn open(catalog: Arc<ObjectCatalog>, path: impl AsRef<Path>, opts: &DocumentOptions, diag: &mut Diagnostics) -> Result<(Self, Compression)> {
		let raw = fs::read(path)?;
		Self::from_bytes(catalog, raw, opts, diag)
	}

	/// Write the document to disk.
	pub fn save(&self, path: impl AsRef<Path>, opts: &DocumentOptions, diag: &mut Diagnostics) -> Result<()> {
		let bytes = self.to_bytes(opts, diag)?;
		fs::write(path, bytes)?;
		Ok(())
	}
}

impl ObjectStore for Document {
	fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn PropertyObject> {
		self.get_mut(id)
	}
}
