use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use crate::CollectionStatus;
use crate::MarkerConfig;

/// Signature over the collection alone: status, items (with their length)
/// and the current pattern strings.
///
/// `patterns` is `None` when the collection is not available and its
/// accessors must not be consulted.
pub fn collection_signature<I: Hash>(
	status: CollectionStatus,
	items: &[I],
	patterns: Option<&[Option<String>]>,
) -> u64 {
	let mut hasher = DefaultHasher::new();
	hash_collection(&mut hasher, status, items, patterns);
	hasher.finish()
}

/// Signature over every input that triggers a re-run when it changes: the
/// source text, the sanitize flag, the marker wiring, and the collection
/// inputs of [`collection_signature`].
///
/// The hash covers item values, not identities, so a collection that
/// mutates items in place still moves the signature.
pub fn input_signature<I: Hash>(
	text: &str,
	sanitize: bool,
	marker: &MarkerConfig,
	status: CollectionStatus,
	items: &[I],
	patterns: Option<&[Option<String>]>,
) -> u64 {
	let mut hasher = DefaultHasher::new();
	text.hash(&mut hasher);
	sanitize.hash(&mut hasher);
	marker.hash(&mut hasher);
	hash_collection(&mut hasher, status, items, patterns);
	hasher.finish()
}

fn hash_collection<H, I>(
	hasher: &mut H,
	status: CollectionStatus,
	items: &[I],
	patterns: Option<&[Option<String>]>,
) where
	H: Hasher,
	I: Hash,
{
	status.hash(hasher);
	items.hash(hasher);
	patterns.hash(hasher);
}
