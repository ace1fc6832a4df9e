use serde::Deserialize;
use serde::Serialize;

/// Readiness of the external item collection.
///
/// Only [`Available`](CollectionStatus::Available) collections take part in
/// matching; the other states turn the whole engine into a pass-through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
	/// The collection is still being fetched by the host.
	#[default]
	Loading,
	/// The collection failed to load or is not configured.
	Unavailable,
	/// The collection is ready and its items reflect the current contents.
	Available,
}

impl CollectionStatus {
	/// Returns true when items may be read and matched.
	pub fn is_available(self) -> bool {
		matches!(self, Self::Available)
	}
}

/// A borrowed view of the host's item collection.
///
/// Items are opaque to the engine; everything it needs from them comes
/// through the pattern and content accessors supplied per update.
#[derive(Debug, Clone, Copy)]
pub struct ItemCollection<'a, I> {
	pub status: CollectionStatus,
	pub items: &'a [I],
}

impl<'a, I> ItemCollection<'a, I> {
	/// An available collection wrapping `items`.
	pub fn available(items: &'a [I]) -> Self {
		Self {
			status: CollectionStatus::Available,
			items,
		}
	}

	/// A collection that is still loading; carries no items.
	pub fn loading() -> Self {
		Self {
			status: CollectionStatus::Loading,
			items: &[],
		}
	}

	/// A collection that failed to load; carries no items.
	pub fn unavailable() -> Self {
		Self {
			status: CollectionStatus::Unavailable,
			items: &[],
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// The item at `index`, when the collection is available and the index
	/// is in range.
	pub fn get(&self, index: usize) -> Option<&'a I> {
		if self.status.is_available() {
			self.items.get(index)
		} else {
			None
		}
	}
}
