use std::fmt::Display;

use tracing::debug;

use crate::ItemCollection;
use crate::MarkerRef;
use crate::RenderedHtml;

/// Externally produced content bound to one marker's live position.
///
/// The whole list is rebuilt on every reconciliation pass; attachments are
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment<C> {
	/// Collection index the marker carried.
	pub item_index: usize,
	/// Byte offset in the rendered output where the content is inserted,
	/// immediately inside the marker's open tag.
	pub insert_at: usize,
	/// The content fragment.
	pub content: C,
}

/// Resolve every discovered marker against the collection, in document
/// order.
///
/// Failures never escape: a marker with a non-integer index, an item missing
/// at that index, a failing accessor, or an empty content result all leave
/// that marker visually empty and move on to the next one.
pub fn reconcile<I, C, E>(
	markers: &[MarkerRef],
	collection: &ItemCollection<'_, I>,
	mut content_of: impl FnMut(&I) -> Result<Option<C>, E>,
) -> Vec<Attachment<C>>
where
	E: Display,
{
	let mut attachments = Vec::new();

	for marker in markers {
		let Ok(item_index) = marker.index_value.trim().parse::<usize>() else {
			debug!(value = %marker.index_value, "skipping marker with a non-integer index");
			continue;
		};

		let Some(item) = collection.get(item_index) else {
			debug!(item_index, "skipping marker with no item at its index");
			continue;
		};

		match content_of(item) {
			Ok(Some(content)) => {
				attachments.push(Attachment {
					item_index,
					insert_at: marker.insert_at,
					content,
				});
			}
			Ok(None) => {}
			Err(error) => {
				debug!(item_index, %error, "content accessor failed; leaving marker empty");
			}
		}
	}

	attachments
}

/// Produce the final markup with every attachment's content spliced into
/// its marker element.
///
/// Offsets must come from the rendered output passed here; attachments out
/// of ascending order or past the end of the markup are skipped.
pub fn apply_attachments<C>(html: &RenderedHtml, attachments: &[Attachment<C>]) -> String
where
	C: AsRef<str>,
{
	let html = html.as_str();
	let mut result = String::with_capacity(html.len() + attachments.len() * 32);
	let mut cursor = 0;

	for attachment in attachments {
		if attachment.insert_at < cursor || attachment.insert_at > html.len() {
			continue;
		}
		result.push_str(&html[cursor..attachment.insert_at]);
		result.push_str(attachment.content.as_ref());
		cursor = attachment.insert_at;
	}
	result.push_str(&html[cursor..]);

	result
}
