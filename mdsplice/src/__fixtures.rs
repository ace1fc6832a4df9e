use serde::Deserialize;

/// A host item as the update tests use it: an optional expression plus the
/// content its accessor hands back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SourceItem {
	pub id: String,
	pub pattern: Option<String>,
	pub content: Option<String>,
	#[serde(default)]
	pub failing: bool,
}

impl SourceItem {
	pub fn new(id: &str, pattern: &str, content: &str) -> Self {
		Self {
			id: id.to_string(),
			pattern: Some(pattern.to_string()),
			content: Some(content.to_string()),
			failing: false,
		}
	}

	pub fn without_pattern(id: &str) -> Self {
		Self {
			id: id.to_string(),
			pattern: None,
			content: None,
			failing: false,
		}
	}

	pub fn failing(id: &str, pattern: &str) -> Self {
		Self {
			id: id.to_string(),
			pattern: Some(pattern.to_string()),
			content: Some("unreachable".to_string()),
			failing: true,
		}
	}
}

/// Pattern accessor for [`SourceItem`] fixtures.
pub fn pattern_of(item: &SourceItem) -> Option<String> {
	item.pattern.clone()
}

/// Content accessor for [`SourceItem`] fixtures; items marked `failing`
/// make it fail the way a host accessor can.
pub fn content_of(item: &SourceItem) -> Result<Option<String>, String> {
	if item.failing {
		return Err(format!("accessor failure for `{}`", item.id));
	}

	Ok(item.content.clone())
}

/// The two-citation fixture used by the scenario tests.
pub fn citation_items() -> Vec<SourceItem> {
	vec![
		SourceItem::new("knuth", "CITE1", "<cite>Knuth 1997</cite>"),
		SourceItem::new("ritchie", "CITE2", "<cite>Ritchie 1978</cite>"),
	]
}

/// Items parsed from JSON, as hosts deliver them.
pub fn items_from_json(json: &str) -> Vec<SourceItem> {
	serde_json::from_str(json).unwrap()
}
