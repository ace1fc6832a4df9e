use regex::Regex;
use tracing::debug;

/// Flag characters accepted inside a `/body/flags` envelope.
const ENVELOPE_FLAGS: [char; 6] = ['g', 'i', 'm', 's', 'u', 'y'];

/// Compile a raw expression into a matcher.
///
/// Envelope forms keep their body untouched. A string that is not an
/// envelope, including one with an unknown flag character after the last
/// slash or a line break in the body, is escaped and matched literally.
/// Returns `None` for empty input, repeated envelope flags, and bodies the
/// regex engine rejects.
pub fn compile_expression(expression: &str) -> Option<Regex> {
	if expression.is_empty() {
		return None;
	}

	let pattern = match split_envelope(expression) {
		Some((body, flags)) => {
			let Some(inline) = inline_flag_group(flags) else {
				debug!(expression, "dropping expression with a repeated flag");
				return None;
			};
			format!("{inline}{body}")
		}
		None => regex::escape(expression),
	};

	match Regex::new(&pattern) {
		Ok(regex) => Some(regex),
		Err(error) => {
			debug!(expression, %error, "dropping expression that failed to compile");
			None
		}
	}
}

/// Split `/body/flags` into its parts.
///
/// The body runs to the last slash, so it may itself contain slashes, but
/// never a line break: an expression broken across lines is a literal.
/// Returns `None` when the expression is not an envelope, in which case the
/// caller treats the whole string as a literal.
pub(crate) fn split_envelope(expression: &str) -> Option<(&str, &str)> {
	let rest = expression.strip_prefix('/')?;
	let closing = rest.rfind('/')?;
	let (body, flags) = (&rest[..closing], &rest[closing + 1..]);

	if body.contains(['\n', '\r']) {
		return None;
	}

	if flags.chars().all(|flag| ENVELOPE_FLAGS.contains(&flag)) {
		Some((body, flags))
	} else {
		None
	}
}

/// Translate envelope flags into an inline `(?…)` group.
///
/// `i`, `m` and `s` have direct equivalents. Repeated matching (`g`) is how
/// every matcher is run, and `u`/`y` have no counterpart here, so all three
/// are accepted without effect. A repeated flag character invalidates the
/// whole expression.
fn inline_flag_group(flags: &str) -> Option<String> {
	let mut seen = [false; ENVELOPE_FLAGS.len()];
	let mut inline = String::new();

	for flag in flags.chars() {
		let slot = ENVELOPE_FLAGS.iter().position(|&known| known == flag)?;
		if seen[slot] {
			return None;
		}
		seen[slot] = true;

		if matches!(flag, 'i' | 'm' | 's') {
			inline.push(flag);
		}
	}

	if inline.is_empty() {
		Some(String::new())
	} else {
		Some(format!("(?{inline})"))
	}
}
