//! The attribute policy: which tags are eligible for rewriting, and which
//! of their attributes may be touched.
//!
//! The allow table is fixed at compile time; exclusions come from the
//! caller and always win over the table. Tags outside the table are never
//! visited at all, so the policy is only ever consulted for the five known
//! tags.

/// A markup tag eligible for placeholder rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTag {
	/// `a`: links.
	Anchor,
	/// `img`: images.
	Image,
	/// `video`: video players.
	Video,
	/// `audio`: audio players.
	Audio,
	/// `source`: media source elements.
	Source,
}

impl TargetTag {
	/// Resolves a tag name against the fixed tag table, case-insensitively.
	pub fn from_name(name: &str) -> Option<Self> {
		match name.to_ascii_lowercase().as_str() {
			"a" => Some(Self::Anchor),
			"img" => Some(Self::Image),
			"video" => Some(Self::Video),
			"audio" => Some(Self::Audio),
			"source" => Some(Self::Source),
			_ => None,
		}
	}

	/// The canonical lowercase name of this tag.
	pub fn name(self) -> &'static str {
		match self {
			Self::Anchor => "a",
			Self::Image => "img",
			Self::Video => "video",
			Self::Audio => "audio",
			Self::Source => "source",
		}
	}

	/// The attributes eligible for rewriting on this tag.
	///
	/// `children` on the anchor tag is special: it governs the anchor's
	/// inner text content, which is structurally a child slot rather than
	/// an attribute.
	pub fn allowed(self) -> AllowSpec {
		match self {
			Self::Anchor => AllowSpec::Set(&["children", "href", "title"]),
			Self::Image => AllowSpec::Set(&["alt", "src", "title"]),
			Self::Video | Self::Audio => AllowSpec::Set(&["src", "title"]),
			Self::Source => AllowSpec::Single("src"),
		}
	}
}

/// The allow-list shape for a tag's attributes. Not user-configurable.
#[derive(Debug, Clone, Copy)]
pub enum AllowSpec {
	/// A single allowed attribute name.
	Single(&'static str),
	/// A set of allowed attribute names.
	Set(&'static [&'static str]),
	/// Every attribute on the tag is allowed.
	All,
}

/// A caller-supplied exclusion for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeSpec {
	/// Suppress a single attribute name.
	Single(String),
	/// Suppress a set of attribute names.
	Set(Vec<String>),
	/// Suppress the tag entirely.
	All,
}

/// Decides whether an attribute may be rewritten for a tag.
///
/// Exclusion wins over the allow-list: an attribute excluded for a tag is
/// never rewritten even when nominally allowed. Name comparison is
/// ASCII-case-insensitive.
pub fn is_selected(name: &str, allowed: AllowSpec, excluded: Option<&ExcludeSpec>) -> bool {
	match excluded {
		Some(ExcludeSpec::All) => return false,
		Some(ExcludeSpec::Single(suppressed)) if suppressed.eq_ignore_ascii_case(name) => {
			return false;
		}
		Some(ExcludeSpec::Set(suppressed))
			if suppressed.iter().any(|entry| entry.eq_ignore_ascii_case(name)) =>
		{
			return false;
		}
		_ => {}
	}

	match allowed {
		AllowSpec::All => true,
		AllowSpec::Single(allowed) => allowed.eq_ignore_ascii_case(name),
		AllowSpec::Set(allowed) => allowed.iter().any(|entry| entry.eq_ignore_ascii_case(name)),
	}
}
