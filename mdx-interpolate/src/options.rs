//! Caller-supplied settings for a single interpolation invocation.

use crate::policy::{ExcludeSpec, TargetTag};

/// Options accepted once per compiler-stage registration.
///
/// The defaults exclude nothing and leave the pass enabled.
#[derive(Debug, Clone, Default)]
pub struct InterpolateOptions {
	/// Per-tag attribute exclusions; exclusion wins over the fixed
	/// allow table.
	pub exclude: ExcludeMap,
	/// Bypass all processing for this document compile. Set this when the
	/// source format makes interpolation meaningless.
	pub disable: bool,
}

/// Per-tag exclude specifications, one optional entry per target tag.
#[derive(Debug, Clone, Default)]
pub struct ExcludeMap {
	/// Exclusion for the link tag.
	pub a: Option<ExcludeSpec>,
	/// Exclusion for the image tag.
	pub img: Option<ExcludeSpec>,
	/// Exclusion for the video tag.
	pub video: Option<ExcludeSpec>,
	/// Exclusion for the audio tag.
	pub audio: Option<ExcludeSpec>,
	/// Exclusion for the source tag.
	pub source: Option<ExcludeSpec>,
}

impl ExcludeMap {
	/// Looks up the exclusion configured for one tag.
	pub fn for_tag(&self, tag: TargetTag) -> Option<&ExcludeSpec> {
		match tag {
			TargetTag::Anchor => self.a.as_ref(),
			TargetTag::Image => self.img.as_ref(),
			TargetTag::Video => self.video.as_ref(),
			TargetTag::Audio => self.audio.as_ref(),
			TargetTag::Source => self.source.as_ref(),
		}
	}

	/// Replaces the exclusion for one tag.
	pub fn set(&mut self, tag: TargetTag, spec: ExcludeSpec) {
		let slot = match tag {
			TargetTag::Anchor => &mut self.a,
			TargetTag::Image => &mut self.img,
			TargetTag::Video => &mut self.video,
			TargetTag::Audio => &mut self.audio,
			TargetTag::Source => &mut self.source,
		};
		*slot = Some(spec);
	}
}
