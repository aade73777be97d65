//! Capability support per backend variant.
//!
//! A single table decides what each variant can do, so callers never branch
//! on the variant themselves.

use crate::config::BackendKind;
use crate::types::Capability;

/// Support entry for one capability on one backend variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySupport {
    pub capability: Capability,
    pub direct: bool,
    pub managed: bool,
    /// Operator-facing caveat reported by model listings.
    pub notes: Option<&'static str>,
}

const VIDEO_NOTES: &str =
    "Video generation requires api.openai.com; Azure deployments do not support /videos.";

const SUPPORT_TABLE: [CapabilitySupport; 4] = [
    CapabilitySupport {
        capability: Capability::Chat,
        direct: true,
        managed: true,
        notes: None,
    },
    CapabilitySupport {
        capability: Capability::Image,
        direct: true,
        managed: true,
        notes: None,
    },
    CapabilitySupport {
        capability: Capability::Audio,
        direct: true,
        managed: true,
        notes: None,
    },
    CapabilitySupport {
        capability: Capability::Video,
        direct: true,
        managed: false,
        notes: Some(VIDEO_NOTES),
    },
];

pub fn capability_support(capability: Capability) -> CapabilitySupport {
    SUPPORT_TABLE
        .iter()
        .copied()
        .find(|entry| entry.capability == capability)
        .unwrap_or(CapabilitySupport {
            capability,
            direct: false,
            managed: false,
            notes: None,
        })
}

/// Whether `kind` can serve `capability`.
pub fn supports(kind: BackendKind, capability: Capability) -> bool {
    let entry = capability_support(capability);
    match kind {
        BackendKind::Direct => entry.direct,
        BackendKind::Managed => entry.managed,
    }
}
