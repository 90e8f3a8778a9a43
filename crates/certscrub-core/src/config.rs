// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output settings — which redactions and overlays a render performs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CertScrubError, Result};

/// Selects the operations applied to the certificate page.
///
/// An insertion is only meaningful over a blanked region, so
/// `insert_photo` implies `redact_photo` and `insert_name` implies
/// `redact_name`. The constructor and deserialisation both reject settings
/// that break this; the `with_*` builders enable the matching redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOutputSettings")]
pub struct OutputSettings {
    redact_photo: bool,
    redact_name: bool,
    insert_photo: bool,
    insert_name: bool,
}

/// Unvalidated shape used for deserialisation.
#[derive(Deserialize)]
struct RawOutputSettings {
    #[serde(default = "enabled")]
    redact_photo: bool,
    #[serde(default = "enabled")]
    redact_name: bool,
    #[serde(default)]
    insert_photo: bool,
    #[serde(default)]
    insert_name: bool,
}

fn enabled() -> bool {
    true
}

impl TryFrom<RawOutputSettings> for OutputSettings {
    type Error = CertScrubError;

    fn try_from(raw: RawOutputSettings) -> Result<Self> {
        Self::new(
            raw.redact_photo,
            raw.redact_name,
            raw.insert_photo,
            raw.insert_name,
        )
    }
}

impl OutputSettings {
    /// Build settings, rejecting an insertion without its redaction.
    pub fn new(
        redact_photo: bool,
        redact_name: bool,
        insert_photo: bool,
        insert_name: bool,
    ) -> Result<Self> {
        if insert_photo && !redact_photo {
            return Err(CertScrubError::InvalidSettings(
                "insert_photo requires redact_photo".into(),
            ));
        }
        if insert_name && !redact_name {
            return Err(CertScrubError::InvalidSettings(
                "insert_name requires redact_name".into(),
            ));
        }
        Ok(Self {
            redact_photo,
            redact_name,
            insert_photo,
            insert_name,
        })
    }

    /// Leave the page untouched apart from re-serialisation.
    pub fn passthrough() -> Self {
        Self {
            redact_photo: false,
            redact_name: false,
            insert_photo: false,
            insert_name: false,
        }
    }

    /// Blank and replace both regions.
    pub fn replace_all() -> Self {
        Self {
            redact_photo: true,
            redact_name: true,
            insert_photo: true,
            insert_name: true,
        }
    }

    /// Enable photo insertion (and therefore photo redaction).
    pub fn with_photo_insert(mut self) -> Self {
        self.redact_photo = true;
        self.insert_photo = true;
        self
    }

    /// Enable name insertion (and therefore name redaction).
    pub fn with_name_insert(mut self) -> Self {
        self.redact_name = true;
        self.insert_name = true;
        self
    }

    /// Keep the original photo (also drops photo insertion).
    pub fn without_photo_redaction(mut self) -> Self {
        self.redact_photo = false;
        self.insert_photo = false;
        self
    }

    /// Keep the original name (also drops name insertion).
    pub fn without_name_redaction(mut self) -> Self {
        self.redact_name = false;
        self.insert_name = false;
        self
    }

    pub fn redact_photo(&self) -> bool {
        self.redact_photo
    }

    pub fn redact_name(&self) -> bool {
        self.redact_name
    }

    pub fn insert_photo(&self) -> bool {
        self.insert_photo
    }

    pub fn insert_name(&self) -> bool {
        self.insert_name
    }

    /// Parse settings from a JSON document. Missing redaction keys default to
    /// `true`, missing insertion keys to `false`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

impl Default for OutputSettings {
    /// Redact-only posture: both regions blanked, nothing inserted.
    fn default() -> Self {
        Self {
            redact_photo: true,
            redact_name: true,
            insert_photo: false,
            insert_name: false,
        }
    }
}
