// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scanning pipeline.
//
// Every technical error is mapped to plain English with a clear suggestion
// so the surrounding application can show something actionable instead of a
// geometry diagnostic.

use crate::error::ScanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Retaking the photo or picking another file is likely to succeed.
    Retakeable,
    /// The input itself is unusable — wrong file type, truncated upload.
    BadInput,
    /// Local system problem (disk full, permissions).
    System,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again with a different photo makes sense.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ScanError` into a `HumanError` suitable for end users.
pub fn humanize_error(err: &ScanError) -> HumanError {
    match err {
        ScanError::Decode(_) => HumanError {
            message: "We couldn't read that image.".into(),
            suggestion: "Make sure the file is a photo (JPEG or PNG) and try uploading it again."
                .into(),
            retriable: true,
            severity: Severity::BadInput,
        },

        ScanError::OutlineNotFound { .. } => HumanError {
            message: "We couldn't find the edges of your document.".into(),
            suggestion: "Place the document on a plain, contrasting background, make sure all four corners are in the frame, and retake the photo.".into(),
            retriable: true,
            severity: Severity::Retakeable,
        },

        ScanError::DegenerateGeometry { .. } => HumanError {
            message: "The document shape we found was too distorted to flatten.".into(),
            suggestion: "Hold the camera more directly above the page and retake the photo."
                .into(),
            retriable: true,
            severity: Severity::Retakeable,
        },

        ScanError::Encode(_) => HumanError {
            message: "We couldn't save the scanned result.".into(),
            suggestion: "Try again; if it keeps happening, the output format may not be supported on this device.".into(),
            retriable: true,
            severity: Severity::System,
        },

        ScanError::Io(_) => HumanError {
            message: "We couldn't read or write a file.".into(),
            suggestion: "Check that there is free disk space and that the app can access the folder.".into(),
            retriable: true,
            severity: Severity::System,
        },

        ScanError::Serialization(_) => HumanError {
            message: "The scanner settings file is damaged.".into(),
            suggestion: "Delete the settings file to restore the defaults.".into(),
            retriable: false,
            severity: Severity::System,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pipeline failure a user can cause maps to a retriable message.
    #[test]
    fn capture_failures_are_retriable() {
        let outline = ScanError::OutlineNotFound { candidates: 5 };
        let geometry = ScanError::DegenerateGeometry { width: 0, height: 42 };

        assert!(humanize_error(&outline).retriable);
        assert_eq!(humanize_error(&outline).severity, Severity::Retakeable);
        assert!(humanize_error(&geometry).retriable);
    }

    /// Decode failures point at the input, not the capture conditions.
    #[test]
    fn decode_failure_is_bad_input() {
        let err = ScanError::Decode("not an image".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::BadInput);
        assert!(!human.message.is_empty());
        assert!(!human.suggestion.is_empty());
    }
}
