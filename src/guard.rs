//! Unsaved-changes guard.
//!
//! Dirtiness is never tracked with a flag. Every check fingerprints the live
//! buffer text and compares it against the fingerprint stored at the last
//! load or save, so the answer can never drift out of sync with the text.

use std::fmt;

use sha2::{Digest, Sha256};

/// Fixed-size digest of buffer text, compared for equality only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in &self.0[..6] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}

/// Fingerprint the UTF-8 bytes of `text`.
pub fn fingerprint(text: &str) -> Fingerprint {
    let digest = Sha256::digest(text.as_bytes());
    Fingerprint(digest.into())
}

/// Whether `current_text` differs from the text that produced `stored`.
pub fn has_unsaved_changes(current_text: &str, stored: &Fingerprint) -> bool {
    fingerprint(current_text) != *stored
}

/// An action that discards the in-memory buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestructiveAction {
    /// Replace the buffer with another file.
    OpenFile,
    /// Exit the editor.
    Close,
}

impl DestructiveAction {
    pub const fn prompt_title(self) -> &'static str {
        match self {
            Self::OpenFile => "Overwrite data?",
            Self::Close => "Attention",
        }
    }

    pub const fn prompt_message(self) -> &'static str {
        match self {
            Self::OpenFile => "Your data will be overwritten, would you like to continue?",
            Self::Close => "Close without saving changes?",
        }
    }
}

/// A pending yes/cancel question shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub action: DestructiveAction,
    pub title: &'static str,
    pub message: &'static str,
}

impl ConfirmPrompt {
    pub const fn for_action(action: DestructiveAction) -> Self {
        Self {
            action,
            title: action.prompt_title(),
            message: action.prompt_message(),
        }
    }
}

/// Outcome of consulting the guard before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Nothing would be lost; perform the action now.
    Proceed,
    /// Ask the user first; perform the action only on a yes.
    Confirm(ConfirmPrompt),
}

/// Decide whether `action` may run without asking.
pub fn check(action: DestructiveAction, current_text: &str, stored: &Fingerprint) -> GuardDecision {
    if has_unsaved_changes(current_text, stored) {
        GuardDecision::Confirm(ConfirmPrompt::for_action(action))
    } else {
        GuardDecision::Proceed
    }
}
