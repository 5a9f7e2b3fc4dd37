//! Session state for the portal: which section is chosen, the password being typed,
//! and whether the section's links are unlocked.

pub mod catalog;
pub mod secrets;

use thiserror::Error;

pub use catalog::{LinkColor, LinkItem};

/// Message shown after a wrong password
pub const MISMATCH_MESSAGE: &str = "Kata sandi salah. Silakan coba lagi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    HeadOffice, // HO
    Factory,    // PKS, palm oil mill
}

impl Section {
    pub const ALL: [Section; 2] = [Section::HeadOffice, Section::Factory];

    /// Short code used in titles ("Access HO", "PKS Links")
    pub fn code(self) -> &'static str {
        match self {
            Section::HeadOffice => "HO",
            Section::Factory => "PKS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::HeadOffice => "Head Office",
            Section::Factory => "Pabrik Kelapa Sawit",
        }
    }

    /// Parse a section code, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    Login,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("Kata sandi salah. Silakan coba lagi.")]
    CredentialMismatch,
    #[error("No section selected")]
    NoSectionSelected,
}

/// The portal controller. One instance per session, owned by the app and lent to the UI.
#[derive(Debug, Default)]
pub struct Portal {
    section: Option<Section>,
    credential: String,
    authorized: bool,
    error: Option<String>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        match (self.section, self.is_authorized()) {
            (None, _) => View::Menu,
            (Some(_), false) => View::Login,
            (Some(_), true) => View::Unlocked,
        }
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Choose a section. Always lands on its login form, even when re-selecting the
    /// section that is already unlocked.
    pub fn select_section(&mut self, section: Section) {
        self.section = Some(section);
        self.authorized = false;
        self.credential.clear();
        self.error = None;
        tracing::debug!("Section selected: {}", section.code());
    }

    /// Check `value` against the current section's secret.
    /// On mismatch the typed draft is left in place for correction.
    pub fn submit_credential(&mut self, value: &str) -> Result<(), PortalError> {
        let section = self.section.ok_or(PortalError::NoSectionSelected)?;

        if secrets::matches(section, value) {
            self.authorized = true;
            self.error = None;
            self.credential.clear();
            tracing::info!("Access granted for {}", section.code());
            Ok(())
        } else {
            self.authorized = false;
            self.error = Some(MISMATCH_MESSAGE.to_string());
            tracing::info!("Access denied for {}", section.code());
            Err(PortalError::CredentialMismatch)
        }
    }

    /// Submit whatever is currently typed (the form's submit action)
    pub fn submit(&mut self) -> Result<(), PortalError> {
        let draft = std::mem::take(&mut self.credential);
        let result = self.submit_credential(&draft);
        if result.is_err() {
            self.credential = draft;
        }
        result
    }

    /// Back to the section menu with everything cleared
    pub fn reset(&mut self) {
        self.section = None;
        self.authorized = false;
        self.credential.clear();
        self.error = None;
    }

    /// Replace the password draft. Only meaningful on the login form.
    pub fn update_credential_draft(&mut self, value: impl Into<String>) {
        if self.view() == View::Login {
            self.credential = value.into();
        }
    }

    /// Links visible right now: the section's catalog once unlocked, nothing otherwise
    pub fn links(&self) -> &'static [LinkItem] {
        match (self.section, self.is_authorized()) {
            (Some(section), true) => catalog::links_for(section),
            _ => &[],
        }
    }
}
