use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::portal::{LinkItem, Portal, PortalError, Section, View};

/// Status messages clear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    /// Session state; the UI reads it through `&App`
    pub portal: Portal,
    pub popup: Popup,

    // Cursors
    pub selected_section: usize,
    pub selected_link: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            portal: Portal::new(),
            popup: Popup::None,
            selected_section: 0,
            selected_link: 0,
            status_message: None,
            status_message_time: None,
            config,
        }
    }

    pub fn view(&self) -> View {
        self.portal.view()
    }

    /// Whether a bare `q` quits; on the login form it is part of the password
    pub fn accepts_quit_key(&self) -> bool {
        self.popup == Popup::None && self.view() != View::Login
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Report a config file that could not be used; defaults are in effect
    pub fn report_config_warning(&mut self, warning: &str) {
        tracing::warn!("{}; using defaults", warning);
        self.set_status(format!("{}; using defaults", warning));
    }

    /// Jump straight to a section's login form
    pub fn select_section(&mut self, section: Section) {
        self.portal.select_section(section);
        if let Some(idx) = Section::ALL.iter().position(|s| *s == section) {
            self.selected_section = idx;
        }
        self.selected_link = 0;
    }

    pub fn selected_link(&self) -> Option<&'static LinkItem> {
        self.portal.links().get(self.selected_link)
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q') | KeyCode::F(1)) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match self.view() {
            View::Menu => self.handle_menu_key(key),
            View::Login => self.handle_login_key(key),
            View::Unlocked => self.handle_links_key(key).await,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = Section::ALL.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.selected_section = (self.selected_section + 1) % count;
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.selected_section = self.selected_section.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(&section) = Section::ALL.get(self.selected_section) {
                    self.select_section(section);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&section) = Section::ALL.get(idx) {
                    self.select_section(section);
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.portal.reset(),
            KeyCode::Enter => match self.portal.submit() {
                Ok(()) => {
                    self.selected_link = 0;
                    self.status_message = None;
                }
                // Shown by the login form's error banner
                Err(PortalError::CredentialMismatch) => {}
                Err(e) => return Err(e.into()),
            },
            KeyCode::Backspace => {
                let mut draft = self.portal.credential().to_string();
                draft.pop();
                self.portal.update_credential_draft(draft);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.portal.update_credential_draft(String::new());
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut draft = self.portal.credential().to_string();
                draft.push(c);
                self.portal.update_credential_draft(draft);
            }
            KeyCode::F(1) => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    async fn handle_links_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.portal.links().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                if count > 0 {
                    self.selected_link = (self.selected_link + 1) % count;
                }
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                if count > 0 {
                    self.selected_link = self.selected_link.checked_sub(1).unwrap_or(count - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char(' ') => {
                if let Some(link) = self.selected_link() {
                    self.open_link(link).await?;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < count {
                    self.selected_link = idx;
                    if let Some(link) = self.selected_link() {
                        self.open_link(link).await?;
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                self.portal.reset();
                self.status_message = None;
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    /// Open a catalog entry outside the app. Nothing comes back from the destination.
    async fn open_link(&mut self, link: &'static LinkItem) -> Result<()> {
        tracing::info!("Opening {} ({})", link.name, link.organization);
        match crate::launcher::open_url(link.url, self.config.opener.as_ref()).await {
            Ok(()) => self.set_status(format!("Opened {}", link.name)),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", link.name, e);
                self.set_status(format!("Could not open {}: {}", link.name, e));
            }
        }
        Ok(())
    }

    /// Periodic housekeeping: expire the status message
    pub fn tick(&mut self) {
        if let Some(at) = self.status_message_time {
            if at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Opener;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn test_app() -> App {
        App::new(AppConfig {
            opener: Some(Opener::Command("true".to_string())),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_menu_navigation_and_select() {
        let mut app = test_app();
        assert_eq!(app.view(), View::Menu);

        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.selected_section, 1);
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.selected_section, 0);
        app.handle_key(key(KeyCode::Up)).await.unwrap();
        assert_eq!(app.selected_section, 1);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view(), View::Login);
        assert_eq!(app.portal.section(), Some(Section::Factory));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
        assert_eq!(app.portal.section(), Some(Section::HeadOffice));

        type_str(&mut app, "wrong").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view(), View::Login);
        assert_eq!(app.portal.error(), Some(crate::portal::MISMATCH_MESSAGE));
        assert_eq!(app.portal.credential(), "wrong");

        app.handle_key(ctrl('u')).await.unwrap();
        assert_eq!(app.portal.credential(), "");

        type_str(&mut app, "HO1234").await;
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view(), View::Unlocked);
        assert_eq!(app.portal.error(), None);
    }

    #[tokio::test]
    async fn test_q_is_typed_on_login_form() {
        let mut app = test_app();
        assert!(app.accepts_quit_key());

        app.select_section(Section::Factory);
        assert!(!app.accepts_quit_key());
        type_str(&mut app, "q?").await;
        assert_eq!(app.portal.credential(), "q?");
        assert_eq!(app.popup, Popup::None);
    }

    #[tokio::test]
    async fn test_escape_returns_to_menu() {
        let mut app = test_app();
        app.select_section(Section::HeadOffice);
        type_str(&mut app, "abc").await;
        app.handle_key(key(KeyCode::Esc)).await.unwrap();

        assert_eq!(app.view(), View::Menu);
        assert_eq!(app.portal.credential(), "");
    }

    #[tokio::test]
    async fn test_link_cursor_wraps_and_back_resets() {
        let mut app = test_app();
        app.select_section(Section::HeadOffice);
        type_str(&mut app, "HO123").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        app.handle_key(key(KeyCode::Up)).await.unwrap();
        assert_eq!(app.selected_link, 2);
        assert_eq!(app.selected_link().map(|l| l.name), Some("MOB HO ASL"));
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.selected_link, 0);

        app.handle_key(key(KeyCode::Char('b'))).await.unwrap();
        assert_eq!(app.view(), View::Menu);
        assert!(!app.portal.is_authorized());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_link_reports_status() {
        let mut app = test_app();
        app.select_section(Section::Factory);
        type_str(&mut app, "PKS123").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        assert_eq!(app.selected_link, 1);
        assert_eq!(app.status_message.as_deref(), Some("Opened MOB PKS APO"));
        // Opening a link leaves the session untouched
        assert_eq!(app.view(), View::Unlocked);

        app.config.opener = Some(Opener::Command("false".to_string()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Could not open MOB PKS APO"));
    }

    #[tokio::test]
    async fn test_help_popup() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('?'))).await.unwrap();
        assert_eq!(app.popup, Popup::Help);
        assert!(!app.accepts_quit_key());

        // Keys don't reach the portal while the popup is open
        app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
        assert_eq!(app.view(), View::Menu);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_config_warning_reaches_status_line() {
        let mut app = test_app();
        app.report_config_warning("Failed to parse config /tmp/config.toml: expected a value");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Failed to parse config /tmp/config.toml: expected a value; using defaults")
        );
    }

    #[test]
    fn test_status_expires() {
        let mut app = test_app();
        app.set_status("hello");
        app.tick();
        assert!(app.status_message.is_some());

        app.status_message_time = Some(Instant::now() - STATUS_TIMEOUT);
        app.tick();
        assert!(app.status_message.is_none());
    }
}
