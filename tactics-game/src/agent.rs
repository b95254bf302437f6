//! Agent drafts: the name, session kind, system prompt and (for soccer) the
//! tactical configuration submitted when an agent is created.
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::TacticalConfiguration;
use crate::constants::AGENT_NAME_MAX_CHARS;

/// The kinds of session an agent can be created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    Chat,
    Soccer,
    Trading,
}

impl SessionKind {
    pub const ALL: [Self; 3] = [Self::Chat, Self::Soccer, Self::Trading];

    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Chat => 1,
            Self::Soccer => 2,
            Self::Trading => 3,
        }
    }

    #[must_use]
    pub const fn session_type(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Soccer => "soccer",
            Self::Trading => "trading",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Soccer => "Soccer",
            Self::Trading => "Trading",
        }
    }

    /// Maximum system prompt length, in characters.
    #[must_use]
    pub const fn character_limit(self) -> usize {
        match self {
            Self::Chat => 1000,
            Self::Soccer => 2000,
            Self::Trading => 1500,
        }
    }

    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    #[must_use]
    pub fn from_session_type(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.session_type() == key)
    }

    #[must_use]
    pub const fn is_soccer(self) -> bool {
        matches!(self, Self::Soccer)
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Reasons an agent draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("agent name is required")]
    MissingName,
    #[error("agent name is {len} characters; the limit is {max}")]
    NameTooLong { len: usize, max: usize },
    #[error("system prompt is required")]
    MissingPrompt,
    #[error("system prompt is {len} characters; {session} allows {max}")]
    PromptTooLong {
        session: SessionKind,
        len: usize,
        max: usize,
    },
}

/// The record submitted for a validated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPayload {
    pub name: String,
    pub battle_type: String,
    pub session_type_id: u32,
    pub system_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soccer_config: Option<TacticalConfiguration>,
}

/// An agent being filled in by the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentDraft {
    pub name: String,
    pub system_prompt: String,
    session: SessionKind,
    soccer_config: TacticalConfiguration,
}

impl AgentDraft {
    #[must_use]
    pub fn new(session: SessionKind) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn session(&self) -> SessionKind {
        self.session
    }

    #[must_use]
    pub const fn soccer_config(&self) -> &TacticalConfiguration {
        &self.soccer_config
    }

    /// Replace the tactical configuration carried by a soccer draft.
    /// Ignored for other session kinds.
    pub fn set_soccer_config(&mut self, config: TacticalConfiguration) -> bool {
        if !self.session.is_soccer() {
            return false;
        }
        self.soccer_config = config;
        true
    }

    /// Switch to another session kind.
    ///
    /// Clears the name and prompt. Leaving soccer resets the tactical
    /// configuration to its defaults.
    pub fn select_session(&mut self, session: SessionKind) {
        self.name.clear();
        self.system_prompt.clear();
        self.session = session;
        if !session.is_soccer() {
            debug!("switched to {session}, tactics reset");
            self.soccer_config = TacticalConfiguration::default();
        }
    }

    /// Fill the system prompt from the session kind (and, for soccer, the
    /// current tactics).
    pub fn generate_prompt(&mut self) {
        let limit = self.session.character_limit();
        self.system_prompt = if self.session.is_soccer() {
            tactical_prompt(&self.soccer_config, limit)
        } else {
            generic_prompt(self.session, limit)
        };
    }

    /// Check the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: missing name, missing prompt, name
    /// too long, then prompt too long.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.system_prompt.is_empty() {
            return Err(DraftError::MissingPrompt);
        }
        let name_len = self.name.chars().count();
        if name_len > AGENT_NAME_MAX_CHARS {
            return Err(DraftError::NameTooLong {
                len: name_len,
                max: AGENT_NAME_MAX_CHARS,
            });
        }
        let prompt_len = self.system_prompt.chars().count();
        let max = self.session.character_limit();
        if prompt_len > max {
            return Err(DraftError::PromptTooLong {
                session: self.session,
                len: prompt_len,
                max,
            });
        }
        Ok(())
    }

    /// Validate and build the submission record.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::validate`].
    pub fn into_payload(self) -> Result<AgentPayload, DraftError> {
        self.validate()?;
        Ok(AgentPayload {
            battle_type: self.session.session_type().to_string(),
            session_type_id: self.session.id(),
            soccer_config: self.session.is_soccer().then_some(self.soccer_config),
            name: self.name,
            system_prompt: self.system_prompt,
        })
    }
}

/// System prompt describing the tactical setup, cut to `limit` characters.
#[must_use]
pub fn tactical_prompt(config: &TacticalConfiguration, limit: usize) -> String {
    let prompt = format!(
        "You are a tactical soccer agent with {} formation, playing with {} style at {} tempo. \
         Your mentality is {} with {} pressing intensity.",
        config.formation, config.style, config.tempo, config.mentality, config.pressing_intensity
    );
    truncate_chars(&prompt, limit)
}

/// System prompt for a non-soccer session, cut to `limit` characters.
#[must_use]
pub fn generic_prompt(session: SessionKind, limit: usize) -> String {
    let prompt = format!(
        "You are an AI agent specialized in {}. Provide helpful and accurate responses.",
        session.session_type()
    );
    truncate_chars(&prompt, limit)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
