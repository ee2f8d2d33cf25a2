//! Brand workflow session
//!
//! Holds everything the user has entered and generated so far. The REPL owns
//! the only instance; network work runs elsewhere and reports back through
//! [`WorkflowEvent`]s tagged with the epoch they were started in.

use std::{collections::BTreeSet, fmt, str::FromStr};

use models::{
    BrandData, GenerateLogoRequest, GenerateLogoResponse, GeneratedLogo, ParseToneError, Tone,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-F]{3}|[0-9A-F]{6})$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Brand name and description are required")]
    MissingBasicInfo,

    #[error("Logo concepts are already being generated")]
    PromptsInFlight,

    #[error("A logo is already being generated for this concept")]
    LogoInFlight,

    #[error("Prompt is required")]
    EmptyPrompt,

    #[error("Not a hex colour: {0} (expected #RGB or #RRGGBB)")]
    InvalidColor(String),

    #[error("Unknown field: {0} (expected name, description, industry or audience)")]
    UnknownField(String),

    #[error(transparent)]
    UnknownTone(#[from] ParseToneError),

    #[error("No concept number {0}")]
    NoSuchPrompt(usize),

    #[error("No logo matches id {0}")]
    LogoNotFound(String),

    #[error("More than one logo matches id {0}")]
    AmbiguousLogo(String),
}

/// Free-text fields of the brand form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandField {
    Name,
    Description,
    Industry,
    Audience,
}

impl BrandField {
    pub fn label(&self) -> &'static str {
        match self {
            BrandField::Name => "Brand name",
            BrandField::Description => "Description",
            BrandField::Industry => "Industry",
            BrandField::Audience => "Target audience",
        }
    }
}

impl FromStr for BrandField {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(BrandField::Name),
            "description" | "desc" => Ok(BrandField::Description),
            "industry" => Ok(BrandField::Industry),
            "audience" | "target-audience" | "target_audience" => Ok(BrandField::Audience),
            other => Err(SessionError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for BrandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a background request, delivered back to the session owner.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    PromptsReady {
        epoch: u64,
        result: Result<Vec<String>, String>,
    },
    LogoReady {
        epoch: u64,
        prompt: String,
        result: Result<GenerateLogoResponse, String>,
    },
}

impl WorkflowEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            WorkflowEvent::PromptsReady { epoch, .. } | WorkflowEvent::LogoReady { epoch, .. } => {
                *epoch
            }
        }
    }
}

/// Outcome of the `color` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorChange {
    Added(String),
    AddedCustom(String),
    Removed(String),
}

/// What happened when an event was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Prompts(usize),
    PromptsFailed(String),
    Logo(GeneratedLogo),
    LogoFailed(String),
    /// Started before the last reset; dropped.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSession {
    pub brand: BrandData,
    pub prompts: Vec<String>,
    pub logos: Vec<GeneratedLogo>,
    pub generating_prompts: bool,
    pub generating_logos: BTreeSet<String>,
    pub prompt_error: Option<String>,
    pub logo_error: Option<String>,
    #[serde(skip)]
    epoch: u64,
}

impl BrandSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ============ Brand form ============

    pub fn set_field(&mut self, field: BrandField, value: &str) {
        let value = value.trim().to_string();
        match field {
            BrandField::Name => self.brand.name = value,
            BrandField::Description => self.brand.description = value,
            BrandField::Industry => self.brand.industry = value,
            BrandField::Audience => self.brand.target_audience = value,
        }
    }

    pub fn set_tone(&mut self, tone: &str) -> Result<Tone, SessionError> {
        let tone: Tone = tone.parse()?;
        self.brand.tone = tone;
        Ok(tone)
    }

    /// Adds the colour if absent, removes it otherwise. Returns whether it is
    /// now selected.
    pub fn toggle_color(&mut self, color: &str) -> Result<bool, SessionError> {
        let color = normalize_color(color)?;
        if self.brand.has_color(&color) {
            self.brand.colors.retain(|c| c != &color);
            Ok(false)
        } else {
            self.brand.colors.push(color);
            Ok(true)
        }
    }

    /// Palette-style selection: removes the colour if selected, otherwise adds
    /// it. Input is normalized before any lookup, so `3b82f6` and `#3B82F6`
    /// name the same colour.
    pub fn select_color(&mut self, color: &str) -> Result<ColorChange, SessionError> {
        let color = normalize_color(color)?;
        if self.brand.has_color(&color) || models::PREDEFINED_COLORS.contains(&color.as_str()) {
            return Ok(if self.toggle_color(&color)? {
                ColorChange::Added(color)
            } else {
                ColorChange::Removed(color)
            });
        }
        self.add_custom_color(&color)?;
        Ok(ColorChange::AddedCustom(color))
    }

    /// Appends a custom colour. Empty input and colours already selected are
    /// ignored and return `Ok(None)`.
    pub fn add_custom_color(&mut self, color: &str) -> Result<Option<String>, SessionError> {
        if color.trim().is_empty() {
            return Ok(None);
        }
        let color = normalize_color(color)?;
        if self.brand.has_color(&color) {
            return Ok(None);
        }
        self.brand.colors.push(color.clone());
        Ok(Some(color))
    }

    pub fn remove_color(&mut self, color: &str) -> bool {
        let color = color.trim().to_uppercase();
        let before = self.brand.colors.len();
        self.brand
            .colors
            .retain(|c| c != &color && c.trim_start_matches('#') != color);
        self.brand.colors.len() != before
    }

    // ============ Concepts ============

    pub fn can_generate_prompts(&self) -> bool {
        self.brand.has_basic_info() && !self.generating_prompts
    }

    /// Marks a prompt request in flight and returns the brand snapshot to send.
    pub fn begin_prompt_generation(&mut self) -> Result<BrandData, SessionError> {
        if !self.brand.has_basic_info() {
            return Err(SessionError::MissingBasicInfo);
        }
        if self.generating_prompts {
            return Err(SessionError::PromptsInFlight);
        }
        self.generating_prompts = true;
        self.prompt_error = None;
        Ok(self.brand.clone())
    }

    pub fn finish_prompt_generation(&mut self, result: Result<Vec<String>, String>) -> Applied {
        self.generating_prompts = false;
        match result {
            Ok(prompts) => {
                self.prompts = prompts;
                Applied::Prompts(self.prompts.len())
            }
            Err(error) => {
                self.prompt_error = Some(error.clone());
                Applied::PromptsFailed(error)
            }
        }
    }

    /// Concept text by 1-based position, as shown to the user.
    pub fn prompt_at(&self, number: usize) -> Result<&str, SessionError> {
        number
            .checked_sub(1)
            .and_then(|i| self.prompts.get(i))
            .map(String::as_str)
            .ok_or(SessionError::NoSuchPrompt(number))
    }

    // ============ Logos ============

    pub fn is_generating_logo(&self, prompt: &str) -> bool {
        self.generating_logos.contains(prompt)
    }

    /// Marks `prompt` in flight and returns the request to send. Other prompt
    /// texts may be in flight at the same time.
    pub fn begin_logo_generation(
        &mut self,
        prompt: &str,
    ) -> Result<GenerateLogoRequest, SessionError> {
        if prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if self.is_generating_logo(prompt) {
            return Err(SessionError::LogoInFlight);
        }
        self.generating_logos.insert(prompt.to_string());
        self.logo_error = None;

        let brand_name = Some(self.brand.name.clone()).filter(|name| !name.is_empty());
        Ok(GenerateLogoRequest {
            prompt: prompt.to_string(),
            brand_name,
        })
    }

    pub fn finish_logo_generation(
        &mut self,
        prompt: &str,
        result: Result<GenerateLogoResponse, String>,
    ) -> Applied {
        self.generating_logos.remove(prompt);
        match result {
            Ok(response) => {
                let logo = GeneratedLogo::from(response);
                self.logos.push(logo.clone());
                Applied::Logo(logo)
            }
            Err(error) => {
                self.logo_error = Some(error.clone());
                Applied::LogoFailed(error)
            }
        }
    }

    /// Exact id match first, then a unique id prefix.
    pub fn find_logo(&self, id: &str) -> Result<&GeneratedLogo, SessionError> {
        let id = id.trim();
        if let Some(logo) = self.logos.iter().find(|logo| logo.id == id) {
            return Ok(logo);
        }
        if id.is_empty() {
            return Err(SessionError::LogoNotFound(id.to_string()));
        }

        let mut matches = self.logos.iter().filter(|logo| logo.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(logo), None) => Ok(logo),
            (Some(_), Some(_)) => Err(SessionError::AmbiguousLogo(id.to_string())),
            (None, _) => Err(SessionError::LogoNotFound(id.to_string())),
        }
    }

    pub fn remove_logo(&mut self, id: &str) -> Result<GeneratedLogo, SessionError> {
        let target = self.find_logo(id)?.id.clone();
        let index = self
            .logos
            .iter()
            .position(|logo| logo.id == target)
            .ok_or_else(|| SessionError::LogoNotFound(id.to_string()))?;
        Ok(self.logos.remove(index))
    }

    // ============ Events ============

    pub fn is_busy(&self) -> bool {
        self.generating_prompts || !self.generating_logos.is_empty()
    }

    pub fn apply_event(&mut self, event: WorkflowEvent) -> Applied {
        if event.epoch() != self.epoch {
            tracing::debug!("Dropping result from epoch {}", event.epoch());
            return Applied::Stale;
        }
        match event {
            WorkflowEvent::PromptsReady { result, .. } => self.finish_prompt_generation(result),
            WorkflowEvent::LogoReady { prompt, result, .. } => {
                self.finish_logo_generation(&prompt, result)
            }
        }
    }

    /// Back to an empty form. Requests still in flight will be ignored.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::default();
        self.epoch = epoch;
    }
}

/// Upper-cases and validates a hex colour. A missing leading `#` is added.
pub fn normalize_color(color: &str) -> Result<String, SessionError> {
    let trimmed = color.trim();
    let upper = trimmed.to_uppercase();
    let with_hash = if upper.starts_with('#') {
        upper
    } else {
        format!("#{}", upper)
    };
    if HEX_COLOR.is_match(&with_hash) {
        Ok(with_hash)
    } else {
        Err(SessionError::InvalidColor(trimmed.to_string()))
    }
}
