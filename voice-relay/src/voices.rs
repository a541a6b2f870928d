//! Supported synthesis languages and the speaker catalog served by `/api/voices`.

use serde::Serialize;
use std::collections::BTreeMap;

/// A language the TTS engine can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Chinese,
    Japanese,
    Korean,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
    ];

    /// Parse a client-facing code (`EN`, `ES`, `FR`, `ZH`, `JP`, `KR`). Matching is exact.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Resolve an optional request code, falling back to English.
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }

    /// Client-facing code.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "EN",
            Self::Spanish => "ES",
            Self::French => "FR",
            Self::Chinese => "ZH",
            Self::Japanese => "JP",
            Self::Korean => "KR",
        }
    }

    /// Lowercase ISO 639-1 code the synthesis engine expects.
    pub fn engine_code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Chinese => "zh",
            Self::Japanese => "ja",
            Self::Korean => "ko",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
        }
    }

    /// Speaker variants offered for this language.
    pub fn speakers(self) -> &'static [&'static str] {
        match self {
            Self::English => &["EN-Default", "EN-US", "EN-BR", "EN-INDIA", "EN-AU"],
            Self::Spanish => &["ES", "ES-MX"],
            Self::French => &["FR"],
            Self::Chinese => &["ZH"],
            Self::Japanese => &["JP"],
            Self::Korean => &["KR"],
        }
    }
}

/// Body of `GET /api/voices`.
#[derive(Debug, Serialize)]
pub struct VoiceCatalog {
    pub languages: BTreeMap<&'static str, &'static str>,
    pub speakers: BTreeMap<&'static str, &'static [&'static str]>,
}

/// Build the static voice catalog.
pub fn catalog() -> VoiceCatalog {
    VoiceCatalog {
        languages: Language::ALL
            .iter()
            .map(|lang| (lang.code(), lang.display_name()))
            .collect(),
        speakers: Language::ALL
            .iter()
            .map(|lang| (lang.code(), lang.speakers()))
            .collect(),
    }
}
