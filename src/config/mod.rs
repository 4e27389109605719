//! Configuration module for medassist
//!
//! Handles loading settings from TOML files and provider credentials from the
//! environment. Environment lookups happen only in [`Settings::load`]; the
//! resulting value is passed explicitly to the pipeline.

mod settings;

pub use settings::{
    GeneralSettings, LlmSettings, ProviderCredentials, ProviderSettings, Settings,
    GEMINI_API_KEY_ENV, GROQ_API_KEY_ENV,
};
