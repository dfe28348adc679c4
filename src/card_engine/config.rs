//! Engine tunables.
//!
//! Every field has a default matching the stock app, so a host only overrides
//! what it needs:
//!
//! ```rust
//! use vocab_deck::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "max_visible_cards": 4 }"#).unwrap();
//! assert_eq!(config.max_visible_cards, 4);
//! assert_eq!(config.round_exit_delay_ms, 2000);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // ── swipe deck ──
    /// Upper bound of the fanned deck window.
    pub max_visible_cards: usize,
    /// Vertical offset between consecutive window cards.
    pub card_offset_step: f32,
    /// Scale reduction between consecutive window cards.
    pub card_scale_step: f32,
    pub lift_scale_divisor: f32,
    pub push_scale_divisor: f32,

    // ── drag selection ──
    pub elevated_z_index: i32,
    pub resting_opacity: f32,
    pub primed_delete_scale: f32,

    // ── round ──
    pub round_exit_delay_ms: u64,

    // ── notifications ──
    pub input_error_toast_ms: u64,
    pub store_error_toast_ms: u64,
    pub info_toast_ms: u64,

    // ── limits ──
    pub max_languages: usize,
    pub max_language_name_len: usize,
    pub max_term_len: usize,
    pub max_translation_len: usize,
    pub max_description_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_visible_cards: 6,
            card_offset_step: 20.0,
            card_scale_step: 0.05,
            lift_scale_divisor: 2000.0,
            push_scale_divisor: 1000.0,
            elevated_z_index: 1000,
            resting_opacity: 0.8,
            primed_delete_scale: 1.2,
            round_exit_delay_ms: 2000,
            input_error_toast_ms: 5000,
            store_error_toast_ms: 2000,
            info_toast_ms: 2000,
            max_languages: 14,
            max_language_name_len: 12,
            max_term_len: 50,
            max_translation_len: 50,
            max_description_len: 100,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
