//! Speed/emotion editor — draft state diffed against the last synced snapshot.
//!
//! DESIGN
//! ======
//! Closed → Open → Closed. Edits mutate the draft immediately; nothing is
//! sent while the editor is open. Closing compares the serialized draft
//! byte-for-byte with the snapshot and yields one update payload when they
//! differ. The snapshot only moves when the manager confirms an update, so a
//! failed sync is detected again on the next close.
//!
//! Serialization: speed is the lowercased label; emotions are `name:level`
//! pairs joined by commas in canonical emotion order, skipping emotions with
//! no level.

use serde::{Deserialize, Serialize};

use crate::manager::{SpeedEmotionResult, SpeedEmotionUpdate};

// =============================================================================
// SPEED
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slowest,
    Slow,
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl Speed {
    /// Slider order, slowest first.
    pub const ALL: [Speed; 5] = [Speed::Slowest, Speed::Slow, Speed::Normal, Speed::Fast, Speed::Fastest];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Slowest => "Slowest",
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Fastest => "Fastest",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Slowest => "Very slow speech",
            Self::Slow => "Slower than normal speech",
            Self::Normal => "Default speech rate",
            Self::Fast => "Faster than normal speech",
            Self::Fastest => "Very fast speech",
        }
    }

    /// Rate offset understood by the synthesis backend.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Slowest => -1.0,
            Self::Slow => -0.5,
            Self::Normal => 0.0,
            Self::Fast => 0.5,
            Self::Fastest => 1.0,
        }
    }

    /// Wire form sent to the manager.
    #[must_use]
    pub fn wire(self) -> String {
        self.label().to_lowercase()
    }

    /// Match a label case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Snap a click position on the slider track (0.0 = left edge, 1.0 =
    /// right edge) to the nearest option.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        let last = Self::ALL.len() - 1;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (fraction * last as f64).round().clamp(0.0, last as f64) as usize;
        Self::ALL[index]
    }
}

// =============================================================================
// EMOTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Positivity,
    Surprise,
    Sadness,
    Curiosity,
}

impl Emotion {
    /// Canonical order used for display and serialization.
    pub const ALL: [Emotion; 5] =
        [Emotion::Anger, Emotion::Positivity, Emotion::Surprise, Emotion::Sadness, Emotion::Curiosity];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Positivity => "positivity",
            Self::Surprise => "surprise",
            Self::Sadness => "sadness",
            Self::Curiosity => "curiosity",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLevel {
    Lowest,
    Low,
    High,
    Highest,
}

impl EmotionLevel {
    pub const ALL: [EmotionLevel; 4] =
        [EmotionLevel::Lowest, EmotionLevel::Low, EmotionLevel::High, EmotionLevel::Highest];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lowest => "lowest",
            Self::Low => "low",
            Self::High => "high",
            Self::Highest => "highest",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

// =============================================================================
// DRAFT / SNAPSHOT
// =============================================================================

/// Local, not-yet-synced speed and per-emotion levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftSettings {
    pub speed: Speed,
    levels: [Option<EmotionLevel>; 5],
}

impl DraftSettings {
    #[must_use]
    pub fn level(&self, emotion: Emotion) -> Option<EmotionLevel> {
        self.levels[emotion.index()]
    }

    pub fn set_level(&mut self, emotion: Emotion, level: Option<EmotionLevel>) {
        self.levels[emotion.index()] = level;
    }

    /// Emotions in canonical order with their levels.
    pub fn emotions(&self) -> impl Iterator<Item = (Emotion, Option<EmotionLevel>)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.level(e)))
    }

    #[must_use]
    pub fn speed_wire(&self) -> String {
        self.speed.wire()
    }

    #[must_use]
    pub fn emotion_wire(&self) -> String {
        self.emotions()
            .filter_map(|(e, level)| level.map(|l| format!("{}:{}", e.name(), l.name())))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Rebuild emotion levels from a `name:level,...` string. Unknown names
    /// and levels are ignored; emotions not mentioned end up at none.
    pub fn set_emotions_from_wire(&mut self, raw: &str) {
        self.levels = [None; 5];
        for pair in raw.split(',') {
            let Some((name, level)) = pair.split_once(':') else {
                continue;
            };
            let emotion = Emotion::from_name(name.trim());
            let level = EmotionLevel::from_name(level.trim());
            if let (Some(emotion), Some(level)) = (emotion, level) {
                self.set_level(emotion, Some(level));
            }
        }
    }
}

/// Last speed/emotion values confirmed by the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedSnapshot {
    pub speed: String,
    pub emotion: String,
}

impl SyncedSnapshot {
    fn of(draft: &DraftSettings) -> Self {
        Self { speed: draft.speed_wire(), emotion: draft.emotion_wire() }
    }
}

// =============================================================================
// EDITOR
// =============================================================================

#[derive(Debug, Clone)]
pub struct SpeedEmotionEditor {
    open: bool,
    draft: DraftSettings,
    previous: SyncedSnapshot,
}

impl SpeedEmotionEditor {
    /// Closed editor at `normal` speed with no emotions; the snapshot matches
    /// the draft so an untouched close sends nothing.
    #[must_use]
    pub fn new() -> Self {
        let draft = DraftSettings::default();
        Self { open: false, previous: SyncedSnapshot::of(&draft), draft }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn draft(&self) -> &DraftSettings {
        &self.draft
    }

    #[must_use]
    pub fn previous(&self) -> &SyncedSnapshot {
        &self.previous
    }

    /// Apply values provided by the surrounding page (typically the
    /// assistant's current settings). An unknown speed label is ignored; an
    /// emotion string replaces every level. The snapshot is reset to the
    /// resulting draft.
    pub fn apply_defaults(&mut self, speed: Option<&str>, emotion: Option<&str>) {
        if let Some(speed) = speed.and_then(Speed::from_label) {
            self.draft.speed = speed;
        }
        if let Some(raw) = emotion.filter(|raw| !raw.is_empty()) {
            self.draft.set_emotions_from_wire(raw);
        }
        self.previous = SyncedSnapshot::of(&self.draft);
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.draft.speed = speed;
    }

    /// Slider track click at `fraction` of its width.
    pub fn set_speed_from_fraction(&mut self, fraction: f64) -> Speed {
        let speed = Speed::from_fraction(fraction);
        self.draft.speed = speed;
        speed
    }

    pub fn set_emotion(&mut self, emotion: Emotion, level: EmotionLevel) {
        self.draft.set_level(emotion, Some(level));
    }

    pub fn reset_emotion(&mut self, emotion: Emotion) {
        self.draft.set_level(emotion, None);
    }

    #[must_use]
    pub fn current_speed(&self) -> String {
        self.draft.speed_wire()
    }

    #[must_use]
    pub fn current_emotion(&self) -> String {
        self.draft.emotion_wire()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.current_speed() != self.previous.speed || self.current_emotion() != self.previous.emotion
    }

    /// Close the editor. Returns the update to send iff the draft differs
    /// from the snapshot.
    pub fn close(&mut self) -> Option<SpeedEmotionUpdate> {
        self.open = false;
        if !self.has_changes() {
            return None;
        }
        Some(SpeedEmotionUpdate { voice_speed: self.current_speed(), voice_emotio: self.current_emotion() })
    }

    /// Adopt the manager's confirmed values as the new snapshot. The draft is
    /// left as the user edited it.
    pub fn apply_synced(&mut self, result: &SpeedEmotionResult) {
        self.previous = SyncedSnapshot {
            speed: result.now_voice_speed.clone(),
            emotion: result.now_voice_emotion.clone(),
        };
    }
}

impl Default for SpeedEmotionEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "speed_emotion_test.rs"]
mod tests;
