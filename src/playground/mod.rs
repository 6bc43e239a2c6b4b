//! Playground — per-session control-panel state.
//!
//! DESIGN
//! ======
//! One `Playground` per authenticated browser session holds the assistant
//! and voice pickers, the active voice filter, the speed/emotion editor, and the camera/mic
//! toggles.
//! Everything here is plain data with no I/O; services load lists into it
//! and routes read it back out.

pub mod inputs;
pub mod selector;
pub mod speed_emotion;
pub mod voices;

use crate::manager::{Assistant, Voice};
use inputs::InputSettings;
use selector::ListSelector;
use speed_emotion::SpeedEmotionEditor;
use voices::VoiceFilter;

#[derive(Debug, Clone, Default)]
pub struct Playground {
    pub assistants: ListSelector<Assistant>,
    pub voices: ListSelector<Voice>,
    pub voice_filter: VoiceFilter,
    pub speed_emotion: SpeedEmotionEditor,
    pub inputs: InputSettings,
}
