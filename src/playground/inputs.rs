//! Camera/microphone toggles from the panel's settings menu.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Camera,
    Mic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSettings {
    pub camera: bool,
    pub mic: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { camera: true, mic: true }
    }
}

impl InputSettings {
    /// Flip one input and return the updated settings.
    pub fn toggle(&mut self, input: Input) -> Self {
        match input {
            Input::Camera => self.camera = !self.camera,
            Input::Mic => self.mic = !self.mic,
        }
        *self
    }
}

#[cfg(test)]
#[path = "inputs_test.rs"]
mod tests;
