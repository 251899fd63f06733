use serde::Deserialize;

use crate::{
    clock::Clock,
    totp::{validate_code, validate_code_anchored},
    OtpError,
};

/// How the validation window is laid out around "now".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Re-read the clock for each offset. See [`validate_code`].
    #[default]
    WallClock,
    /// Capture one time step and scan a fixed range around it. See [`validate_code_anchored`].
    Anchored,
}

/// Validation settings a host service loads from its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TotpOptions {
    pub(crate) tolerance_minutes: i32,
    pub(crate) window: WindowMode,
}

impl Default for TotpOptions {
    fn default() -> Self {
        Self {
            tolerance_minutes: 1,
            window: WindowMode::default(),
        }
    }
}

impl TotpOptions {
    /// Defaults to one minute of tolerance and a [`WindowMode::WallClock`] scan
    pub fn new() -> Self {
        Self::default()
    }

    ///  Sets how many minutes into the past a code stays valid. The sign is ignored
    pub fn with_tolerance_minutes(&mut self, tolerance_minutes: i32) -> &mut Self {
        self.tolerance_minutes = tolerance_minutes;

        self
    }

    ///  Sets the window layout
    pub fn with_window(&mut self, window: WindowMode) -> &mut Self {
        self.window = window;

        self
    }

    pub fn tolerance_minutes(&self) -> i32 {
        self.tolerance_minutes
    }

    pub fn window(&self) -> WindowMode {
        self.window
    }

    /// Validates a code with these settings
    ///
    /// # Errors
    /// [`OtpError::MissingSecret`] or [`OtpError::Encoding`], as for generation.
    pub fn validate(
        &self,
        clock: &impl Clock,
        secret: Option<&[u8]>,
        candidate: i64,
        label: Option<&[u8]>,
    ) -> Result<bool, OtpError> {
        match self.window {
            WindowMode::WallClock => {
                validate_code(clock, secret, candidate, label, self.tolerance_minutes)
            }
            WindowMode::Anchored => {
                validate_code_anchored(clock, secret, candidate, label, self.tolerance_minutes)
            }
        }
    }
}
