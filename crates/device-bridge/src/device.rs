//! Device Types and State
//!
//! Represents Android devices (physical and emulated).

use serde::{Deserialize, Serialize};

/// Device state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    /// Device is online and ready
    Online,
    /// Device is offline
    Offline,
    /// Device is not authorized (need to accept on device)
    Unauthorized,
    /// Unknown state
    Unknown,
}

impl DeviceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::Online => "device",
            DeviceState::Offline => "offline",
            DeviceState::Unauthorized => "unauthorized",
            DeviceState::Unknown => "unknown",
        }
    }

    /// Parse the state column of `adb devices` output.
    pub fn parse(state: &str) -> Self {
        match state {
            "device" => DeviceState::Online,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            _ => DeviceState::Unknown,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, DeviceState::Online)
    }
}

/// Device type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    /// Physical device connected via USB/WiFi
    Physical,
    /// Android emulator
    Emulator,
}

/// Device information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Device serial number
    pub serial: String,
    /// Device state
    pub state: DeviceState,
    /// Device type
    pub device_type: DeviceType,
    /// Device model (e.g., "Pixel 4")
    pub model: Option<String>,
    /// Device product name
    pub product: Option<String>,
}

impl Device {
    /// Check if device is online and usable
    pub fn is_usable(&self) -> bool {
        self.state.is_usable()
    }

    /// Check if this is an emulator
    pub fn is_emulator(&self) -> bool {
        self.device_type == DeviceType::Emulator
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        if let Some(ref model) = self.model {
            format!("{} ({})", model.replace('_', " "), self.serial)
        } else {
            self.serial.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse_round_trip() {
        for state in [
            DeviceState::Online,
            DeviceState::Offline,
            DeviceState::Unauthorized,
        ] {
            assert_eq!(DeviceState::parse(state.as_str()), state);
        }
        assert_eq!(DeviceState::parse("sideload"), DeviceState::Unknown);
    }

    #[test]
    fn test_display_name_uses_model() {
        let device = Device {
            serial: "emulator-5554".to_string(),
            state: DeviceState::Online,
            device_type: DeviceType::Emulator,
            model: Some("Pixel_6".to_string()),
            product: None,
        };
        assert_eq!(device.display_name(), "Pixel 6 (emulator-5554)");
    }
}
