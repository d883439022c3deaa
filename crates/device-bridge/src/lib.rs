//! ADB Device Bridge
//!
//! Talks to attached devices and emulators through the Android Debug
//! Bridge: enumeration, port reversing, and activity launch.

pub mod adb;
pub mod device;

pub use adb::{AdbClient, AdbError};
pub use device::{Device, DeviceState, DeviceType};
