//! Cell and device value types
//!
//! A [`Cell`] binds one grid position to a pixel on an addressable LED
//! device. The empty string device id is the "no data" sentinel.

use serde::{Deserialize, Serialize};

use crate::{EditError, Result};

/// One grid entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "deviceId", default, deserialize_with = "null_as_default")]
    pub device_id: String,

    #[serde(alias = "pixelIndex", default)]
    pub pixel: i32,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub group: String,
}

impl Cell {
    pub fn new(device_id: impl Into<String>, pixel: i32, group: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            pixel,
            group: group.into(),
        }
    }

    /// The empty cell sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.device_id.is_empty()
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub fn has_group(&self) -> bool {
        !self.group.is_empty()
    }

    /// A cell without a device carries no pixel or group
    pub fn normalized(self) -> Self {
        if self.is_empty() { Self::empty() } else { self }
    }

    /// Check the pixel index against the bound device.
    ///
    /// Unknown device ids are treated as unbounded; only the sign is checked.
    pub fn validate(&self, devices: &[Device]) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        if let Some(device) = find_device(devices, &self.device_id) {
            device.check_pixel(self.pixel)
        } else if self.pixel < 0 {
            Err(EditError::NegativePixel { pixel: self.pixel })
        } else {
            Ok(())
        }
    }
}

/// An addressable LED device, supplied by the host
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub id: String,

    #[serde(rename = "count")]
    pub pixel_count: i32,
}

impl Device {
    pub fn new(id: impl Into<String>, pixel_count: i32) -> Self {
        Self { id: id.into(), pixel_count }
    }

    pub fn contains_pixel(&self, pixel: i32) -> bool {
        (0..self.pixel_count).contains(&pixel)
    }

    pub fn check_pixel(&self, pixel: i32) -> Result<()> {
        if self.contains_pixel(pixel) {
            Ok(())
        } else {
            Err(EditError::PixelOutOfRange {
                device_id: self.id.clone(),
                pixel,
                pixel_count: self.pixel_count,
            })
        }
    }
}

fn null_as_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn find_device<'a>(devices: &'a [Device], id: &str) -> Option<&'a Device> {
    devices.iter().find(|d| d.id == id)
}
