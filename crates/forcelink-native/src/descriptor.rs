//! Device and axis descriptors returned by the native layer

use serde::{Deserialize, Serialize};

/// One FFB-capable device found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Stable instance identifier (a GUID string on DirectInput).
    pub instance_id: String,
    pub display_name: String,
    /// Product identifier (a GUID string on DirectInput).
    pub product_id: String,
}

impl DeviceDescriptor {
    pub fn new(instance_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            display_name: display_name.into(),
            product_id: String::new(),
        }
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    pub fn matches(&self, instance_id: &str) -> bool {
        self.instance_id == instance_id
    }

    /// Display name, falling back to the instance id when the driver
    /// reported none.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.instance_id
        } else {
            &self.display_name
        }
    }
}

/// One force axis of the acquired device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    pub name: String,
    /// Ordinal of the axis within the device.
    pub axis_index: u32,
    /// Device-native axis offset identifier (`DIJOFS_*`).
    pub offset: u32,
}

impl AxisDescriptor {
    pub fn new(name: impl Into<String>, axis_index: u32, offset: u32) -> Self {
        Self {
            name: name.into(),
            axis_index,
            offset,
        }
    }
}
