//! Device and axis catalogs
//!
//! Both are snapshots: a [`DeviceCatalog`] is replaced wholesale by each
//! discovery, an [`AxisSet`] by each acquisition. Axis descriptors, direction
//! weights and spring conditions share one length for the life of the set.

use forcelink_ffb::SpringCondition;
use forcelink_native::{AxisDescriptor, DeviceDescriptor};
use serde::Serialize;

/// Devices found by the most recent discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceCatalog {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceCatalog {
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn first(&self) -> Option<&DeviceDescriptor> {
        self.devices.first()
    }

    /// Looks a device up by instance id.
    pub fn get(&self, instance_id: &str) -> Option<&DeviceDescriptor> {
        self.devices.iter().find(|d| d.matches(instance_id))
    }

    pub fn contains(&self, instance_id: &str) -> bool {
        self.get(instance_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceDescriptor> {
        self.devices.iter()
    }

    pub fn as_slice(&self) -> &[DeviceDescriptor] {
        &self.devices
    }
}

impl<'a> IntoIterator for &'a DeviceCatalog {
    type Item = &'a DeviceDescriptor;
    type IntoIter = std::slice::Iter<'a, DeviceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

/// Force axes of the active device with their per-axis parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AxisSet {
    axes: Vec<AxisDescriptor>,
    axis_directions: Vec<i32>,
    spring_conditions: Vec<SpringCondition>,
}

impl AxisSet {
    /// Builds a set with zero directions and unprovisioned conditions.
    pub fn new(axes: Vec<AxisDescriptor>) -> Self {
        let len = axes.len();
        Self {
            axes,
            axis_directions: vec![0; len],
            spring_conditions: vec![SpringCondition::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes(&self) -> &[AxisDescriptor] {
        &self.axes
    }

    pub fn directions(&self) -> &[i32] {
        &self.axis_directions
    }

    pub fn spring_conditions(&self) -> &[SpringCondition] {
        &self.spring_conditions
    }

    /// Overwrites the direction weights in place. Returns `false` and leaves
    /// the set untouched when the length does not match.
    pub(crate) fn copy_directions(&mut self, directions: &[i32]) -> bool {
        if directions.len() != self.axis_directions.len() {
            return false;
        }
        self.axis_directions.copy_from_slice(directions);
        true
    }

    /// Overwrites the spring conditions in place. Returns `false` and leaves
    /// the set untouched when the length does not match.
    pub(crate) fn copy_spring_conditions(&mut self, conditions: &[SpringCondition]) -> bool {
        if conditions.len() != self.spring_conditions.len() {
            return false;
        }
        self.spring_conditions.copy_from_slice(conditions);
        true
    }

    pub(crate) fn reset_spring_conditions(&mut self) {
        self.spring_conditions
            .fill(SpringCondition::provisioning_default());
    }
}
