//! Input devices and stage handles
//!
//! Events refer to the stage they target and the device that produced them
//! through slotmap keys. These are lookups, not ownership: an event never
//! keeps a stage or device alive.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a stage (top-level drawing surface) owned by the scene graph
    pub struct StageId;

    /// Handle to an input device owned by a [`DeviceManager`]
    pub struct DeviceId;
}

/// Kind of input device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputDeviceType {
    /// Mouse, touchscreen, or any other pointing device
    Pointer,
    /// Keyboard
    Keyboard,
    /// Tablets, pads and other extension devices
    Extension,
}

/// An input device record
#[derive(Clone, Debug)]
pub struct InputDevice {
    pub name: String,
    pub device_type: InputDeviceType,
    /// Stage the device is currently over, if any
    pub stage: Option<StageId>,
}

impl InputDevice {
    pub fn new(name: impl Into<String>, device_type: InputDeviceType) -> Self {
        Self {
            name: name.into(),
            device_type,
            stage: None,
        }
    }
}

/// Owns the input devices known to a backend
///
/// A core pointer and a core keyboard always exist.
#[derive(Debug)]
pub struct DeviceManager {
    devices: SlotMap<DeviceId, InputDevice>,
    core: FxHashMap<InputDeviceType, DeviceId>,
}

impl DeviceManager {
    pub fn new() -> Self {
        let mut manager = Self {
            devices: SlotMap::with_key(),
            core: FxHashMap::default(),
        };

        let pointer =
            manager.add_device(InputDevice::new("Core Pointer", InputDeviceType::Pointer));
        let keyboard =
            manager.add_device(InputDevice::new("Core Keyboard", InputDeviceType::Keyboard));
        manager.core.insert(InputDeviceType::Pointer, pointer);
        manager.core.insert(InputDeviceType::Keyboard, keyboard);
        manager
    }

    /// Register a device
    pub fn add_device(&mut self, device: InputDevice) -> DeviceId {
        self.devices.insert(device)
    }

    /// Remove a device; core devices cannot be removed
    pub fn remove_device(&mut self, id: DeviceId) -> Option<InputDevice> {
        if self.core.values().any(|&core| core == id) {
            return None;
        }
        self.devices.remove(id)
    }

    /// The core device of the given type
    pub fn core_device(&self, device_type: InputDeviceType) -> Option<DeviceId> {
        self.core.get(&device_type).copied()
    }

    pub fn get(&self, id: DeviceId) -> Option<&InputDevice> {
        self.devices.get(id)
    }

    /// Record which stage a device is over
    ///
    /// Returns false if the device is unknown.
    pub fn set_stage(&mut self, id: DeviceId, stage: Option<StageId>) -> bool {
        match self.devices.get_mut(id) {
            Some(device) => {
                device.stage = stage;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &InputDevice)> {
        self.devices.iter()
    }
}

impl Default for DeviceManager {
    fn default() -> Self {
        Self::new()
    }
}
