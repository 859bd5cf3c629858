//! # Network
//!
//! BACnet addressing, MS/TP trunk limits and IP subnet arithmetic.
//!
//! ## BACnet Device Instances
//!
//! Sites commonly encode building, floor and device into the instance
//! number as `building·100000 + floor·1000 + device`. Each component is
//! checked against its field width (floor 0-99, device 0-999) so one field
//! cannot spill into the next, and the packed value must fit the 22-bit
//! instance space. 4,194,303 is the "unconfigured" wildcard and is never a
//! valid device instance.

use super::{Calculator, Category, InputField, OutputField, Selector};
use crate::input::RawInputs;
use crate::models::ipv4::{to_quad, Subnet};
use crate::output::{fixed, CalculatorResult};

/// Highest assignable BACnet device instance
pub const BACNET_MAX_INSTANCE: u32 = 4_194_302;

/// Derating floor for long MS/TP segments
pub const MSTP_MIN_DERATING: f64 = 0.5;

/// Per-device derating for MS/TP segments
pub const MSTP_DERATING_PER_DEVICE: f64 = 0.02;

fn whole_in_range(value: f64, max: f64) -> Option<u32> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=max).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

// ============================================================================
// BACnet Device Instance
// ============================================================================

pub static BACNET_INSTANCE: Calculator = Calculator {
    id: "bacnet-instance",
    name: "BACnet Device Instance",
    category: Category::Network,
    inputs: &[
        InputField::new("building", "Building Number", ""),
        InputField::new("floor", "Floor Number", "0-99"),
        InputField::new("device", "Device Number", "0-999"),
    ],
    selector: None,
    outputs: &[OutputField::new("instance", "Device Instance", "")],
    formula: "instance = building · 100000 + floor · 1000 + device",
    example: &[("building", "1"), ("floor", "1"), ("device", "1")],
    compute: bacnet_instance,
};

/// Pack the components, or `None` if any component or the result is out of
/// range.
pub fn pack_device_instance(building: f64, floor: f64, device: f64) -> Option<u32> {
    let building = whole_in_range(building, f64::from(BACNET_MAX_INSTANCE))?;
    let floor = whole_in_range(floor, 99.0)?;
    let device = whole_in_range(device, 999.0)?;
    let instance = u64::from(building) * 100_000 + u64::from(floor) * 1_000 + u64::from(device);
    if instance > u64::from(BACNET_MAX_INSTANCE) {
        return None;
    }
    Some(instance as u32)
}

fn bacnet_instance(inputs: &RawInputs) -> CalculatorResult {
    let packed = pack_device_instance(
        inputs.number("building"),
        inputs.number("floor"),
        inputs.number("device"),
    );
    match packed {
        Some(instance) => BACNET_INSTANCE.fill([instance.to_string()]),
        None => BACNET_INSTANCE.blank(),
    }
}

// ============================================================================
// MS/TP Trunk Length
// ============================================================================

/// Base segment length (ft) for a baud rate, before device derating.
///
/// Every supported rate currently shares the 4000 ft EIA-485 limit.
pub fn mstp_base_length_ft(baud: &str) -> Option<f64> {
    match baud {
        "9600" | "19200" | "38400" | "57600" | "76800" | "115200" => Some(4000.0),
        _ => None,
    }
}

/// `max(0.5, 1 − 0.02 · (devices − 1))`
pub fn mstp_derating(device_count: f64) -> f64 {
    (1.0 - MSTP_DERATING_PER_DEVICE * (device_count - 1.0)).max(MSTP_MIN_DERATING)
}

const BAUD: Selector = Selector {
    name: "baud",
    label: "Baud Rate",
    options: &["9600", "19200", "38400", "57600", "76800", "115200"],
    default: "38400",
};

pub static MSTP_TRUNK: Calculator = Calculator {
    id: "mstp-trunk",
    name: "MS/TP Trunk Length",
    category: Category::Network,
    inputs: &[InputField::new("devices", "Device Count", "")],
    selector: Some(BAUD),
    outputs: &[
        OutputField::new("derating", "Derating Factor", ""),
        OutputField::new("max_length", "Maximum Trunk Length", "ft"),
    ],
    formula: "length = base(baud) · max(0.5, 1 − 0.02 · (devices − 1))",
    example: &[("devices", "32"), ("baud", "76800")],
    compute: mstp_trunk,
};

fn mstp_trunk(inputs: &RawInputs) -> CalculatorResult {
    let Some(base) = mstp_base_length_ft(&inputs.selection(&BAUD)) else {
        return MSTP_TRUNK.blank();
    };
    let devices = inputs.number("devices");
    if !devices.is_finite() || devices < 1.0 || devices.fract() != 0.0 {
        return MSTP_TRUNK.blank();
    }
    let derating = mstp_derating(devices);
    MSTP_TRUNK.fill([fixed(derating, 2), fixed(base * derating, 0)])
}

// ============================================================================
// IP Subnet
// ============================================================================

pub static IP_SUBNET: Calculator = Calculator {
    id: "ip-subnet",
    name: "IP Subnet",
    category: Category::Network,
    inputs: &[
        InputField::new("address", "IP Address", "a.b.c.d"),
        InputField::new("prefix", "CIDR Prefix", "/0-32"),
    ],
    selector: None,
    outputs: &[
        OutputField::new("network", "Network Address", ""),
        OutputField::new("broadcast", "Broadcast Address", ""),
        OutputField::new("mask", "Subnet Mask", ""),
        OutputField::new("hosts", "Usable Hosts", ""),
        OutputField::new("range", "Host Range", ""),
    ],
    formula: "network = ip & mask; broadcast = network | ~mask; hosts = 2^(32 − m) − 2",
    example: &[("address", "192.168.1.0"), ("prefix", "24")],
    compute: ip_subnet,
};

fn ip_subnet(inputs: &RawInputs) -> CalculatorResult {
    let Some(subnet) = Subnet::parse(inputs.raw("address"), inputs.raw("prefix")) else {
        return IP_SUBNET.blank();
    };
    let range = subnet
        .host_range()
        .map(|(first, last)| format!("{} - {}", to_quad(first), to_quad(last)))
        .unwrap_or_default();
    IP_SUBNET.fill([
        to_quad(subnet.network),
        to_quad(subnet.broadcast),
        to_quad(subnet.mask),
        subnet.usable_hosts().to_string(),
        range,
    ])
}
