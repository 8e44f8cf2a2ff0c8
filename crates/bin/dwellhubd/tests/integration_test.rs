//! End-to-end tests for the full dwellhub stack.
//!
//! Each test wires the real in-memory adapter into the registry facade and
//! drives it the way a caller would, asserting on returned snapshots and on
//! their serialized JSON shape.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use dwellhub_adapter_storage_memory::InMemoryEntityStore;
use dwellhub_app::{HomeRegistry, RegistryConfig, SharedRegistry};
use dwellhub_domain::attribute::{AttributeValue, Attributes, attributes};
use dwellhub_domain::device::{DeviceState, Power, SwitchState};
use dwellhub_domain::error::ErrorKind;
use dwellhub_domain::id::DeviceId;

fn registry() -> HomeRegistry<InMemoryEntityStore> {
    HomeRegistry::new(InMemoryEntityStore::new(), RegistryConfig::default())
}

fn no_params() -> Attributes {
    Attributes::new()
}

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .expect("snapshot should serialize as an object")
        .keys()
        .map(String::as_str)
        .collect()
}

fn state_json(registry: &HomeRegistry<InMemoryEntityStore>, id: DeviceId) -> Value {
    serde_json::to_value(registry.device_info(id).unwrap().state()).unwrap()
}

// ---------------------------------------------------------------------------
// Device creation
// ---------------------------------------------------------------------------

#[test]
fn should_create_every_device_type_unpaired_with_default_state() {
    let mut registry = registry();
    let expected = [
        ("switch", json!({"power": "off"})),
        ("dimmer", json!({"power": "off", "brightness": 0})),
        ("lock", json!({"state": "locked", "is_armed": true})),
        (
            "thermostat",
            json!({
                "current_temperature": 70.0,
                "target_temperature": 70.0,
                "mode": "off",
                "is_running": false
            }),
        ),
    ];

    for (device_type, default_state) in expected {
        let created = registry
            .create_device(device_type, "Device", &no_params())
            .unwrap();
        let info = serde_json::to_value(registry.device_info(created.id).unwrap()).unwrap();

        assert_eq!(info["is_paired"], json!(false));
        assert_eq!(info["hub_id"], Value::Null);
        assert_eq!(info["device_type"], json!(device_type));
        assert_eq!(info["state"], default_state);
    }
}

#[test]
fn should_reject_unknown_device_type() {
    let mut registry = registry();
    let err = registry
        .create_device("toaster", "Toaster", &no_params())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);
    assert!(registry.list_devices().is_empty());
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

#[test]
fn should_fail_second_pairing_and_allow_pairing_after_removal() {
    let mut registry = registry();
    registry.create_hub(None);
    let lamp = registry
        .create_device("switch", "Lamp", &no_params())
        .unwrap();

    registry.pair_device(lamp.id).unwrap();
    let err = registry.pair_device(lamp.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyPaired);

    registry.remove_device(lamp.id).unwrap();
    let repaired = registry.pair_device(lamp.id).unwrap();
    assert!(repaired.is_paired());
}

#[test]
fn should_delete_only_unpaired_devices() {
    let mut registry = registry();
    registry.create_hub(None);
    let lamp = registry
        .create_device("switch", "Lamp", &no_params())
        .unwrap();
    registry.pair_device(lamp.id).unwrap();

    let err = registry.delete_device(lamp.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeviceInUse);
    assert!(registry.device_info(lamp.id).is_ok());

    registry.remove_device(lamp.id).unwrap();
    registry.delete_device(lamp.id).unwrap();
    assert_eq!(
        registry.device_info(lamp.id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn should_keep_first_hub_when_created_twice() {
    let mut registry = registry();
    let first = registry.create_hub(Some("Main Hub"));
    let second = registry.create_hub(Some("Garage Hub"));

    assert_eq!(first.id, second.id);
    assert_eq!(registry.main_hub_id(), Some(first.id));
    assert_eq!(registry.hub_info().unwrap().name, "Main Hub");
}

// ---------------------------------------------------------------------------
// Modification
// ---------------------------------------------------------------------------

#[test]
fn should_bound_dimmer_brightness() {
    let mut registry = registry();
    let dimmer = registry
        .create_device("dimmer", "Bedroom Light", &no_params())
        .unwrap();
    registry
        .modify_device(dimmer.id, &attributes([("power", "on")]))
        .unwrap();

    let err = registry
        .modify_device(dimmer.id, &attributes([("brightness", 101_i64)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(
        state_json(&registry, dimmer.id),
        json!({"power": "on", "brightness": 0})
    );

    registry
        .modify_device(dimmer.id, &attributes([("brightness", 50_i64)]))
        .unwrap();
    assert_eq!(
        state_json(&registry, dimmer.id),
        json!({"power": "on", "brightness": 50})
    );
}

#[test]
fn should_derive_lock_armed_flag_from_position() {
    let mut registry = registry();
    let door = registry
        .create_device("lock", "Front Door", &no_params())
        .unwrap();

    registry
        .modify_device(door.id, &attributes([("state", "unlocked")]))
        .unwrap();
    assert_eq!(state_json(&registry, door.id)["is_armed"], json!(false));

    registry
        .modify_device(door.id, &attributes([("state", "locked")]))
        .unwrap();
    assert_eq!(state_json(&registry, door.id)["is_armed"], json!(true));
}

#[test]
fn should_derive_thermostat_running_flag() {
    let mut registry = registry();
    let thermostat = registry
        .create_device("thermostat", "Hall", &no_params())
        .unwrap();

    registry
        .modify_device(
            thermostat.id,
            &attributes([
                ("mode", AttributeValue::from("heat")),
                ("target_temperature", AttributeValue::from(72_i64)),
            ]),
        )
        .unwrap();
    assert_eq!(state_json(&registry, thermostat.id)["is_running"], json!(true));

    registry.report_temperature(thermostat.id, 72.0).unwrap();
    assert_eq!(state_json(&registry, thermostat.id)["is_running"], json!(true));

    registry
        .modify_device(thermostat.id, &attributes([("mode", "off")]))
        .unwrap();
    assert_eq!(
        state_json(&registry, thermostat.id),
        json!({
            "current_temperature": 72.0,
            "target_temperature": 72.0,
            "mode": "off",
            "is_running": false
        })
    );
}

#[test]
fn should_reject_fields_the_type_does_not_have() {
    let mut registry = registry();
    let lamp = registry
        .create_device("switch", "Lamp", &no_params())
        .unwrap();

    let err = registry
        .modify_device(
            lamp.id,
            &attributes([
                ("power", AttributeValue::from("on")),
                ("brightness", AttributeValue::from(10_i64)),
            ]),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedAttribute);
    assert_eq!(state_json(&registry, lamp.id), json!({"power": "off"}));
}

#[test]
fn should_unlock_with_configured_pin_only() {
    let mut registry = HomeRegistry::new(
        InMemoryEntityStore::new(),
        RegistryConfig {
            default_lock_pin: "2468".to_string(),
            ..RegistryConfig::default()
        },
    );
    let door = registry
        .create_device("lock", "Front Door", &no_params())
        .unwrap();

    let err = registry.unlock_device(door.id, "0000").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncorrectPin);

    registry.unlock_device(door.id, "2468").unwrap();
    assert_eq!(
        state_json(&registry, door.id),
        json!({"state": "unlocked", "is_armed": false})
    );
}

// ---------------------------------------------------------------------------
// Dwellings
// ---------------------------------------------------------------------------

#[test]
fn should_install_hub_in_one_dwelling_only() {
    let mut registry = registry();
    let hub = registry.create_hub(None);
    let home = registry.create_dwelling("Home", "1 Main St");
    let cabin = registry.create_dwelling("Cabin", "2 Lake Rd");

    registry.install_hub(home.id).unwrap();
    let err = registry.install_hub(cabin.id).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyInstalled);
    assert_eq!(registry.dwelling_info(home.id).unwrap().hub_id(), Some(hub.id));
    assert!(registry.dwelling_info(cabin.id).unwrap().hub_id().is_none());
    assert_eq!(registry.hub_info().unwrap().dwelling_id, Some(home.id));
}

#[test]
fn should_move_hub_after_uninstalling() {
    let mut registry = registry();
    registry.create_hub(None);
    let home = registry.create_dwelling("Home", "1 Main St");
    let cabin = registry.create_dwelling("Cabin", "2 Lake Rd");
    registry.install_hub(home.id).unwrap();

    registry.uninstall_hub(home.id).unwrap();
    registry.install_hub(cabin.id).unwrap();

    assert!(registry.dwelling_info(home.id).unwrap().hub_id().is_none());
    assert_eq!(registry.hub_info().unwrap().dwelling_id, Some(cabin.id));
}

#[test]
fn should_track_occupancy() {
    let mut registry = registry();
    let home = registry.create_dwelling("Home", "1 Main St");

    registry.set_dwelling_occupied(home.id, true).unwrap();

    assert!(registry.dwelling_info(home.id).unwrap().is_occupied);
    assert_eq!(registry.list_dwellings().len(), 1);
}

// ---------------------------------------------------------------------------
// Serialized shapes
// ---------------------------------------------------------------------------

#[test]
fn should_serialize_snapshots_with_exact_field_sets() {
    let mut registry = registry();
    let hub = registry.create_hub(None);
    let home = registry.create_dwelling("Home", "1 Main St");
    let door = registry
        .create_device("lock", "Front Door", &attributes([("pin", "5678")]))
        .unwrap();

    let device = serde_json::to_value(registry.device_info(door.id).unwrap()).unwrap();
    assert_eq!(
        keys(&device),
        BTreeSet::from([
            "id",
            "name",
            "device_type",
            "created_at",
            "is_paired",
            "hub_id",
            "state"
        ])
    );
    assert!(!device.to_string().contains("5678"));

    let hub_json = serde_json::to_value(registry.hub_info().unwrap()).unwrap();
    assert_eq!(
        keys(&hub_json),
        BTreeSet::from(["id", "name", "created_at", "dwelling_id", "paired_devices_count"])
    );
    assert_eq!(hub_json["id"], json!(hub.id.to_string()));

    let dwelling = serde_json::to_value(registry.dwelling_info(home.id).unwrap()).unwrap();
    assert_eq!(
        keys(&dwelling),
        BTreeSet::from(["id", "name", "address", "is_occupied", "hub_id"])
    );
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn should_run_switch_through_its_whole_life() {
    let mut registry = registry();
    registry.create_hub(Some("Main Hub"));
    let lamp = registry
        .create_device("switch", "Lamp", &no_params())
        .unwrap();

    assert_eq!(registry.devices_by_type("switch").unwrap().len(), 1);

    registry.pair_device(lamp.id).unwrap();
    let hub_devices: Vec<_> = registry.hub_devices().into_iter().map(|d| d.id).collect();
    assert_eq!(hub_devices, [lamp.id]);

    registry
        .modify_device(lamp.id, &attributes([("power", "on")]))
        .unwrap();
    assert_eq!(
        registry.device_state(lamp.id).unwrap(),
        DeviceState::Switch(SwitchState { power: Power::On })
    );

    registry.remove_device(lamp.id).unwrap();
    registry.delete_device(lamp.id).unwrap();
    assert!(registry.list_devices().iter().all(|d| d.id != lamp.id));
}

#[test]
fn should_serialize_concurrent_pairings() {
    let shared = SharedRegistry::new(registry());
    let lamp = shared.with(|registry| {
        registry.create_hub(None);
        registry
            .create_device("switch", "Lamp", &no_params())
            .unwrap()
    });

    let successes = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| shared.with(|registry| registry.pair_device(lamp.id))))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(Result::is_ok)
            .count()
    });

    assert_eq!(successes, 1);
    assert_eq!(shared.lock().hub_info().unwrap().paired_devices_count, 1);
}
