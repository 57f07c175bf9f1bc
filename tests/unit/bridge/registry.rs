use super::*;
use serde_json::json;

#[test]
fn first_registration_wins() {
    let mut reg = TimingRegistry::new();
    assert_eq!(reg.register(ElementKey::new("hp-bar"), 1000.0), 1000.0);
    assert_eq!(reg.register(ElementKey::new("hp-bar"), 1400.0), 1000.0);
    assert_eq!(reg.get(&ElementKey::new("hp-bar")), Some(1000.0));
    assert_eq!(reg.len(), 1);
}

#[test]
fn remount_is_a_separate_instance() {
    let mut reg = TimingRegistry::new();
    let first = ElementKey::new("toast");
    let second = first.remount();
    reg.register(first.clone(), 10.0);
    reg.register(second.clone(), 500.0);
    assert_eq!(reg.get(&first), Some(10.0));
    assert_eq!(reg.get(&second), Some(500.0));
    assert_eq!(second.epoch, 1);
}

#[test]
fn key_encoding() {
    assert_eq!(ElementKey::new("panel").encode(), "panel");
    assert_eq!(ElementKey::with_epoch("panel", 3).encode(), "panel@3");
    assert_eq!(ElementKey::decode("panel@3"), ElementKey::with_epoch("panel", 3));
    assert_eq!(ElementKey::decode("mail@home"), ElementKey::new("mail@home"));

    // Ids containing the separator keep an explicit epoch so they decode unchanged.
    let tricky = ElementKey::new("a@7");
    assert_eq!(tricky.encode(), "a@7@0");
    assert_eq!(ElementKey::decode(&tricky.encode()), tricky);
}

#[test]
fn serializes_as_flat_string_to_number_map() {
    let mut reg = TimingRegistry::new();
    reg.register(ElementKey::new("panel"), 600.0);
    reg.register(ElementKey::with_epoch("toast", 2), 1250.5);

    let v = serde_json::to_value(&reg).unwrap();
    assert_eq!(v, json!({ "panel": 600.0, "toast@2": 1250.5 }));

    let back: TimingRegistry = serde_json::from_value(v).unwrap();
    assert_eq!(back, reg);
}
