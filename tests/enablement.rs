//! Enabled-namespace gating: auto, skip, DEBUG list and later enable().

use debug_bridge::{debug_log, Bridge, BridgeConfig, Level};

mod common;

#[test]
fn test_skip_overrides_auto() {
    let config = BridgeConfig::new()
        .with_route("ns*", Level::Info)
        .with_skip("ns2");
    let (logger, buffer) = common::capture_logger(Level::Debug);
    let bridge = Bridge::with_enablement(&config, logger, Vec::<String>::new());

    assert!(!bridge.is_enabled("ns2"));
    assert!(bridge.is_enabled("ns"));

    debug_log!(bridge.debugger("ns2"), "test2");
    debug_log!(bridge.debugger("ns"), "test");

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ns"], "ns");
    assert_eq!(records[0]["msg"], "test");
    assert_eq!(records[0]["level"], 30);
}

#[test]
fn test_auto_off_and_not_enabled_emits_nothing() {
    let config = BridgeConfig::new()
        .with_route("ns", Level::Info)
        .with_route("ns2", Level::Warn)
        .with_auto(false);
    let (logger, buffer) = common::capture_logger(Level::Debug);
    let bridge = Bridge::with_enablement(&config, logger, ["ns2"]);

    assert!(!bridge.is_enabled("ns"));
    assert_eq!(bridge.lookup("ns"), None);

    debug_log!(bridge.debugger("ns"), "test");
    debug_log!(bridge.debugger("ns2"), "test2");

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ns"], "ns2");
    assert_eq!(records[0]["msg"], "test2");
    assert_eq!(records[0]["level"], 40);
}

#[test]
fn test_auto_off_enable_later() {
    let config = BridgeConfig::new()
        .with_route("ns", Level::Info)
        .with_route("ns2", Level::Warn)
        .with_auto(false);
    let (logger, buffer) = common::capture_logger(Level::Debug);
    let bridge = Bridge::with_enablement(&config, logger, Vec::<String>::new());

    bridge.enable("ns");
    debug_log!(bridge.debugger("ns"), "test");
    bridge.enable("ns2");
    debug_log!(bridge.debugger("ns2"), "test2");

    let records = buffer.records();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0]["ns"].as_str(), records[0]["level"].as_u64()), (Some("ns"), Some(30)));
    assert_eq!((records[1]["ns"].as_str(), records[1]["level"].as_u64()), (Some("ns2"), Some(40)));
}

#[test]
fn test_debug_list_enables_unmapped_namespaces() {
    let (logger, buffer) = common::capture_logger(Level::Debug);
    let bridge = Bridge::with_enablement(&BridgeConfig::default(), logger, ["ns1"]);

    debug_log!(bridge.debugger("ns1"), "test");
    debug_log!(bridge.debugger("ns2"), "dropped");

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ns"], "ns1");
}

#[test]
fn test_sink_min_level_still_applies() {
    let config = BridgeConfig::new().with_route("chatty", Level::Trace);
    let (logger, buffer) = common::capture_logger(Level::Debug);
    let bridge = Bridge::with_enablement(&config, logger, Vec::<String>::new());

    let dbg = bridge.debugger("chatty");
    assert!(dbg.enabled());
    assert_eq!(dbg.level(), Level::Trace);
    debug_log!(dbg, "below the sink threshold");
    assert!(buffer.records().is_empty());
}
