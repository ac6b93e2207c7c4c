//! Queue ordering and starvation-avoidance tests for the event bridge.

use std::sync::{Arc, Mutex};
use std::thread;

use mesh_bridge::{BridgeConfig, EventBridge};
use mesh_core::{
    BufferInfo, Engine, EngineFault, EventKind, ExtAddress, QueueClass, WakeSignal,
};

/// Engine that only records what it is handed.
#[derive(Clone, Default)]
struct RecordingEngine {
    log: Arc<Mutex<Vec<(EventKind, usize)>>>,
}

impl RecordingEngine {
    fn record(&self, kind: EventKind, arg: usize) -> Result<(), EngineFault> {
        self.log.lock().unwrap().push((kind, arg));
        Ok(())
    }
}

impl Engine for RecordingEngine {
    fn bind(&mut self, _wake: WakeSignal) -> Result<(), EngineFault> {
        Ok(())
    }

    fn process_tasklets(&mut self) -> Result<(), EngineFault> {
        self.record(EventKind::TaskletsPending, 0)
    }

    fn handle_alarm(&mut self) -> Result<(), EngineFault> {
        self.record(EventKind::Alarm, 0)
    }

    fn handle_alarm_micro(&mut self) -> Result<(), EngineFault> {
        self.record(EventKind::AlarmMicro, 0)
    }

    fn handle_radio(&mut self, arg: usize) -> Result<(), EngineFault> {
        self.record(EventKind::Radio, arg)
    }

    fn handle_uart(&mut self, arg: usize) -> Result<(), EngineFault> {
        self.record(EventKind::Uart, arg)
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn ext_address(&self) -> ExtAddress {
        ExtAddress::default()
    }

    fn buffer_info(&self) -> BufferInfo {
        BufferInfo::default()
    }
}

fn noop_wake() {}

fn init(bridge: &EventBridge<64, 16>) -> Arc<Mutex<Vec<(EventKind, usize)>>> {
    let engine = RecordingEngine::default();
    let log = engine.log.clone();
    bridge
        .init_stack(Box::leak(Box::new(engine)), noop_wake)
        .unwrap();
    log
}

#[test]
fn concurrent_producers_preserve_per_thread_fifo() {
    const PRODUCERS: usize = 3;
    const PER_PRODUCER: usize = 10;

    let bridge: EventBridge<64, 16> = EventBridge::new();
    let log = init(&bridge);

    thread::scope(|scope| {
        for producer in 0..PRODUCERS {
            let bridge = &bridge;
            scope.spawn(move || {
                for seq in 0..PER_PRODUCER {
                    bridge
                        .signal_event(EventKind::Uart, producer * 100 + seq)
                        .unwrap();
                }
            });
        }
    });

    let mut total = 0;
    while bridge.pending_events() > 0 {
        total += bridge.process_pending_events().unwrap();
    }
    assert_eq!(total, PRODUCERS * PER_PRODUCER);

    // The consumer-observed order is some interleaving that preserves each
    // producer's own sequence.
    let entries = log.lock().unwrap();
    for producer in 0..PRODUCERS {
        let observed: Vec<usize> = entries
            .iter()
            .filter(|(_, arg)| arg / 100 == producer)
            .map(|(_, arg)| arg % 100)
            .collect();
        assert_eq!(observed, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
}

#[test]
fn radio_drains_before_normal_in_a_pass() {
    let bridge: EventBridge<64, 16> = EventBridge::new();
    let log = init(&bridge);

    // Interleave normal and radio producers
    bridge.signal_event(EventKind::Alarm, 0).unwrap();
    bridge.signal_event(EventKind::Radio, 1).unwrap();
    bridge.signal_event(EventKind::Uart, 2).unwrap();
    bridge.signal_event(EventKind::Radio, 3).unwrap();

    assert_eq!(bridge.process_pending_events().unwrap(), 4);

    let entries = log.lock().unwrap();
    let kinds: Vec<QueueClass> = entries.iter().map(|(k, _)| k.queue_class()).collect();
    assert_eq!(
        kinds,
        &[
            QueueClass::Radio,
            QueueClass::Radio,
            QueueClass::Normal,
            QueueClass::Normal,
        ]
    );
    // FIFO within each queue
    assert_eq!(entries[0], (EventKind::Radio, 1));
    assert_eq!(entries[1], (EventKind::Radio, 3));
    assert_eq!(entries[2], (EventKind::Alarm, 0));
    assert_eq!(entries[3], (EventKind::Uart, 2));
}

#[test]
fn radio_burst_cap_keeps_normal_queue_live() {
    let config = BridgeConfig::new().with_radio_burst(2);
    let bridge: EventBridge<64, 16> = EventBridge::with_config(config);
    let log = init(&bridge);

    for seq in 0..5 {
        bridge.signal_event(EventKind::Radio, seq).unwrap();
    }
    bridge.signal_event(EventKind::Alarm, 0).unwrap();
    bridge.signal_event(EventKind::Uart, 0).unwrap();

    // First pass: two radio events (the cap), then the waiting normal
    // backlog; normal traffic is delayed by at most one capped radio drain.
    assert_eq!(bridge.process_pending_events().unwrap(), 4);
    {
        let entries = log.lock().unwrap();
        assert_eq!(
            entries.as_slice(),
            &[
                (EventKind::Radio, 0),
                (EventKind::Radio, 1),
                (EventKind::Alarm, 0),
                (EventKind::Uart, 0),
            ]
        );
    }

    // Remaining radio events drain on later passes, still in order
    assert_eq!(bridge.process_pending_events().unwrap(), 2);
    assert_eq!(bridge.process_pending_events().unwrap(), 1);
    let entries = log.lock().unwrap();
    let radio: Vec<usize> = entries
        .iter()
        .filter(|(k, _)| *k == EventKind::Radio)
        .map(|(_, arg)| *arg)
        .collect();
    assert_eq!(radio, vec![0, 1, 2, 3, 4]);
}

#[test]
fn full_radio_queue_does_not_block_normal_signals() {
    let bridge: EventBridge<4, 2> = EventBridge::new();
    let engine = RecordingEngine::default();
    bridge
        .init_stack(Box::leak(Box::new(engine)), noop_wake)
        .unwrap();

    bridge.signal_event(EventKind::Radio, 0).unwrap();
    bridge.signal_event(EventKind::Radio, 1).unwrap();
    assert!(bridge.signal_event(EventKind::Radio, 2).is_err());

    // Independent backing storage: the saturated radio queue leaves the
    // normal queue untouched.
    bridge.signal_event(EventKind::Alarm, 0).unwrap();
    assert_eq!(bridge.pending_events(), 3);
    assert_eq!(bridge.dropped_events(), 1);
}
