//! Integration tests for RelayService events and failure handling.

use serial_relay::app::command::{RelayCommand, RelayState};
use serial_relay::app::events::{AppEvent, RelayStatus};
use serial_relay::app::service::{PollOutcome, RelayService};
use serial_relay::config::RelayConfig;
use serial_relay::error::{GpioError, SerialError};

use super::mock_hw::{EventLog, MockRelay, MockUart};

fn make_app() -> (RelayService, MockUart, MockRelay, EventLog) {
    let mut app = RelayService::new(RelayConfig::default());
    let uart = MockUart::new();
    let mut relay = MockRelay::new();
    let mut log = EventLog::new();
    app.start(&mut relay, &mut log);
    (app, uart, relay, log)
}

#[test]
fn start_emits_started_off() {
    let (_app, _uart, relay, log) = make_app();
    assert_eq!(relay.drives, vec![RelayState::Off]);
    assert_eq!(log.events, vec![AppEvent::Started(RelayState::Off)]);
}

#[test]
fn command_event_precedes_state_change() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    log.events.clear();

    uart.send(b"1\n");
    app.poll(&mut uart, &mut relay, &mut log);

    assert_eq!(
        log.events,
        vec![
            AppEvent::CommandReceived {
                command: RelayCommand::On,
                len: 2
            },
            AppEvent::StateChanged {
                from: RelayState::Off,
                to: RelayState::On
            },
        ]
    );
}

#[test]
fn state_change_only_emitted_on_transition() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    for cmd in [&b"1"[..], b"1", b"0", b"0", b"1"] {
        uart.send(cmd);
        app.poll(&mut uart, &mut relay, &mut log);
    }
    assert_eq!(
        log.state_changes(),
        vec![
            (RelayState::Off, RelayState::On),
            (RelayState::On, RelayState::Off),
            (RelayState::Off, RelayState::On),
        ]
    );
    // Every command drives the pin, changed or not.
    assert_eq!(relay.drives.len(), 6);
}

#[test]
fn status_failure_holds_state() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    uart.send(b"1");
    app.poll(&mut uart, &mut relay, &mut log);

    uart.fail_status = true;
    uart.send(b"0");
    assert_eq!(app.poll(&mut uart, &mut relay, &mut log), PollOutcome::Idle);
    assert_eq!(app.state(), RelayState::On);
    assert_eq!(
        log.events.last(),
        Some(&AppEvent::SerialFault(SerialError::StatusFailed))
    );
}

#[test]
fn read_failure_holds_state() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    uart.fail_read = true;
    uart.send(b"1\n");
    assert_eq!(app.poll(&mut uart, &mut relay, &mut log), PollOutcome::Idle);
    assert_eq!(app.state(), RelayState::Off);
    assert_eq!(relay.drives, vec![RelayState::Off]);
    assert_eq!(
        log.events.last(),
        Some(&AppEvent::SerialFault(SerialError::ReadFailed))
    );
}

#[test]
fn drive_failure_still_records_commanded_state() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    relay.fail = true;
    uart.send(b"1");
    assert_eq!(
        app.poll(&mut uart, &mut relay, &mut log),
        PollOutcome::Applied(RelayCommand::On)
    );
    assert_eq!(app.state(), RelayState::On);
    assert!(log
        .events
        .contains(&AppEvent::ActuationFailed(GpioError::WriteFailed)));
}

#[test]
fn status_snapshot_counts_cycles_and_commands() {
    let (mut app, mut uart, mut relay, mut log) = make_app();
    app.poll(&mut uart, &mut relay, &mut log);
    uart.send(b"1");
    app.poll(&mut uart, &mut relay, &mut log);
    app.poll(&mut uart, &mut relay, &mut log);

    assert_eq!(
        app.status(),
        RelayStatus {
            state: RelayState::On,
            cycles: 3,
            commands: 1,
            last_command: Some(RelayCommand::On),
        }
    );
    assert_eq!(app.cycles(), 3);
}
