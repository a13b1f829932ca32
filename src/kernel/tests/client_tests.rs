// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Modem Kernel Client Tests

use std::sync::Arc;
use std::thread;

use super::fakes::*;
use crate::err::Error;
use crate::kernel::dev::modem::*;

type TestClient = KernelClient<FakeClock, Arc<RecordingTransport>>;

const ENABLE_REQ: [u8; 2] = [SysClkMsgType::EnableRequest as u8, 0];
const DISABLE_REQ: [u8; 2] = [SysClkMsgType::DisableRequest as u8, 0];

fn start_client(provider: &mut FakeClockProvider) -> (TestClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let client = KernelClient::init(ClientConfig::default(), provider, Arc::clone(&transport))
        .expect("init");
    (client, transport)
}

// ============================================================================
// Init / exit
// ============================================================================

#[test]
fn test_init_acquires_sysclk2() {
    let mut provider = FakeClockProvider::new();
    let (client, _) = start_client(&mut provider);

    assert_eq!(provider.requested, vec!["sysclk2".to_string()]);
    assert_eq!(client.config().l2_header, SYSCLK2_MESSAGING);
    assert!(!client.has_pending());
}

#[test]
fn test_init_fails_without_clock() {
    let mut provider = FakeClockProvider::missing(Error::NotFound);
    let res = KernelClient::init(ClientConfig::default(), &mut provider, RecordingTransport::new());

    assert!(matches!(res, Err(Error::NotFound)));
}

#[test]
fn test_exit_releases_clock() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    client.exit();

    assert!(provider.state.released());
    assert!(transport.sent().is_empty());
}

#[test]
fn test_exit_serves_queued_request_first() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ), Dispatch::Queued);
    client.exit();

    assert!(provider.state.enabled());
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![1, 0])]);
    assert!(provider.state.released());
}

// ============================================================================
// Dispatcher
// ============================================================================

#[test]
fn test_unknown_channel_is_ignored() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(0x01, &ENABLE_REQ), Dispatch::UnknownChannel);

    assert!(!client.has_pending());
    assert!(!client.run_pending());
    assert_eq!(provider.state.enable_calls(), 0);
    assert!(transport.sent().is_empty());
}

#[test]
fn test_unknown_channel_leaves_pending_request_alone() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ), Dispatch::Queued);
    assert_eq!(client.dispatch(0x01, &DISABLE_REQ), Dispatch::UnknownChannel);

    assert!(client.run_pending());

    assert!(provider.state.enabled());
    assert_eq!(provider.state.enable_calls(), 1);
    assert_eq!(provider.state.disable_calls(), 0);
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![1, 0])]);
}

#[test]
fn test_short_payload_is_ignored() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &[0]), Dispatch::Malformed);
    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &[]), Dispatch::Malformed);

    assert!(!client.run_pending());
    assert!(transport.sent().is_empty());
}

#[test]
fn test_dispatch_does_not_touch_clock() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ), Dispatch::Queued);

    assert!(client.has_pending());
    assert_eq!(provider.state.enable_calls(), 0);
    assert!(transport.sent().is_empty());
}

// ============================================================================
// Worker
// ============================================================================

#[test]
fn test_enable_request_success() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ);
    assert!(client.run_pending());

    assert!(provider.state.enabled());
    assert_eq!(
        transport.sent(),
        vec![(
            SYSCLK2_MESSAGING,
            SysClkMsg::response(SysClkMsgType::EnableResponse, SysClkParam::Success)
                .to_bytes()
                .to_vec()
        )]
    );
    assert!(!client.run_pending());
}

#[test]
fn test_enable_request_failure() {
    let mut provider = FakeClockProvider::failing_enable();
    let (client, transport) = start_client(&mut provider);

    client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ);
    assert!(client.run_pending());

    assert!(!provider.state.enabled());
    assert_eq!(provider.state.enable_calls(), 1);
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![1, 1])]);
}

#[test]
fn test_disable_request_always_succeeds() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ);
    client.run_pending();
    client.dispatch(SYSCLK2_MESSAGING, &DISABLE_REQ);
    client.run_pending();

    assert!(!provider.state.enabled());
    assert_eq!(provider.state.disable_calls(), 1);
    assert_eq!(
        transport.sent(),
        vec![(SYSCLK2_MESSAGING, vec![1, 0]), (SYSCLK2_MESSAGING, vec![3, 0])]
    );
}

#[test]
fn test_disable_without_enable_still_answers() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    client.dispatch(SYSCLK2_MESSAGING, &DISABLE_REQ);
    client.run_pending();

    assert_eq!(provider.state.disable_calls(), 1);
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![3, 0])]);
}

#[test]
fn test_responses_and_unknown_types_are_dropped() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    for msg_type in [1u8, 3, 4, 0xff] {
        client.dispatch(SYSCLK2_MESSAGING, &[msg_type, 0]);
        assert!(client.run_pending());
    }

    assert_eq!(provider.state.enable_calls(), 0);
    assert_eq!(provider.state.disable_calls(), 0);
    assert!(transport.sent().is_empty());
}

#[test]
fn test_second_request_overwrites_unserved_first() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ), Dispatch::Queued);
    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &DISABLE_REQ), Dispatch::Overwritten);

    assert!(client.run_pending());
    assert!(!client.run_pending());

    // Only the newer request was served
    assert_eq!(provider.state.enable_calls(), 0);
    assert_eq!(provider.state.disable_calls(), 1);
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![3, 0])]);
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);

    client.dispatch(SYSCLK2_MESSAGING, &[0, 0, 0xaa, 0xbb]);
    client.run_pending();

    assert!(provider.state.enabled());
    assert_eq!(transport.sent(), vec![(SYSCLK2_MESSAGING, vec![1, 0])]);
}

#[test]
fn test_transport_failure_is_not_fatal() {
    let mut provider = FakeClockProvider::new();
    let transport = RecordingTransport::failing();
    let client = KernelClient::init(ClientConfig::default(), &mut provider, &transport).unwrap();

    client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ);
    assert!(client.run_pending());
    client.dispatch(SYSCLK2_MESSAGING, &DISABLE_REQ);
    assert!(client.run_pending());

    assert_eq!(transport.sent().len(), 2);
    assert!(!provider.state.enabled());
}

#[test]
fn test_custom_channel() {
    let mut provider = FakeClockProvider::new();
    let transport = RecordingTransport::new();
    let config = ClientConfig {
        l2_header: 0x42,
        ..ClientConfig::default()
    };
    let client = KernelClient::init(config, &mut provider, &transport).unwrap();

    assert_eq!(client.dispatch(SYSCLK2_MESSAGING, &ENABLE_REQ), Dispatch::UnknownChannel);
    assert_eq!(client.dispatch(0x42, &ENABLE_REQ), Dispatch::Queued);
    client.run_pending();

    assert_eq!(transport.sent(), vec![(0x42, vec![1, 0])]);
}

#[test]
fn test_dispatch_from_other_thread_while_worker_runs() {
    let mut provider = FakeClockProvider::new();
    let (client, transport) = start_client(&mut provider);
    let client = Arc::new(client);

    let dispatcher = {
        let client = Arc::clone(&client);
        thread::spawn(move || {
            for i in 0..200 {
                let req = if i % 2 == 0 { ENABLE_REQ } else { DISABLE_REQ };
                client.dispatch(SYSCLK2_MESSAGING, &req);
            }
        })
    };

    let mut runs = 0;
    while !dispatcher.is_finished() {
        if client.run_pending() {
            runs += 1;
        }
    }
    dispatcher.join().unwrap();
    while client.run_pending() {
        runs += 1;
    }

    // Every run answers exactly one request; overwritten ones get nothing
    let sent = transport.sent();
    assert!(sent.len() <= 200);
    assert!(sent.len() <= runs);
    assert!(!client.has_pending());
    // The last request sent was a disable, and it is never lost
    assert_eq!(sent.last().map(|(_, msg)| msg.clone()), Some(vec![3, 0]));
}
