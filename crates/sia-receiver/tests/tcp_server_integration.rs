//! Integration tests for SiaServer
//!
//! These tests drive a real server over TCP and UDP and check the reply bytes
//! a panel would see, plus the events handed to collaborators.

mod common;

use common::*;
use sia_core::constants::NAK_BODY;
use sia_receiver::{
    AlarmState, DeviceClass, DeviceKey, DeviceState, ReceiverEvent, ServerError, SiaServer,
    Transport,
};
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::time::timeout;

#[tokio::test]
async fn test_plain_line_is_acked() {
    let (server, mut events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel
        .send("58270033\"SIA-DCS\"0002L0#ABC123[N/CL501]_14:12:04,09-25-2019")
        .await;

    let reply = panel.reply().await.unwrap();
    assert_eq!(reply, b"\nC4220014\"ACK\"0002L0#ABC123[]\r");

    let event = next_event(&mut events).await;
    assert_eq!(event.account.as_str(), PLAIN_ACCOUNT);
    assert_eq!(event.code.as_deref(), Some("CL"));
    assert_eq!(event.zone, 0);
    assert_eq!(event.sequence, "0002");

    server.stop().await;
}

#[tokio::test]
async fn test_encrypted_line_is_acked_with_cached_terminator() {
    let (server, mut events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel.send(&encrypted_line(7, Some(1), "BA", "01")).await;
    panel.send(&encrypted_line(8, Some(1), "BR", "01")).await;

    let first = panel.reply_body().await;
    let second = panel.reply_body().await;

    assert!(first.starts_with("\"*ACK\"0007L0#1234["));
    assert!(second.starts_with("\"*ACK\"0008L0#1234["));
    let terminator = &first["\"*ACK\"0007L0#1234[".len()..];
    assert_eq!(terminator.len(), 32);
    assert!(second.ends_with(terminator));

    let event = next_event(&mut events).await;
    assert!(event.encrypted);
    assert_eq!(event.code.as_deref(), Some("BA"));
    assert_eq!(event.zone, 1);
    assert_eq!(event.message, "01");

    server.stop().await;
}

#[tokio::test]
async fn test_bad_checksum_is_naked_and_connection_continues() {
    let (server, mut events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel
        .send(&flip_checksum(&plain_line(1, Some(1), "BA", "")))
        .await;
    let body = panel.reply_body().await;
    assert!(body.starts_with(NAK_BODY));
    assert_eq!(body.len(), NAK_BODY.len() + 20);

    panel.send(&plain_line(2, Some(1), "BA", "")).await;
    assert_eq!(panel.reply_body().await, "\"ACK\"0002L0#ABC123[]");

    // Only the second line produced an event.
    let event = next_event(&mut events).await;
    assert_eq!(event.sequence, "0002");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_account_is_naked() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    let line = sia_protocol::LineBuilder::new("FFFF")
        .event(None, "RP", "")
        .build();
    panel.send(&line).await;

    let body = panel.reply_body().await;
    assert!(body.starts_with(NAK_BODY));
    assert!(!body.contains("FFFF"));

    server.stop().await;
}

#[tokio::test]
async fn test_garbage_is_naked() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel.send_raw(b"GET / HTTP/1.1\r\nHost: receiver\r").await;

    // Two non-empty lines, two NAKs.
    assert!(panel.reply_body().await.starts_with(NAK_BODY));
    assert!(panel.reply_body().await.starts_with(NAK_BODY));

    panel.send(&plain_line(3, None, "RP", "")).await;
    assert_eq!(panel.reply_body().await, "\"ACK\"0003L0#ABC123[]");

    server.stop().await;
}

#[tokio::test]
async fn test_lines_in_one_write_get_ordered_replies() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    let mut batch = Vec::new();
    for sequence in 1..=5 {
        batch.extend_from_slice(&sia_protocol::builder::to_wire(&plain_line(
            sequence,
            Some(1),
            "WA",
            "",
        )));
    }
    panel.send_raw(&batch).await;

    for sequence in 1..=5 {
        assert_eq!(
            panel.reply_body().await,
            format!("\"ACK\"{sequence:04}L0#ABC123[]")
        );
    }

    server.stop().await;
}

#[tokio::test]
async fn test_line_split_across_writes() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    let wire = sia_protocol::builder::to_wire(&plain_line(9, Some(2), "GA", ""));
    for chunk in wire.chunks(7) {
        panel.send_raw(chunk).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    assert_eq!(panel.reply_body().await, "\"ACK\"0009L0#ABC123[]");
    server.stop().await;
}

#[tokio::test]
async fn test_oversized_line_is_naked_and_stream_resyncs() {
    let mut config = config(Transport::Tcp);
    config.server.max_line_length = 128;
    let (server, _events) = start(config).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    let mut oversized = vec![b'\n'];
    oversized.extend(std::iter::repeat_n(b'A', 500));
    oversized.push(b'\r');
    panel.send_raw(&oversized).await;
    assert!(panel.reply_body().await.starts_with(NAK_BODY));

    panel.send(&plain_line(4, Some(1), "RP", "")).await;
    assert_eq!(panel.reply_body().await, "\"ACK\"0004L0#ABC123[]");

    server.stop().await;
}

#[tokio::test]
async fn test_devices_follow_reactions() {
    let (server, mut events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    for (sequence, code) in [(1, "CA"), (2, "BA"), (3, "BR")] {
        panel.send(&plain_line(sequence, Some(2), code, "")).await;
        panel.reply_body().await;
        next_event(&mut events).await;
    }

    let account = sia_core::AccountId::new(PLAIN_ACCOUNT).unwrap();
    let session = server.registry().get(&account).unwrap();
    let alarm = session
        .device(DeviceKey::new(2, DeviceClass::Alarm))
        .unwrap()
        .unwrap();
    assert_eq!(alarm.current, DeviceState::Alarm(AlarmState::ArmedAway));
    assert_eq!(alarm.previous, DeviceState::Alarm(AlarmState::Triggered));

    server.stop().await;
}

#[tokio::test]
async fn test_first_event_reports_availability() {
    let (server, mut events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel.send(&plain_line(1, None, "RP", "")).await;
    panel.reply_body().await;

    let change = loop {
        match timeout(WAIT, events.recv()).await.unwrap().unwrap() {
            ReceiverEvent::Availability(change) => break change,
            ReceiverEvent::Event(event) => assert_eq!(event.code.as_deref(), Some("RP")),
        }
    };
    assert_eq!(change.account.as_str(), PLAIN_ACCOUNT);
    assert_eq!(change.device, None);
    assert!(change.available);

    let account = sia_core::AccountId::new(PLAIN_ACCOUNT).unwrap();
    assert!(server.availability().is_available(&account));

    server.stop().await;
}

#[tokio::test]
async fn test_multiple_concurrent_panels() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let addr = server.local_addr();

    let mut tasks = Vec::new();
    for panel_no in 0..5u16 {
        tasks.push(tokio::spawn(async move {
            let mut panel = Panel::connect(addr).await;
            for i in 0..10u16 {
                let sequence = panel_no * 100 + i;
                panel.send(&plain_line(sequence, Some(1), "RP", "")).await;
                assert_eq!(
                    panel.reply_body().await,
                    format!("\"ACK\"{sequence:04}L0#ABC123[]")
                );
            }
        }));
    }

    for task in tasks {
        timeout(WAIT, task).await.unwrap().unwrap();
    }

    server.stop().await;
}

#[tokio::test]
async fn test_max_connections_rejects_excess() {
    let mut config = config(Transport::Tcp);
    config.server.max_connections = 1;
    let (server, _events) = start(config).await;

    let mut first = Panel::connect(server.local_addr()).await;
    first.send(&plain_line(1, None, "RP", "")).await;
    first.reply_body().await;

    // Accepted by the kernel, then closed by the receiver without a reply.
    let mut second = Panel::connect(server.local_addr()).await;
    assert_eq!(second.reply().await, None);

    // The first connection is unaffected.
    first.send(&plain_line(3, None, "RP", "")).await;
    assert_eq!(first.reply_body().await, "\"ACK\"0003L0#ABC123[]");

    server.stop().await;
}

#[tokio::test]
async fn test_repeated_internal_errors_close_connection() {
    let mut config = config(Transport::Tcp);
    config.server.event_buffer = 1;
    // Nobody drains the events, so every line after the first is refused.
    let (server, _events) = start(config).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    // One accepted line, then one refusal past the limit.
    let mut batch = Vec::new();
    for sequence in 1..=7 {
        batch.extend_from_slice(&sia_protocol::builder::to_wire(&plain_line(
            sequence,
            Some(1),
            "RP",
            "",
        )));
    }
    panel.send_raw(&batch).await;

    assert_eq!(panel.reply_body().await, "\"ACK\"0001L0#ABC123[]");
    for _ in 0..6 {
        assert!(panel.reply_body().await.starts_with(NAK_BODY));
    }
    assert_eq!(panel.reply().await, None);

    server.stop().await;
}

#[tokio::test]
async fn test_stop_closes_connections() {
    let (server, _events) = start(config(Transport::Tcp)).await;
    let mut panel = Panel::connect(server.local_addr()).await;

    panel.send(&plain_line(1, None, "RP", "")).await;
    panel.reply_body().await;

    timeout(WAIT, server.stop()).await.unwrap();
    assert_eq!(panel.reply().await, None);
}

#[tokio::test]
async fn test_bind_failure() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = config(Transport::Tcp);
    config.server.bind_addr = taken.local_addr().unwrap();

    let result = SiaServer::bind(config).await;
    assert!(matches!(result, Err(ServerError::BindFailed { .. })));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let mut config = config(Transport::Tcp);
    config.accounts.clear();

    let result = SiaServer::bind(config).await;
    assert!(matches!(result, Err(ServerError::Config(_))));
}

#[tokio::test]
async fn test_start_twice() {
    let mut server = SiaServer::bind(config(Transport::Tcp)).await.unwrap();
    server.start().unwrap();

    assert!(matches!(server.start(), Err(ServerError::AlreadyStarted)));
    assert!(server.is_running());

    server.stop().await;
}

#[tokio::test]
async fn test_udp_datagram_is_acked() {
    let (server, mut events) = start(config(Transport::Udp)).await;

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.connect(server.local_addr()).await.unwrap();

    let mut datagram = sia_protocol::builder::to_wire(&plain_line(5, Some(1), "WA", "")).to_vec();
    datagram.extend_from_slice(&sia_protocol::builder::to_wire(&encrypted_line(6, None, "RP", "")));
    socket.send(&datagram).await.unwrap();

    let mut buffer = [0u8; 512];
    let len = timeout(WAIT, socket.recv(&mut buffer)).await.unwrap().unwrap();
    assert_reply_is_consistent(&buffer[..len]);
    assert!(buffer[..len].ends_with(b"\"ACK\"0005L0#ABC123[]\r"));

    let len = timeout(WAIT, socket.recv(&mut buffer)).await.unwrap().unwrap();
    assert_reply_is_consistent(&buffer[..len]);
    assert!(std::str::from_utf8(&buffer[9..len]).unwrap().starts_with("\"*ACK\"0006L0#1234["));

    let event = next_event(&mut events).await;
    assert_eq!(event.code.as_deref(), Some("WA"));

    server.stop().await;
}
