//! Client Tests
//!
//! End-to-end tests against a scripted in-process TCP server.

use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use iqdb::error::IqdbError;
use iqdb::network::Session;
use iqdb::{Client, Config, QueryFlags};

// =============================================================================
// Scripted Server
// =============================================================================

/// Spawn a one-shot server; the script gets the accepted connection.
fn spawn_server<F>(script: F) -> (String, JoinHandle<()>)
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        script(stream);
    });

    (addr, handle)
}

/// Read one `\r\n`-terminated command line
fn read_command_line(reader: &mut impl BufRead) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read command");
    line.trim_end().to_string()
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_query_round_trip() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "query 0 0 10 test.jpg");

        writer
            .write_all(b"100 Matches follow\n200 1a 0.95 100 200\n200 ff 0.50 64 64\n000 \n")
            .expect("write reply");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let results = client
        .query(0, QueryFlags::NONE, 10, "test.jpg")
        .expect("query");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].image_id, 0x1a);
    assert_eq!(results[0].score, 0.95);
    assert_eq!(results[1].image_id, 0xff);
    assert_eq!(results[1].width, 64);

    client.close();
    server.join().expect("server");
}

#[test]
fn test_query_reply_split_across_writes() {
    // The client must keep reading until the terminator arrives
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        read_command_line(&mut reader);

        writer.write_all(b"200 1a 0.9").expect("write");
        writer.flush().expect("flush");
        writer.write_all(b"5 100 200\n0").expect("write");
        writer.flush().expect("flush");
        writer.write_all(b"00 \n").expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let results = client
        .query(0, QueryFlags::NONE, 10, "test.jpg")
        .expect("query");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].image_id, 26);

    client.close();
    server.join().expect("server");
}

#[test]
fn test_query_blob_uploads_payload() {
    let payload = b"not really a jpeg but close enough".to_vec();
    let expected = payload.clone();
    let size = payload.len();

    let (addr, server) = spawn_server(move |stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(
            read_command_line(&mut reader),
            format!("query 1 2 5 :{}", size)
        );

        // Exactly `size` raw bytes, then the explicit terminator
        let mut blob = vec![0u8; size];
        reader.read_exact(&mut blob).expect("read payload");
        assert_eq!(blob, expected);

        let mut term = [0u8; 2];
        reader.read_exact(&mut term).expect("read terminator");
        assert_eq!(&term, b"\r\n");

        writer
            .write_all(b"200 2b 0.80 640 480\n000 \n")
            .expect("write reply");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let mut source = Cursor::new(payload);
    let results = client
        .query_blob(1, QueryFlags::GRAYSCALE, 5, size as u64, &mut source)
        .expect("query_blob");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].image_id, 0x2b);

    client.close();
    server.join().expect("server");
}

#[test]
fn test_zero_byte_upload() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "query 0 0 10 :0");

        // No payload bytes: the terminator follows immediately
        let mut term = [0u8; 2];
        reader.read_exact(&mut term).expect("read terminator");
        assert_eq!(&term, b"\r\n");

        writer.write_all(b"300 empty query\n000 \n").expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let mut source = Cursor::new(Vec::new());
    let results = client
        .query_blob(0, QueryFlags::NONE, 10, 0, &mut source)
        .expect("query_blob");

    // Error codes inside the reply are skipped by the decoder, not raised
    assert!(results.is_empty());

    client.close();
    server.join().expect("server");
}

// =============================================================================
// Typed Command Tests
// =============================================================================

#[test]
fn test_count() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "count 2");
        writer.write_all(b"101 count=1234\n000 \n").expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    assert_eq!(client.count(2).expect("count"), 1234);

    client.close();
    server.join().expect("server");
}

#[test]
fn test_db_list() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "db_list");
        writer
            .write_all(b"102 0 main.db\n102 1 extra.db\n000 \n")
            .expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let entries = client.db_list().expect("db_list");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].filename, "main.db");
    assert_eq!(entries[1].db_id, 1);

    client.close();
    server.join().expect("server");
}

#[test]
fn test_remove_succeeds_on_clean_reply() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "remove 1 1a");
        writer.write_all(b"100 removed\n000 \n").expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    client.remove(1, 0x1a).expect("remove");

    client.close();
    server.join().expect("server");
}

#[test]
fn test_remove_surfaces_server_error_line() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        assert_eq!(read_command_line(&mut reader), "remove 0 ff");
        writer
            .write_all(b"301 no such image\n000 \n")
            .expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");

    match client.remove(0, 0xff) {
        Err(IqdbError::Server { code, message }) => {
            assert_eq!(code, 301);
            assert_eq!(message, "no such image");
        }
        other => panic!("expected server error, got {:?}", other),
    }

    client.close();
    server.join().expect("server");
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_reports_peer_addr() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream);
        let mut buf = String::new();
        let _ = reader.read_line(&mut buf);
    });

    let config = Config::builder().server_addr(&addr).build();
    let mut session = Session::open(&config).expect("open");

    assert_eq!(session.peer_addr(), addr);
    assert!(!session.is_closed());

    session.close();
    assert!(session.is_closed());

    server.join().expect("server");
}

// =============================================================================
// Failure and Lifecycle Tests
// =============================================================================

#[test]
fn test_connect_failure_is_connection_error() {
    // Nothing listens on this port (bind then drop to reserve-and-release)
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    drop(listener);

    match Client::connect(&addr) {
        Err(IqdbError::Connection(_)) => {}
        other => panic!("expected connection error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_peer_closing_mid_reply_is_transport_error() {
    let (addr, server) = spawn_server(|stream| {
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut writer = stream;

        read_command_line(&mut reader);

        // Reply never terminated; hang up instead
        writer.write_all(b"100 so far so good\n").expect("write");
    });

    let mut client = Client::connect(&addr).expect("connect");
    let err = client.cmd("db_list").unwrap_err();
    assert!(matches!(err, IqdbError::Transport(_)));

    client.close();
    server.join().expect("server");
}

#[test]
fn test_close_is_idempotent_and_fails_later_commands() {
    let (addr, server) = spawn_server(|stream| {
        // Keep the connection open until the client side closes
        let mut reader = BufReader::new(stream);
        let mut buf = String::new();
        let _ = reader.read_line(&mut buf);
    });

    let mut client = Client::connect(&addr).expect("connect");

    client.close();
    client.close();

    let err = client.cmd("db_list").unwrap_err();
    assert!(matches!(err, IqdbError::Closed));

    server.join().expect("server");
}
