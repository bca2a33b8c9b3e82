//! End-to-end scenarios against a real listening socket, exercising the
//! protocol the way two real clients would. The server task and both
//! peer connections all run on the same `compio` runtime, matching the
//! teacher's `#[compio::test]` integration style (`xpubsub_integration.rs`)
//! rather than a second OS thread driving a blocking client.

use std::time::Duration;

use compio::buf::BufResult;
use compio::io::{AsyncReadExt, AsyncWriteExt};
use compio::net::TcpStream;

use quadrelay::config::ServerConfig;

async fn spawn_server() -> u16 {
    let port = portpicker::pick_unused_port().expect("no free port for test server");
    let config = ServerConfig {
        port,
        ..ServerConfig::default()
    };
    compio::runtime::spawn(async move {
        let _ = quadrelay::server::run(config).await;
    })
    .detach();

    // The listener binds asynchronously; give it a moment before the
    // first connect attempt.
    compio::time::sleep(Duration::from_millis(50)).await;
    port
}

async fn connect(port: u16) -> TcpStream {
    TcpStream::connect(format!("127.0.0.1:{port}"))
        .await
        .expect("connect")
}

async fn read_n(stream: &mut TcpStream, n: usize) -> Vec<u8> {
    let buf = vec![0u8; n];
    let BufResult(result, buf) = stream.read_exact(buf).await;
    result.expect("read_exact");
    buf
}

async fn write_all(stream: &mut TcpStream, bytes: Vec<u8>) {
    let BufResult(result, _) = stream.write_all(bytes).await;
    result.expect("write_all");
}

fn join_frame(code: &[u8]) -> Vec<u8> {
    let mut frame = vec![b'1'];
    frame.extend_from_slice(code);
    frame.extend_from_slice(&[0, 0, 0]);
    frame
}

#[compio::test]
async fn happy_path_matches_spec_scenario() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let reply = read_n(&mut a, 5).await;
    assert_eq!(reply[4], b'\n');
    let code = reply[..4].to_vec();
    assert!(code.iter().all(u8::is_ascii_digit));

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    assert_eq!(read_n(&mut b, 2).await, b"0\n");

    assert_eq!(read_n(&mut a, 2).await, b"2\n");
    assert_eq!(read_n(&mut b, 2).await, b"2\n");

    assert_eq!(read_n(&mut a, 8).await, b"3001111\n");

    write_all(&mut a, b"3112211\n".to_vec()).await;
    assert_eq!(read_n(&mut b, 8).await, b"3331122\n");
}

#[compio::test]
async fn unknown_join_code_is_refused() {
    let port = spawn_server().await;

    let mut client = connect(port).await;
    write_all(&mut client, join_frame(b"9999")).await;
    assert_eq!(read_n(&mut client, 3).await, b"-1\n");

    let buf = vec![0u8; 1];
    let BufResult(result, _) = client.read(buf).await;
    assert_eq!(
        result.expect("read after refusal"),
        0,
        "server should have closed the socket after -1\\n"
    );
}

#[compio::test]
async fn join_to_full_room_is_refused_like_unknown_code() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let code = read_n(&mut a, 5).await[..4].to_vec();

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    assert_eq!(read_n(&mut b, 2).await, b"0\n");

    let mut c = connect(port).await;
    write_all(&mut c, join_frame(&code)).await;
    assert_eq!(read_n(&mut c, 3).await, b"-1\n");
}

#[compio::test]
async fn creator_abandoning_before_joiner_frees_the_code() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let code = read_n(&mut a, 5).await[..4].to_vec();
    drop(a);

    compio::time::sleep(Duration::from_millis(100)).await;

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    assert_eq!(read_n(&mut b, 3).await, b"-1\n");
}

#[compio::test]
async fn joiner_disconnect_mid_game_notifies_survivor() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let code = read_n(&mut a, 5).await[..4].to_vec();

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    let _ = read_n(&mut b, 2).await;

    let _ = read_n(&mut a, 2).await;
    let _ = read_n(&mut b, 2).await;
    let _ = read_n(&mut a, 8).await;

    drop(b);

    assert_eq!(read_n(&mut a, 3).await, b"-2\n");
}

#[compio::test]
async fn out_of_turn_write_is_dropped_silently() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let code = read_n(&mut a, 5).await[..4].to_vec();

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    let _ = read_n(&mut b, 2).await;
    let _ = read_n(&mut a, 2).await;
    let _ = read_n(&mut b, 2).await;
    let _ = read_n(&mut a, 8).await;

    // turn == 0 (creator's move next): B writing now is out of turn.
    write_all(&mut b, b"3112211\n".to_vec()).await;

    // A's next legitimate move should still be relayed normally — if B's
    // frame had advanced the turn, this would instead desync the board.
    write_all(&mut a, b"3112299\n".to_vec()).await;
    let relayed = read_n(&mut b, 8).await;
    assert_eq!(relayed[0], b'3');
}

#[compio::test]
async fn malformed_state_push_is_dropped_without_crashing_the_room() {
    let port = spawn_server().await;

    let mut a = connect(port).await;
    write_all(&mut a, vec![0x00, 0, 0, 0, 0, 0, 0, 0]).await;
    let code = read_n(&mut a, 5).await[..4].to_vec();

    let mut b = connect(port).await;
    write_all(&mut b, join_frame(&code)).await;
    let _ = read_n(&mut b, 2).await;
    let _ = read_n(&mut a, 2).await;
    let _ = read_n(&mut b, 2).await;
    let _ = read_n(&mut a, 8).await;

    // Quadrant byte '0' is out of '1'..='4' — the coordinator should log
    // and drop this frame rather than panic on the bad digit.
    write_all(&mut a, b"3012211\n".to_vec()).await;

    // The room is still alive and still waiting on A's turn: a
    // well-formed move from A afterward should relay normally.
    write_all(&mut a, b"3112211\n".to_vec()).await;
    assert_eq!(read_n(&mut b, 8).await, b"3331122\n");
}

#[compio::test]
async fn bad_first_opcode_closes_without_a_reply() {
    let port = spawn_server().await;

    let mut client = connect(port).await;
    write_all(&mut client, vec![0xFF; 8]).await;

    let buf = vec![0u8; 1];
    let BufResult(result, _) = client.read(buf).await;
    assert_eq!(
        result.expect("read after bad opcode"),
        0,
        "server should close the socket without replying"
    );
}
