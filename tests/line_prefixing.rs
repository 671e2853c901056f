// tests/line_prefixing.rs

use shellpipe::exec::{LinePrefixer, forward_prefixed};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn transform_all(prefix: &str, chunks: &[&[u8]]) -> Vec<u8> {
    let mut prefixer = LinePrefixer::new(prefix);
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend_from_slice(&prefixer.transform(chunk));
    }
    out
}

#[test]
fn prefixes_every_terminated_line() {
    let out = transform_all("[build] ", &[b"a\nb\n"]);
    assert_eq!(out, b"[build] a\n[build] b\n");
}

#[test]
fn prefixes_a_final_unterminated_line() {
    let out = transform_all("[p] ", &[b"one\ntwo"]);
    assert_eq!(out, b"[p] one\n[p] two");
}

#[test]
fn no_dangling_prefix_after_a_trailing_newline() {
    let out = transform_all("[p] ", &[b"done\n"]);
    assert_eq!(out, b"[p] done\n");
}

#[test]
fn empty_lines_are_prefixed() {
    let out = transform_all("[p]", &[b"\n\n"]);
    assert_eq!(out, b"[p]\n[p]\n");
}

#[test]
fn empty_input_produces_no_output() {
    let out = transform_all("[p] ", &[b""]);
    assert_eq!(out, b"");
}

#[test]
fn carriage_returns_pass_through_untouched() {
    let out = transform_all("> ", &[b"a\r\nb\r\n"]);
    assert_eq!(out, b"> a\r\n> b\r\n");
}

#[test]
fn invalid_utf8_bytes_pass_through_untouched() {
    let out = transform_all("> ", &[b"\xff\xfe ok\nnext\n"]);
    assert_eq!(out, b"> \xff\xfe ok\n> next\n");
}

#[test]
fn chunk_split_mid_line_does_not_reprefix() {
    let out = transform_all("[p] ", &[b"hel", b"lo\nwor", b"ld\n"]);
    assert_eq!(out, b"[p] hello\n[p] world\n");
}

#[test]
fn chunk_split_at_a_newline_prefixes_the_next_line() {
    let out = transform_all("[p] ", &[b"a\n", b"b\n"]);
    assert_eq!(out, b"[p] a\n[p] b\n");
}

#[test]
fn byte_at_a_time_matches_one_shot() {
    let input: &[u8] = b"first\n\nsecond\r\nlast";
    let one_shot = transform_all("# ", &[input]);

    let mut prefixer = LinePrefixer::new("# ");
    let mut dribbled = Vec::new();
    for byte in input {
        dribbled.extend_from_slice(&prefixer.transform(std::slice::from_ref(byte)));
    }

    assert_eq!(dribbled, one_shot);
}

#[tokio::test]
async fn forward_prefixed_pumps_until_eof() {
    let (mut source, source_rx) = tokio::io::duplex(1024);
    let (mut sink, mut capture) = tokio::io::duplex(1024);

    source.write_all(b"one\ntwo\n").await.unwrap();
    drop(source); // EOF for the reader side

    forward_prefixed(source_rx, &mut sink, "[x] ").await.unwrap();
    drop(sink);

    let mut out = Vec::new();
    capture.read_to_end(&mut out).await.unwrap();
    assert_eq!(out, b"[x] one\n[x] two\n");
}

#[tokio::test]
async fn forward_prefixed_keeps_an_unterminated_tail() {
    let (mut source, source_rx) = tokio::io::duplex(1024);
    let (mut sink, mut capture) = tokio::io::duplex(1024);

    source.write_all(b"progress: 50%").await.unwrap();
    drop(source);

    forward_prefixed(source_rx, &mut sink, "[job] ").await.unwrap();
    drop(sink);

    let mut out = Vec::new();
    capture.read_to_end(&mut out).await.unwrap();
    assert_eq!(out, b"[job] progress: 50%");
}

#[tokio::test]
async fn forward_prefixed_streams_across_writes() {
    // Two separate writes with a yield between them still come out as one
    // correctly prefixed stream.
    let (mut source, source_rx) = tokio::io::duplex(1024);
    let (mut sink, mut capture) = tokio::io::duplex(1024);

    let writer = tokio::spawn(async move {
        source.write_all(b"first ha").await.unwrap();
        tokio::task::yield_now().await;
        source.write_all(b"lf\nsecond\n").await.unwrap();
    });

    forward_prefixed(source_rx, &mut sink, "| ").await.unwrap();
    drop(sink);
    writer.await.unwrap();

    let mut out = Vec::new();
    capture.read_to_end(&mut out).await.unwrap();
    assert_eq!(out, b"| first half\n| second\n");
}
