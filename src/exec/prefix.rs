// src/exec/prefix.rs

//! Line-prefixing stream transform.
//!
//! Wraps a child output stream so that every line arriving on it is
//! prepended with a fixed label before being forwarded to the destination
//! stream. Line content is passed through byte-exact (carriage returns,
//! invalid UTF-8 and all); the only insertion is the prefix at the start of
//! each line, including a final unterminated line. Nothing is buffered
//! beyond the chunk being transformed.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Chunk-at-a-time prefix inserter.
///
/// The transform is pure and incremental: feeding the same bytes in
/// different chunk sizes produces the same output, so it can sit directly on
/// top of whatever read sizes the pipe yields.
#[derive(Debug, Clone)]
pub struct LinePrefixer {
    prefix: Vec<u8>,
    at_line_start: bool,
}

impl LinePrefixer {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.as_bytes().to_vec(),
            at_line_start: true,
        }
    }

    /// Transform one chunk, inserting the prefix wherever a new line begins.
    ///
    /// The prefix is written lazily, only once content (or an empty line's
    /// terminator) actually follows a line start, so a stream ending in a
    /// newline does not grow a dangling prefix.
    pub fn transform(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(chunk.len() + self.prefix.len());

        for piece in chunk.split_inclusive(|&byte| byte == b'\n') {
            if self.at_line_start {
                out.extend_from_slice(&self.prefix);
            }
            out.extend_from_slice(piece);
            self.at_line_start = piece.ends_with(b"\n");
        }

        out
    }
}

/// Pump `reader` into `writer`, prefixing every line.
///
/// Forwards as bytes arrive and flushes after each chunk, so prefixed output
/// shows up with line-ish latency instead of at process exit. Returns once
/// the reader hits end-of-file (the child closed the pipe).
pub async fn forward_prefixed<R, W>(
    mut reader: R,
    writer: &mut W,
    prefix: &str,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut prefixer = LinePrefixer::new(prefix);
    let mut buf = [0u8; 8 * 1024];

    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }

        writer.write_all(&prefixer.transform(&buf[..read])).await?;
        writer.flush().await?;
    }

    Ok(())
}
