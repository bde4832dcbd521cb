//! Server-Sent Events (SSE) processing for streaming responses.
//!
//! The SambaNova Cloud API streams completions in the OpenAI style: each SSE
//! record is a `data: {json}` line, records are separated by blank lines, and
//! a literal `data: [DONE]` terminates the stream.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::observability::{STREAM_BYTES, STREAM_CHUNKS, STREAM_ERRORS};
use crate::types::CompletionChunk;
use crate::{Error, Result};

/// Outcome of scanning one SSE record off the front of the buffer.
enum SseRecord {
    /// A parsed (or unparseable) data record.
    Chunk(Result<CompletionChunk>),
    /// The `[DONE]` terminator.
    Done,
    /// A comment or field-less record; nothing to emit.
    Skip,
}

/// Process a stream of bytes into a stream of completion chunks.
///
/// Handles record buffering across arbitrary chunk boundaries. Data payloads
/// that fail to parse as a [`CompletionChunk`] are surfaced as
/// `Error::Serialization` items so the caller can decide to skip them; the
/// stream itself keeps going.
pub fn process_sse<S>(byte_stream: S) -> impl Stream<Item = Result<CompletionChunk>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the SSE stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer, false),
        move |(mut stream, mut buffer, mut done)| async move {
            if done {
                return None;
            }
            loop {
                // First drain any complete record already in the buffer
                if let Some((record, remaining)) = extract_record(&buffer) {
                    buffer = remaining;
                    match record {
                        SseRecord::Chunk(chunk) => {
                            match &chunk {
                                Ok(_) => STREAM_CHUNKS.click(),
                                Err(_) => STREAM_ERRORS.click(),
                            }
                            return Some((chunk, (stream, buffer, done)));
                        }
                        SseRecord::Done => {
                            return None;
                        }
                        SseRecord::Skip => continue,
                    }
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => {
                        STREAM_BYTES.count(bytes.len() as u64);
                        match String::from_utf8(bytes.to_vec()) {
                            Ok(text) => buffer.push_str(&text),
                            Err(e) => {
                                STREAM_ERRORS.click();
                                return Some((
                                    Err(Error::encoding(
                                        format!("Invalid UTF-8 in stream: {e}"),
                                        Some(Box::new(e)),
                                    )),
                                    (stream, buffer, done),
                                ));
                            }
                        }
                    }
                    Some(Err(e)) => {
                        STREAM_ERRORS.click();
                        return Some((Err(e), (stream, buffer, done)));
                    }
                    None => {
                        // End of stream; a final record may lack the trailing
                        // blank line.
                        done = true;
                        if !buffer.trim().is_empty() {
                            buffer.push_str("\n\n");
                            if let Some((SseRecord::Chunk(chunk), _)) = extract_record(&buffer) {
                                match &chunk {
                                    Ok(_) => STREAM_CHUNKS.click(),
                                    Err(_) => STREAM_ERRORS.click(),
                                }
                                return Some((chunk, (stream, buffer, done)));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract a complete SSE record from the front of the buffer.
///
/// Records are delimited by blank lines; within a record only `data:` fields
/// matter. Returns `None` while the buffer holds no complete record yet.
fn extract_record(buffer: &str) -> Option<(SseRecord, String)> {
    let (record_text, rest) = split_record(buffer)?;
    let rest = rest.to_string();

    let mut data = None;
    for line in record_text.lines() {
        if let Some(value) = line.strip_prefix("data:") {
            data = Some(value.trim());
        }
    }

    let record = match data {
        // Comments and field-less records are keep-alives
        None => SseRecord::Skip,
        Some("[DONE]") => SseRecord::Done,
        Some(json_str) => match serde_json::from_str::<CompletionChunk>(json_str) {
            Ok(chunk) => SseRecord::Chunk(Ok(chunk)),
            Err(e) => SseRecord::Chunk(Err(Error::serialization(
                format!("Failed to parse chunk JSON: {e}"),
                Some(Box::new(e)),
            ))),
        },
    };
    Some((record, rest))
}

/// Splits the first blank-line-delimited record off the buffer, accepting
/// both `\n\n` and `\r\n\r\n` separators.
fn split_record(buffer: &str) -> Option<(&str, &str)> {
    let lf = buffer.find("\n\n");
    let crlf = buffer.find("\r\n\r\n");
    match (lf, crlf) {
        (Some(lf), Some(crlf)) if crlf < lf => Some((&buffer[..crlf], &buffer[crlf + 4..])),
        (None, Some(crlf)) => Some((&buffer[..crlf], &buffer[crlf + 4..])),
        (Some(lf), _) => Some((&buffer[..lf], &buffer[lf + 2..])),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn byte_stream(
        chunks: Vec<&'static [u8]>,
    ) -> impl Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin {
        Box::pin(stream::iter(
            chunks.into_iter().map(|c| Ok(Bytes::from(c))),
        ))
    }

    #[tokio::test]
    async fn parses_content_chunk() {
        let data: &[u8] =
            b"data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\n\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
        assert!(sse.next().await.is_none());
    }

    #[tokio::test]
    async fn done_marker_terminates_stream() {
        let data: &[u8] = b"data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\ndata: {\"id\":\"c1\",\"choices\":[]}\n\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        assert!(sse.next().await.unwrap().is_ok());
        // Nothing after [DONE] is emitted
        assert!(sse.next().await.is_none());
    }

    #[tokio::test]
    async fn record_split_across_chunks_is_buffered() {
        let part1: &[u8] = b"data: {\"id\":\"c1\",\"choices\":[{\"index\"";
        let part2: &[u8] = b":0,\"delta\":{\"content\":\"Hi\"}}]}\n\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![part1, part2])));

        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
    }

    #[tokio::test]
    async fn malformed_payload_yields_serialization_error() {
        let data: &[u8] = b"data: not json\n\ndata: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\n\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        let first = sse.next().await.unwrap();
        assert!(first.unwrap_err().is_serialization());

        // The stream recovers and delivers the next record
        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
    }

    #[tokio::test]
    async fn comment_records_are_skipped() {
        let data: &[u8] = b": keep-alive\n\ndata: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\n\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
    }

    #[tokio::test]
    async fn crlf_separators_accepted() {
        let data: &[u8] = b"data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\r\n\r\n";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
    }

    #[tokio::test]
    async fn trailing_record_without_separator_is_flushed() {
        let data: &[u8] =
            b"data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}";
        let mut sse = Box::pin(process_sse(byte_stream(vec![data])));

        let chunk = sse.next().await.unwrap().unwrap();
        assert_eq!(chunk.first_content(), Some("Hi"));
        assert!(sse.next().await.is_none());
    }
}
