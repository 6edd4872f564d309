//!
//! ```
//! RUST_LOG=trace cargo test --test roundtrip -- --nocapture
//! ```

use std::io::BufReader;

use anyhow::Result;

use multipart_codec::{decode, encode, parse_boundary, MultipartForm, Part};

#[path = "./lib/mod.rs"]
mod lib;

use lib::tracing_init;

fn sample_parts() -> Result<Vec<Part>> {
    Ok(vec![
        Part::new("a.txt", Some("text/plain"), &b"hello"[..])?.file_name("a.txt"),
        Part::new("b.png", Some("image/png"), &b"\x89PNG\r\n\x1a\n\x00"[..])?.file_name("b.png"),
        Part::new("note", None, &b"just a field"[..])?,
        Part::new("empty", Some("application/octet-stream"), &b""[..])?,
    ])
}

#[test]
fn decode_inverts_encode() -> Result<()> {
    tracing_init();

    let parts = sample_parts()?;
    let payload = encode("round-trip-boundary", parts.clone());
    let decoded = decode(payload.as_ref(), "round-trip-boundary")?;

    // Content bytes are exact: the delimiter's own line terminator is
    // stripped from extracted segments, not left on part content.
    assert_eq!(decoded, parts);
    Ok(())
}

#[test]
fn round_trip_normalizes_the_content_type() -> Result<()> {
    tracing_init();

    let parts = vec![Part::new(
        "p1",
        Some("text/plain; charset=utf-8"),
        &b"hi"[..],
    )?];
    let decoded = decode(encode("B1", parts).as_ref(), "B1")?;

    assert_eq!(decoded[0].content_type, "text/plain");
    Ok(())
}

#[test]
fn round_trip_of_a_zero_part_form() -> Result<()> {
    tracing_init();

    let payload = encode("B1", vec![]);
    assert_eq!(payload.as_ref(), b"\r\n--B1--\r\n");
    assert!(decode(payload.as_ref(), "B1")?.is_empty());
    Ok(())
}

#[test]
fn transfer_encoding_does_not_survive_the_trip() -> Result<()> {
    tracing_init();

    let parts = vec![Part::new("p1", None, &b"aGk="[..])?.transfer_encoding("base64")];
    let decoded = decode(encode("B1", parts).as_ref(), "B1")?;

    // Decode consumes only content-disposition and content-type.
    assert_eq!(decoded[0].transfer_encoding, None);
    assert_eq!(decoded[0].content.as_ref(), b"aGk=");
    Ok(())
}

#[test]
fn round_trip_through_the_reader_adapter() -> Result<()> {
    tracing_init();

    let parts = sample_parts()?;
    let form = MultipartForm::new("B1", parts.clone());
    let decoded = decode(BufReader::new(form.into_reader()), "B1")?;

    assert_eq!(decoded, parts);
    Ok(())
}

#[test]
fn round_trip_with_a_minted_content_type() -> Result<()> {
    tracing_init();

    let boundary = multipart_codec::generate_boundary(&mut rand::thread_rng());
    let content_type = format!("multipart/form-data; boundary={boundary}");

    let parts = sample_parts()?;
    let payload = encode(&boundary, parts.clone());
    let decoded = decode(payload.as_ref(), &parse_boundary(&content_type)?)?;

    assert_eq!(decoded, parts);
    Ok(())
}
