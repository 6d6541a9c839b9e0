// src/render.rs

//! One compact JSON line per invocation.
//!
//! A non-success envelope is still printed; the handler then returns
//! [`Failure::AlreadyReported`] so `main` exits 1 without printing again.

use crate::error::Failure;
use crate::pixela::{Outcome, Reply};

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Marker that opens the API's JSON error body inside a transport error.
const EMBEDDED_ERROR_MARKER: &str = r#"{"message""#;

/// Serialize `value` to compact JSON. `what` names the command
/// (`graph create`) in the error.
pub fn marshal<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("marshal {} result failed", what))
}

/// Print an envelope-carrying result and turn logical failure into the
/// sentinel.
pub fn emit_outcome<T>(out: &mut dyn Write, result: &T, what: &str) -> Result<()>
where
    T: Serialize + Outcome,
{
    let line = marshal(result, what)?;
    writeln!(out, "{}", line)?;

    if !result.envelope().is_success {
        return Err(Failure::AlreadyReported.into());
    }
    Ok(())
}

pub fn emit_reply<T: Serialize>(out: &mut dyn Write, reply: Reply<T>, what: &str) -> Result<()> {
    match reply {
        Reply::Data(data) => {
            let line = marshal(&data, what)?;
            writeln!(out, "{}", line)?;
            Ok(())
        }
        Reply::Failure(envelope) => emit_outcome(out, &envelope, what),
    }
}

/// Print a plain text line (URLs, SVG documents).
pub fn emit_text(out: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(out, "{}", text)?;
    Ok(())
}

/// The API's JSON error body embedded at the end of an error message.
pub fn embedded_error(text: &str) -> Option<&str> {
    text.rfind(EMBEDDED_ERROR_MARKER).map(|at| &text[at..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_reported;
    use crate::pixela::Envelope;

    #[test]
    fn success_envelope_prints_one_line_and_succeeds() {
        let mut out = Vec::new();

        emit_outcome(&mut out, &Envelope::success("Success."), "pixel create").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"message\":\"Success.\",\"isSuccess\":true,\"isRejected\":false,\"statusCode\":200}\n"
        );
    }

    #[test]
    fn failed_envelope_is_printed_then_reported() {
        let mut out = Vec::new();

        let err = emit_outcome(&mut out, &Envelope::failure("Graph not found.", 404), "graph get")
            .unwrap_err();

        assert!(is_reported(&err));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"message\":\"Graph not found.\",\"isSuccess\":false,\"isRejected\":false,\"statusCode\":404}\n"
        );
    }

    #[test]
    fn reply_data_skips_envelope() {
        let mut out = Vec::new();

        emit_reply(&mut out, Reply::Data(vec!["20200101"]), "graph get pixel dates").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[\"20200101\"]\n");
    }

    #[test]
    fn comparison_operators_are_written_raw() {
        let mut out = Vec::new();

        emit_reply(&mut out, Reply::Data(vec![">", "<"]), "notification get all").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[\">\",\"<\"]\n");
    }

    #[test]
    fn embedded_error_takes_last_marker() {
        let text = r#"some error occur: {"message": "x"} then {"message":"Not found.","isSuccess":false}"#;
        assert_eq!(
            embedded_error(text),
            Some(r#"{"message":"Not found.","isSuccess":false}"#)
        );
        assert_eq!(embedded_error("connection refused"), None);
    }
}
