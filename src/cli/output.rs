//! Output formatting for CLI tools.
//!
//! Supports human-readable and JSON output formats.

use crate::ber::tag;
use crate::cli::args::OutputFormat;
use crate::cli::hints;
use crate::{GetResponse, Oid, PduType, Value, VarBind, Version};
use serde::Serialize;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;

/// Request metadata for verbose output.
#[derive(Debug)]
pub struct RequestInfo {
    pub target: SocketAddr,
    pub version: Version,
    pub community: String,
    pub pdu_type: PduType,
    pub oids: Vec<Oid>,
}

/// Write verbose request header to stderr.
pub fn write_verbose_request(info: &RequestInfo) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "--- Request ---");
    let _ = writeln!(stderr, "Target:    {}", info.target);
    let _ = writeln!(stderr, "Version:   {}", info.version);
    let _ = writeln!(stderr, "Community: {}", info.community);
    let _ = writeln!(
        stderr,
        "Operation: {} (0x{:02X})",
        match info.pdu_type {
            PduType::Get => "GET",
            PduType::GetNext => "GETNEXT",
        },
        info.pdu_type.tag()
    );

    let _ = writeln!(stderr, "OIDs:      {} total", info.oids.len());
    for oid in &info.oids {
        match hints::lookup(oid) {
            Some(h) => {
                let _ = writeln!(stderr, "  {} ({})", oid, h);
            }
            None => {
                let _ = writeln!(stderr, "  {}", oid);
            }
        }
    }
    let _ = writeln!(stderr);
}

/// Write verbose response summary to stderr.
pub fn write_verbose_response(response: &GetResponse, elapsed: Duration) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "--- Response ---");
    let _ = writeln!(stderr, "PDU tag:   0x{:02X}", response.pdu_tag);
    let _ = writeln!(stderr, "Status:    {}", response.error_status);
    if response.error_index != 0 {
        let _ = writeln!(stderr, "Index:     {}", response.error_index);
    }
    let _ = writeln!(stderr, "Results:   {} varbind(s)", response.varbinds.len());
    let _ = writeln!(stderr, "Time:      {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    let _ = writeln!(stderr);
}

/// Decoded response, ready for output.
#[derive(Debug, Serialize)]
pub struct ResponseOutput {
    pub target: String,
    pub version: String,
    pub community: String,
    pub request_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
    pub results: Vec<VarBindResult>,
}

/// Non-zero error status reported by the agent.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub status: String,
    pub index: u8,
}

/// A single varbind result.
#[derive(Debug, Serialize)]
pub struct VarBindResult {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// Output context for formatting.
pub struct OutputContext {
    pub format: OutputFormat,
    pub show_hints: bool,
    pub force_hex: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            show_hints: true,
            force_hex: false,
        }
    }

    /// Write a response to stdout.
    pub fn write_response(&self, target: SocketAddr, response: &GetResponse) -> io::Result<()> {
        let output = self.build_output(target, response);
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout, &output)
    }

    fn write_to<W: Write>(&self, w: &mut W, output: &ResponseOutput) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => write_human(w, output),
            OutputFormat::Json => write_json(w, output),
        }
    }

    fn build_output(&self, target: SocketAddr, response: &GetResponse) -> ResponseOutput {
        let error = response.is_error().then(|| ErrorOutput {
            status: response.error_status.to_string(),
            index: response.error_index,
        });

        ResponseOutput {
            target: target.to_string(),
            version: response.version.to_string(),
            community: String::from_utf8_lossy(&response.community).into_owned(),
            request_id: response.request_id,
            error,
            results: response
                .varbinds
                .iter()
                .map(|vb| self.format_varbind(vb))
                .collect(),
        }
    }

    fn format_varbind(&self, vb: &VarBind) -> VarBindResult {
        let hint = if self.show_hints {
            hints::lookup(&vb.oid).map(String::from)
        } else {
            None
        };
        let (value_type, value, formatted) = format_value(&vb.value, self.force_hex);

        VarBindResult {
            oid: vb.oid.to_string(),
            hint,
            value_type,
            value,
            formatted,
        }
    }
}

fn write_human<W: Write>(w: &mut W, output: &ResponseOutput) -> io::Result<()> {
    writeln!(w, "Community: {}", output.community)?;
    writeln!(w, "Request ID: {}", output.request_id)?;
    if let Some(ref err) = output.error {
        writeln!(w, "Error: {} (index {})", err.status, err.index)?;
    }

    for vb in &output.results {
        if let Some(ref hint) = vb.hint {
            write!(w, "{} ({})", vb.oid, hint)?;
        } else {
            write!(w, "{}", vb.oid)?;
        }

        write!(w, " = {}: ", vb.value_type)?;

        if let Some(ref formatted) = vb.formatted {
            writeln!(w, "{}", formatted)?;
        } else {
            match &vb.value {
                serde_json::Value::String(s) => writeln!(w, "\"{}\"", s)?,
                serde_json::Value::Null => writeln!(w)?,
                other => writeln!(w, "{}", other)?,
            }
        }
    }

    Ok(())
}

fn write_json<W: Write>(w: &mut W, output: &ResponseOutput) -> io::Result<()> {
    let json = serde_json::to_string_pretty(output).map_err(io::Error::other)?;
    writeln!(w, "{}", json)
}

/// Format a value, returning (type_name, json_value, formatted_string).
fn format_value(value: &Value, force_hex: bool) -> (String, serde_json::Value, Option<String>) {
    let bytes = value.as_bytes();

    if force_hex && !value.is_null() {
        return (
            value.type_name().into(),
            serde_json::Value::String(hex_string(bytes)),
            Some(format_hex_string(bytes)),
        );
    }

    match value.tag() {
        tag::universal::NULL => ("NULL".into(), serde_json::Value::Null, None),

        tag::universal::OCTET_STRING => {
            if is_printable(bytes) {
                let s = String::from_utf8_lossy(bytes).into_owned();
                ("STRING".into(), serde_json::Value::String(s), None)
            } else {
                (
                    "Hex-STRING".into(),
                    serde_json::Value::String(hex_string(bytes)),
                    Some(format_hex_string(bytes)),
                )
            }
        }

        tag::application::TIMETICKS => match value.as_u64() {
            Some(v) => (
                "Timeticks".into(),
                v.into(),
                Some(format!("({}) {}", v, format_timeticks(v))),
            ),
            None => raw(value),
        },

        tag::application::IP_ADDRESS if bytes.len() == 4 => (
            "IpAddress".into(),
            serde_json::Value::String(value.to_string()),
            None,
        ),

        tag::universal::OBJECT_IDENTIFIER => match value.as_oid() {
            Some(oid) => ("OID".into(), serde_json::Value::String(oid.to_string()), None),
            None => raw(value),
        },

        _ if value.is_exception() => (
            value.type_name().into(),
            serde_json::Value::Null,
            Some(value.to_string()),
        ),

        _ => {
            if let Some(v) = value.as_i64() {
                (value.type_name().into(), v.into(), None)
            } else if let Some(v) = value.as_u64() {
                (value.type_name().into(), v.into(), None)
            } else {
                raw(value)
            }
        }
    }
}

fn raw(value: &Value) -> (String, serde_json::Value, Option<String>) {
    let type_name = match value.type_name() {
        "Unknown" => format!("Unknown(0x{:02X})", value.tag()),
        name => name.into(),
    };
    (
        type_name,
        serde_json::Value::String(hex_string(value.as_bytes())),
        Some(format_hex_string(value.as_bytes())),
    )
}

/// Check if bytes are printable ASCII/UTF-8.
fn is_printable(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(s) => s
            .chars()
            .all(|c| c.is_ascii_graphic() || c.is_ascii_whitespace()),
        Err(_) => false,
    }
}

/// Format bytes as hex string (lowercase, no separator).
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Format bytes as spaced hex for display.
fn format_hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format TimeTicks (hundredths of a second) as a duration.
fn format_timeticks(centiseconds: u64) -> String {
    let total_seconds = centiseconds / 100;
    let cs = centiseconds % 100;

    let days = total_seconds / 86400;
    let hours = (total_seconds % 86400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!(
            "{}d {:02}:{:02}:{:02}.{:02}",
            days, hours, minutes, seconds, cs
        )
    } else {
        format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, cs)
    }
}

/// Write an error message to stderr.
pub fn write_error(err: &crate::Error) {
    eprintln!("Error: {}", err);
}
