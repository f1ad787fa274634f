use std::io;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::Task;

const INDENT: &[u8] = b"    ";

/// Write tasks as a JSON array indented with four spaces.
/// The task file and `list` output share this layout.
pub fn write_json<W: io::Write>(writer: W, tasks: &[Task]) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    tasks.serialize(&mut ser)
}

pub fn to_json(tasks: &[Task]) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, tasks)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
