use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

/// A JSON file named by what it holds, for error messages.
struct JsonFile<'a> {
    kind: &'a str,
    path: &'a Path,
}

impl JsonFile<'_> {
    fn error(&self, action: &str) -> String {
        format!("Failed to {action} {self}")
    }
}

impl fmt::Display for JsonFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file: {}", self.kind, self.path.display())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let file = JsonFile {
        kind: file_kind,
        path: path.as_ref(),
    };
    let reader = File::open(file.path).with_context(|| file.error("open"))?;
    serde_json::from_reader(BufReader::new(reader)).with_context(|| file.error("parse"))
}

pub fn write_json_file<T, P>(file_kind: &str, path: P, value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let file = JsonFile {
        kind: file_kind,
        path: path.as_ref(),
    };
    let mut writer =
        BufWriter::new(File::create(file.path).with_context(|| file.error("create"))?);
    serde_json::to_writer_pretty(&mut writer, value).with_context(|| file.error("write"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| file.error("flush"))
}
