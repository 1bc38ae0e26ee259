//! The output sink: stdout, or a file written with the configured encoding.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::encoding::Encoding;

/// Where wrapped text goes. Stdout is written natively and never re-encoded;
/// files are created (truncating) and written with the configured encoding.
#[derive(Debug)]
pub enum Output {
    Stdout(io::Stdout),
    File {
        writer: BufWriter<File>,
        encoding: Encoding,
    },
}

impl Output {
    pub fn create(path: Option<&Path>, encoding: Encoding) -> io::Result<Self> {
        match path {
            None => Ok(Output::Stdout(io::stdout())),
            Some(p) => {
                let file = File::create(p).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!("cannot open '{}' for writing: {}", p.display(), e),
                    )
                })?;
                Ok(Output::File {
                    writer: BufWriter::new(file),
                    encoding,
                })
            }
        }
    }

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.lock().write_all(text.as_bytes()),
            Output::File { writer, encoding } => writer.write_all(&encoding.encode(text)),
        }
    }

    /// Flush everything to the OS before the process may exit successfully.
    pub fn finish(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.lock().flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}
