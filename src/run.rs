//! The orchestrator: drive a configured [`Wrapper`] over every text source,
//! in order, streaming each wrapped unit to the output sink.

use std::io::{self, Read};

use crate::config::Settings;
use crate::encoding::Encoding;
use crate::output::Output;
use crate::wrap::{WrapOptions, Wrapper};

/// Positional sentinel for standard input.
pub const STDIN: &str = "-";

/// Process every source named in `settings`: inline `--text` fragments first,
/// then positionals, each read fully, wrapped independently, and written
/// followed by the unit terminator. The sink is flushed before returning.
pub fn run(settings: &Settings) -> io::Result<()> {
    let wrapper = Wrapper::new(WrapOptions::from_settings(settings));
    if settings.verbose {
        println!("{:#?}", wrapper.options());
    }

    let mut out = Output::create(settings.out_file.as_deref(), settings.encoding)?;

    for fragment in &settings.text {
        emit(&wrapper, fragment, settings, &mut out)?;
    }

    for source in &settings.files {
        let text = if source == STDIN {
            read_stdin(settings.encoding)?
        } else {
            read_file(source, settings.encoding)?
        };
        emit(&wrapper, &text, settings, &mut out)?;
    }

    out.finish()
}

fn emit(
    wrapper: &Wrapper,
    text: &str,
    settings: &Settings,
    out: &mut Output,
) -> io::Result<()> {
    out.write_str(&wrapper.fill(text))?;
    out.write_str(&settings.newline)
}

/// Read standard input to completion and decode it.
fn read_stdin(encoding: Encoding) -> io::Result<String> {
    let mut bytes = Vec::new();
    io::stdin().lock().read_to_end(&mut bytes)?;
    Ok(encoding.decode(&bytes))
}

/// Read a file to completion and decode it. The path is included in the
/// error so a missing file names itself on stderr.
fn read_file(path: &str, encoding: Encoding) -> io::Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot read '{}': {}", path, e))
    })?;
    Ok(encoding.decode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_error_names_path() {
        let err = read_file("DOES_NOT_EXIST", Encoding::Utf8).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("DOES_NOT_EXIST"));
    }

    #[test]
    fn test_read_file_decodes_with_encoding() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0xE9]).expect("write fixture");
        let text =
            read_file(path.to_str().expect("utf8 path"), Encoding::Latin1).expect("read");
        assert_eq!(text, "é");
    }
}
