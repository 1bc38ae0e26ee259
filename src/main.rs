//! CLI entry point for linewrap

use std::path::PathBuf;
use std::process;

use clap::Parser;
use regex::Regex;

use linewrap::config::{self, Indent, Overflow, Settings};
use linewrap::encoding::Encoding;
use linewrap::run;

/// Conventional "bad usage" status, also used for help display. Distinct
/// from the generic failure status so callers can branch on "fix your
/// invocation" vs "environment problem".
const EX_USAGE: i32 = 64;

/// Default pattern matching embedded line breaks (with surrounding
/// whitespace) to be replaced by `--newlineReplacement` before wrapping.
const DEFAULT_IS_NEWLINE: &str = "\\s*[\r\n\u{2028}\u{2029}]+\\s*";

#[derive(Parser, Debug)]
#[command(name = "linewrap")]
#[command(about = "Wrap some text, either from file, stdin, or given on the command line.  \
Each chunk of text is wrapped independently from one another, and streamed to stdout \
(or an outFile, if given).  Command line arguments with -t/--text are processed before files.")]
struct Args {
    /// Files to wrap and concatenate.  Use "-" for stdin
    #[arg(value_name = "file")]
    file: Vec<String>,

    /// Encoding for files read or written.  stdout is always written natively
    #[arg(short, long, value_enum, default_value_t = Encoding::Utf8, value_name = "encoding")]
    encoding: Encoding,

    /// What string to use when a word is longer than the max width, in
    /// overflow mode "clip"
    #[arg(long, default_value = "…", value_name = "string")]
    ellipsis: String,

    /// If outdentFirst is specified, how many columns was the first line
    /// already indented?  If NaN, use the indent width.  Ignored when
    /// outdentFirst is false
    #[arg(short = 'c', long = "firstCol", default_value = "NaN", value_name = "int|NaN")]
    first_col: String,

    /// Escape output for HTML
    #[arg(long)]
    html: bool,

    /// What string to use when a word is longer than the max width, in
    /// overflow mode "anywhere"
    #[arg(long, default_value = "-", value_name = "string")]
    hyphen: String,

    /// Indent each line with this text.  If a number, indent that many
    /// indentChars
    #[arg(short, long, default_value = "", value_name = "string|number")]
    indent: String,

    /// If indent is a number, that many indentChars will be inserted before
    /// each line
    #[arg(long = "indentChar", default_value = " ", value_name = "string")]
    indent_char: String,

    /// If the input string is empty, still write the indent
    #[arg(long = "indentEmpty")]
    indent_empty: bool,

    /// A regular expression to replace newlines in the input.  Empty to
    /// leave newlines in place
    #[arg(long = "isNewline", default_value = DEFAULT_IS_NEWLINE, value_name = "regex")]
    is_newline: String,

    /// Locale for grapheme segmentation.  Has very little effect at the
    /// moment
    #[arg(short, long, value_name = "tag")]
    locale: Option<String>,

    /// How to separate the lines of output [default: OS line ending]
    #[arg(long, value_name = "string")]
    newline: Option<String>,

    /// When isNewline matches, replace with this string
    #[arg(long = "newlineReplacement", default_value = " ", value_name = "string")]
    newline_replacement: String,

    /// Output to a file instead of stdout
    #[arg(short = 'o', long = "outFile", value_name = "file")]
    out_file: Option<PathBuf>,

    /// Do not indent the first output line
    #[arg(long = "outdentFirst")]
    outdent_first: bool,

    /// What to do with words that are longer than width
    #[arg(long, value_enum, default_value_t = Overflow::Visible, value_name = "style")]
    overflow: Overflow,

    /// Wrap this chunk of text.  If used, stdin is not processed unless "-"
    /// is given explicitly.  Can be specified multiple times
    #[arg(short, long, value_name = "string")]
    text: Vec<String>,

    /// Dump the resolved wrapping options before processing
    #[arg(short, long)]
    verbose: bool,

    /// Maximum line length [default: terminal width]
    #[arg(short, long, value_name = "columns",
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    width: Option<usize>,
}

/// Turn parsed arguments into the immutable invocation settings, resolving
/// environment defaults (terminal width, OS line ending) exactly once.
fn resolve(args: Args) -> Result<Settings, String> {
    let is_newline = if args.is_newline.is_empty() {
        None
    } else {
        let re = Regex::new(&args.is_newline)
            .map_err(|e| format!("invalid --isNewline pattern: {}", e))?;
        Some(re)
    };

    let indent = Indent::parse(&args.indent).render(&args.indent_char);

    let mut files = args.file;
    if args.text.is_empty() && files.is_empty() {
        files.push(run::STDIN.to_string());
    }

    Ok(Settings {
        encoding: args.encoding,
        width: config::detect_width(args.width),
        indent,
        indent_first: !args.outdent_first,
        indent_empty: args.indent_empty,
        first_col: config::parse_first_col(&args.first_col),
        overflow: args.overflow,
        ellipsis: args.ellipsis,
        hyphen: args.hyphen,
        newline: args.newline.unwrap_or_else(config::default_newline),
        is_newline,
        newline_replacement: args.newline_replacement,
        locale: args.locale,
        html: args.html,
        out_file: args.out_file,
        text: args.text,
        files,
        verbose: args.verbose,
    })
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and usage problems both land on stderr with the reserved
            // usage status
            eprint!("{}", e.render());
            process::exit(EX_USAGE);
        }
    };

    let settings = match resolve(args) {
        Ok(settings) => settings,
        Err(msg) => {
            eprintln!("linewrap: {}", msg);
            process::exit(EX_USAGE);
        }
    };

    if let Err(e) = run::run(&settings) {
        eprintln!("linewrap: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Settings {
        let args = Args::try_parse_from(argv).expect("argv should parse");
        resolve(args).expect("argv should resolve")
    }

    #[test]
    fn test_defaults_to_stdin() {
        let settings = parse(&["linewrap"]);
        assert!(settings.text.is_empty());
        assert_eq!(settings.files, vec!["-".to_string()]);
    }

    #[test]
    fn test_text_suppresses_default_stdin() {
        let settings = parse(&["linewrap", "-t", "foo"]);
        assert_eq!(settings.text, vec!["foo".to_string()]);
        assert!(settings.files.is_empty());
    }

    #[test]
    fn test_text_fragments_keep_argv_order() {
        let settings = parse(&["linewrap", "-t", "one", "-t", "two", "-t", "three"]);
        assert_eq!(settings.text, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_encoding_aliases() {
        assert_eq!(parse(&["linewrap", "-e", "utf-8"]).encoding, Encoding::Utf8);
        assert_eq!(parse(&["linewrap", "-e", "ucs2"]).encoding, Encoding::Utf16le);
        assert_eq!(parse(&["linewrap", "-e", "binary"]).encoding, Encoding::Latin1);
    }

    #[test]
    fn test_invalid_overflow_rejected() {
        assert!(Args::try_parse_from(["linewrap", "--overflow", "foo"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["linewrap", "--no-such-flag"]).is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(Args::try_parse_from(["linewrap", "-w", "0"]).is_err());
        assert!(Args::try_parse_from(["linewrap", "-w", "nope"]).is_err());
    }

    #[test]
    fn test_explicit_width_resolves_exactly() {
        assert_eq!(parse(&["linewrap", "-w", "9"]).width, 9);
    }

    #[test]
    fn test_numeric_indent_renders_with_indent_char() {
        let settings = parse(&["linewrap", "-i", "2", "--indentChar", "12"]);
        assert_eq!(settings.indent, "1212");
    }

    #[test]
    fn test_literal_indent_passes_through() {
        let settings = parse(&["linewrap", "-i", "> "]);
        assert_eq!(settings.indent, "> ");
    }

    #[test]
    fn test_outdent_first_inverts_indent_first() {
        assert!(parse(&["linewrap"]).indent_first);
        assert!(!parse(&["linewrap", "--outdentFirst"]).indent_first);
    }

    #[test]
    fn test_empty_is_newline_disables_normalization() {
        let settings = parse(&["linewrap", "--isNewline", ""]);
        assert!(settings.is_newline.is_none());
    }

    #[test]
    fn test_default_is_newline_matches_line_breaks() {
        let settings = parse(&["linewrap"]);
        let re = settings.is_newline.expect("default pattern");
        assert_eq!(re.replace_all("foo \r\n bar", " "), "foo bar");
    }

    #[test]
    fn test_invalid_is_newline_is_usage_error() {
        let args = Args::try_parse_from(["linewrap", "--isNewline", "("]).expect("parses");
        assert!(resolve(args).is_err());
    }
}
