//! infotoc - print the table of contents of a GNU Info document

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use infotoc::{DEFAULT_BATCH_SIZE, InfoNode, InfoPath, MakerConfig, export, read_toc_with};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented outline
    Text,
    /// Nested JSON objects
    Json,
    /// NCX navMap document
    Ncx,
}

#[derive(Parser, Debug)]
#[command(name = "infotoc")]
#[command(version, about = "Print the table of contents of a GNU Info document", long_about = None)]
#[command(after_help = "EXAMPLES:
    infotoc grep                    Outline of the grep manual
    infotoc -r Invoking grep        Only the subtree under `Invoking`
    infotoc -f json ./manual.info   Outline of a file as JSON")]
struct Cli {
    /// Topic name, or a path to an Info file
    #[arg(value_name = "TOPIC")]
    topic: String,

    /// Node to use as the root instead of the top node
    #[arg(short, long, value_name = "NODE")]
    root: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Records read per batch
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Colon separated directories to search (overrides INFOPATH)
    #[arg(long, value_name = "DIRS")]
    infopath: Option<OsString>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "infotoc=debug",
        _ => "infotoc=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let path = match &cli.infopath {
        Some(dirs) => InfoPath::parse(dirs),
        None => InfoPath::from_env(),
    };
    let config = MakerConfig::new().with_batch_size(cli.batch_size);
    let root = cli.root.as_deref().unwrap_or("");

    let toc = read_toc_with(path, config, &cli.topic, root).map_err(|e| e.to_string())?;
    let output = render(&toc, cli.format, &cli.topic)?;

    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .map_err(|e| e.to_string())
}

fn render(toc: &InfoNode, format: OutputFormat, topic: &str) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(export::render_text(toc)),
        OutputFormat::Json => serde_json::to_string_pretty(toc)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        OutputFormat::Ncx => Ok(export::render_ncx(toc, topic)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["infotoc", "grep"]).unwrap();
        assert_eq!(cli.topic, "grep");
        assert_eq!(cli.root, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "infotoc",
            "-r",
            "Invoking",
            "-f",
            "ncx",
            "--batch-size",
            "25",
            "--infopath",
            "/a:/b",
            "-vv",
            "grep",
        ])
        .unwrap();
        assert_eq!(cli.root.as_deref(), Some("Invoking"));
        assert_eq!(cli.format, OutputFormat::Ncx);
        assert_eq!(cli.batch_size, 25);
        assert_eq!(cli.infopath, Some(OsString::from("/a:/b")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_topic_is_required() {
        assert!(Cli::try_parse_from(["infotoc"]).is_err());
    }

    #[test]
    fn test_json_output() {
        let toc = InfoNode::new("Top")
            .with_title("Manual")
            .with_up("(dir)")
            .with_child(InfoNode::new("Intro").with_up("Top"));
        let json = render(&toc, OutputFormat::Json, "manual").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Top");
        assert_eq!(value["children"][0]["name"], "Intro");
        assert!(value["children"][0].get("children").is_none());
        assert!(value["children"][0].get("prev").is_none());
    }
}
