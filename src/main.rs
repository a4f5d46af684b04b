//! linkscan - list the links of an HTML document

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use linkscan::{Link, LinkExtractor, parse_html_bytes};

#[derive(Parser)]
#[command(name = "linkscan")]
#[command(version, about = "List the URLs an HTML document links to", long_about = None)]
#[command(after_help = "EXAMPLES:
    linkscan -b https://example.com/post/ post.html
    linkscan --json -b https://example.com/ index.html
    curl -s https://example.com/ | linkscan -b https://example.com/ --links-to /about -")]
struct Cli {
    /// HTML file to scan, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// URL the document was retrieved from
    #[arg(short, long, value_name = "URL", default_value = "")]
    base_url: String,

    /// Only report whether the document links to URL (exit status 1 if not)
    #[arg(long, value_name = "URL")]
    links_to: Option<String>,

    /// Print links with their source attribute and element as JSON
    #[arg(long, conflicts_with = "links_to")]
    json: bool,

    /// Log extraction details (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// JSON form of a [`Link`].
#[derive(Serialize)]
struct LinkRecord<'a> {
    url: &'a str,
    raw: &'a str,
    attribute: &'a str,
    element: &'a str,
    resolved: bool,
}

impl<'a> From<&'a Link> for LinkRecord<'a> {
    fn from(link: &'a Link) -> Self {
        Self {
            url: &link.url,
            raw: &link.raw,
            attribute: &link.attribute,
            element: &link.element,
            resolved: link.resolved,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Returns `false` only when a `--links-to` query is not satisfied.
fn run(cli: &Cli) -> Result<bool, String> {
    let bytes = read_input(&cli.input)?;
    let dom = parse_html_bytes(&bytes);
    let extractor = LinkExtractor::for_document(&dom, &cli.base_url).map_err(|e| e.to_string())?;

    if let Some(target) = &cli.links_to {
        let linked = extractor.links_to(target);
        println!("{linked}");
        return Ok(linked);
    }

    if cli.json {
        let records: Vec<LinkRecord<'_>> = extractor.links().iter().map(LinkRecord::from).collect();
        let json = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        for url in extractor.extract() {
            println!("{url}");
        }
    }

    Ok(true)
}

fn read_input(input: &str) -> Result<Vec<u8>, String> {
    if input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|e| format!("reading stdin: {e}"))?;
        Ok(bytes)
    } else {
        std::fs::read(input).map_err(|e| format!("{input}: {e}"))
    }
}
