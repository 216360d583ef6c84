use clap::Parser;
use log::info;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use xmlpdf::{Renderer, RendererBuilder, RenderError, SiblingOrder};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Render a declarative XML document to PDF.
#[derive(Parser, Debug)]
#[command(name = "xmlpdf", version, about)]
struct Cli {
    /// Markup file to render, or `-` to read standard input.
    input: String,

    /// Where to write the PDF.
    #[arg(short, long, default_value = "tmp.pdf")]
    output: PathBuf,

    /// Gather all siblings sharing a name before moving to the next name.
    #[arg(long)]
    grouped: bool,

    /// Give up if the document is not complete after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Print the parsed element tree as JSON instead of rendering.
    #[arg(long)]
    dump_tree: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut markup = String::new();
        io::stdin().read_to_string(&mut markup)?;
        Ok(markup)
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| io::Error::new(e.kind(), format!("Failed to read markup from '{}': {}", input, e)))
    }
}

fn build_renderer(cli: &Cli) -> Result<Renderer, RenderError> {
    let mut builder = RendererBuilder::new();
    if cli.grouped {
        builder = builder.with_sibling_order(SiblingOrder::GroupedByName);
    }
    if let Some(secs) = cli.timeout {
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|e| RenderError::Config(format!("Invalid timeout '{}': {}", secs, e)))?;
        builder = builder.with_completion_timeout(timeout);
    }
    builder.build()
}

async fn run(cli: Cli) -> Result<(), RenderError> {
    let markup = read_input(&cli.input)?;
    let renderer = build_renderer(&cli)?;

    if cli.dump_tree {
        let root = renderer.parse(&markup)?;
        let tree = BTreeMap::from([(root.name(), &root)]);
        let json = serde_json::to_string_pretty(&tree).map_err(io::Error::from)?;
        println!("{}", json);
        return Ok(());
    }

    info!("Rendering {} to {}", cli.input, cli.output.display());
    let written = renderer.render_to_file(&markup, &cli.output).await?;
    info!("Wrote {} bytes to {}", written, cli.output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
