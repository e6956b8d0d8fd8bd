use clap::{Parser, Subcommand};
use listing_page::config::{self, IndexConfig};
use listing_page::generate::{self, GenerateError};
use listing_page::{output, scan};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "listing-page")]
#[command(about = "Generate a Hugo homepage listing from the content directory")]
#[command(long_about = "\
Generate a Hugo homepage listing from the content directory

Top-level content directories become categories and their subdirectories
become cards. Each card lists the pages of its directory, newest first,
when Hugo builds the site.

Content structure:

  content/
  ├── authors/            # Excluded (see [exclude] in the config)
  ├── conf_a/             # Category → <h3>
  │   ├── 2020/           # Card → {{ range ... \"/conf_a/2020/\" }}
  │   └── 2021/
  └── conf_b/
      └── 2019/

The intro fragment is copied verbatim above the categories. The output
file is replaced atomically; a failed run leaves it untouched.

Run 'listing-page gen-config' to generate a documented listing-page.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; stock defaults apply when missing)
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    /// Content directory [default: content]
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Intro fragment copied into the page [default: themes/berbera/layouts/index_intro.html]
    #[arg(long, global = true)]
    intro: Option<PathBuf>,

    /// Output template file [default: themes/berbera/layouts/index.html]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the listing template
    Build,
    /// Print the categories and cards that would be generated
    Scan {
        /// Print the content tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the content directory and intro fragment without writing
    Check,
    /// Print a stock listing-page.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let config = resolve_config(&cli)?;
            println!("==> Generating {}", config.output.display());
            let report = generate::generate(&config)?;
            output::print_generate_output(&report);
        }
        Command::Scan { json } => {
            let config = resolve_config(&cli)?;
            let source = config.content_root.as_path();
            let tree = scan::scan(source, &config.exclude)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                output::print_scan_output(&tree, source);
            }
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            let source = config.content_root.as_path();
            println!("==> Checking {}", source.display());
            let tree = scan::scan(source, &config.exclude)?;
            let intro = config.intro.as_path();
            std::fs::read_to_string(intro).map_err(|e| GenerateError::Intro {
                path: intro.to_path_buf(),
                source: e,
            })?;
            output::print_scan_output(&tree, source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so `scan --json` output stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file, then apply command-line path overrides.
fn resolve_config(cli: &Cli) -> Result<IndexConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(source) = &cli.source {
        config.content_root = source.clone();
    }
    if let Some(intro) = &cli.intro {
        config.intro = intro.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    config.validate()?;
    Ok(config)
}
