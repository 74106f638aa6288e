use std::fs;
use std::path::{Path, PathBuf};

use blogmark::{Catalog, Config, ContactRequest, Error, Post, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blogmark")]
#[command(about = "Render blog posts and highlight code snippets")]
struct Cli {
    /// Config file (defaults to config.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a markdown post
    Render {
        /// Input markdown file, optionally with +++ front matter
        input: PathBuf,

        /// Output file (defaults to input name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
        format: Format,
    },
    /// Highlight a JavaScript/TypeScript source file
    Highlight {
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = HighlightFormat::Html)]
        format: HighlightFormat,
    },
    /// List the posts in a directory
    Posts {
        dir: PathBuf,

        /// Only show posts in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Preview the email a contact form submission produces
    Contact {
        /// JSON file with the form fields
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Html,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Typst => "typ",
            Format::Html => "html",
            Format::Json => "json",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HighlightFormat {
    Html,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = Config::load(&config_path)?;

    match cli.command {
        Command::Render {
            input,
            output,
            format,
        } => render(&input, output, format, &config),
        Command::Highlight { input, format } => {
            let source = read(&input)?;
            let tokens = blogmark::tokenize(&source);
            match format {
                HighlightFormat::Html => {
                    let language = input.extension().and_then(|ext| ext.to_str());
                    print!("{}", blogmark::tokens_to_html(&tokens, language, &config));
                }
                HighlightFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
            }
            Ok(())
        }
        Command::Posts { dir, category } => {
            let catalog = Catalog::load_dir(&dir)?;
            let category = category.as_deref().unwrap_or(blogmark::ALL_CATEGORIES);
            for post in catalog.in_category(category) {
                let meta = &post.meta;
                let marker = if meta.featured { "*" } else { " " };
                println!(
                    "{marker} {:10} {:40} {:12} {}",
                    meta.published_at, meta.slug, meta.category, meta.read_time
                );
            }
            Ok(())
        }
        Command::Contact { input } => {
            let request: ContactRequest = serde_json::from_str(&read(&input)?)?;
            let email = request.to_email();
            println!("Subject: {}\n\n{}", email.subject, email.text);
            Ok(())
        }
    }
}

fn render(input: &Path, output: Option<PathBuf>, format: Format, config: &Config) -> Result<()> {
    let post = Post::parse(&read(input)?)?;
    let blocks = post.blocks();

    let bytes = match format {
        Format::Pdf => blogmark::blocks_to_pdf(&blocks, config)?,
        Format::Typst => blogmark::blocks_to_typst(&blocks, config).into_bytes(),
        Format::Html => blogmark::blocks_to_html(&blocks, config).into_bytes(),
        Format::Json => serde_json::to_vec_pretty(&serde_json::json!({
            "meta": post.meta,
            "blocks": blocks,
        }))?,
    };

    let output = output.unwrap_or_else(|| input.with_extension(format.extension()));
    fs::write(&output, bytes).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;

    println!("Created {}", output.display());
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
