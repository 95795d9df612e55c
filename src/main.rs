use clap::{Parser, Subcommand};
use instant_gallery::config::{self, ServerConfig};
use instant_gallery::types::Theme;
use instant_gallery::{generate, logging, output, scan, serve};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("GALLERY_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GALLERY_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "instant-gallery")]
#[command(about = "Browse the images in one directory as a masonry gallery")]
#[command(long_about = "\
Browse the images in one directory as a masonry gallery

Only the directory itself is scanned, never subdirectories. Accepted
formats: jpg, jpeg, png, gif, svg, webp (any letter case). Newest files
come first.

  photos/
  ├── gallery.toml        # Optional: title, default theme, colors, server
  ├── sunset.JPG          # listed
  ├── diagram.svg         # listed, size read from width/height or viewBox
  ├── notes.txt           # ignored
  └── archive/            # ignored

Run 'instant-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory to scan
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the images in the source directory
    Scan {
        /// Print the JSON list instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a static index.html for the source directory
    Build {
        /// Output directory (defaults to the source directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Theme to render with (light or dark)
        #[arg(long)]
        theme: Option<Theme>,
        /// Show filename, size, and dimensions over each image
        /// (`--show-info=false` turns off a configured default)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        show_info: Option<bool>,
    },
    /// Serve the gallery over HTTP, re-scanning on every request
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    match cli.command {
        Command::Scan { json } => {
            let records = scan::scan(&cli.source, scan::IMAGE_EXTENSIONS);
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                output::print_scan_output(&records, &cli.source);
            }
        }
        Command::Build {
            output,
            theme,
            show_info,
        } => {
            let gallery_config = config::load_config(&cli.source)?;
            let options = gallery_config.display.render_options(theme, show_info);
            let output_dir = output.unwrap_or_else(|| cli.source.clone());
            let records = scan::scan(&cli.source, scan::IMAGE_EXTENSIONS);
            let summary = generate::generate(
                &cli.source,
                &output_dir,
                &records,
                &gallery_config,
                options,
            )?;
            output::print_generate_output(&summary);
        }
        Command::Serve { bind, port } => {
            let gallery_config = config::load_config(&cli.source)?;
            let server = ServerConfig {
                bind: bind.unwrap_or_else(|| gallery_config.server.bind.clone()),
                port: port.unwrap_or(gallery_config.server.port),
            };
            let addr = server.socket_addr()?;
            println!("Serving {} at http://{addr}/", cli.source.display());

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve::run(cli.source, gallery_config, addr))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
