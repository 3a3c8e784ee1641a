use clap::{Parser, Subcommand};
use dirpreview::config::{self, Config, Section};
use dirpreview::imaging::RustBackend;
use dirpreview::output::{self, GalleryInfo, ScanReport};
use dirpreview::paging::Pagination;
use dirpreview::preview::{self, PageSelect, Previewer};
use dirpreview::scan;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dirpreview")]
#[command(about = "Thumbnail grid previews of image directories")]
#[command(long_about = "\
Thumbnail grid previews of image directories

A directory is scanned for images (optionally one level into its
subdirectories), sorted in natural order, and laid out page by page on a
fixed or adaptive grid. Each page renders to a single bitmap.

Settings come from a TOML file with [view] and [thumbs] sections; keys in
[common] apply to both. Run 'dirpreview gen-config' to generate a
documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = "dirpreview.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone)]
struct CanvasArgs {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Which settings section to use
    #[arg(long, value_enum, default_value_t = Section::Thumbs)]
    section: Section,
}

#[derive(Subcommand)]
enum Command {
    /// List the images a directory preview would show, page by page
    Scan {
        dir: PathBuf,
        /// Which settings section to use
        #[arg(long, value_enum, default_value_t = Section::Thumbs)]
        section: Section,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one page of a directory preview to an image file
    Render {
        dir: PathBuf,
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Output image (format from the extension)
        #[arg(long, short, default_value = "preview.png")]
        output: PathBuf,
        /// Page to render, starting at 1
        #[arg(long, conflicts_with = "last")]
        page: Option<usize>,
        /// Render the last page
        #[arg(long)]
        last: bool,
    },
    /// Print grid geometry and page information for a directory
    Info {
        dir: PathBuf,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { dir, section, json } => {
            let (config, _logger) = setup(&cli.config)?;
            let gallery_config = config.gallery(section);
            let files = scan::scan(&dir, gallery_config);
            let paging = Pagination::new(gallery_config.cols, gallery_config.rows, gallery_config.shift);
            let report = ScanReport::new(&dir, &files, paging.page_size(), paging.pages_count(files.len()));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_scan_output(&report, paging.shift());
            }
        }
        Command::Render {
            dir,
            canvas,
            output: out_path,
            page,
            last,
        } => {
            let (config, _logger) = setup(&cli.config)?;
            let select = match (page, last) {
                (_, true) => PageSelect::Last,
                (Some(n), false) => PageSelect::Index(n.saturating_sub(1)),
                (None, false) => PageSelect::First,
            };
            let previewer = Previewer::new(config, RustBackend::new());
            match previewer.render(&dir, canvas.section, canvas.width, canvas.height, select)? {
                Some(bitmap) => {
                    preview::write_bitmap(&bitmap, &out_path)?;
                    println!("{}", output::format_render_output(&out_path, &bitmap));
                }
                None => println!("{}", output::format_skipped(&dir)),
            }
        }
        Command::Info { dir, canvas } => {
            let (config, _logger) = setup(&cli.config)?;
            let previewer = Previewer::new(config, RustBackend::new());
            match previewer.gallery(&dir, canvas.section, canvas.width, canvas.height)? {
                Some(mut gallery) => {
                    gallery.update();
                    output::print_info_output(&GalleryInfo::of(&gallery));
                }
                None => println!("{}", output::format_skipped(&dir)),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config, then bring up logging and the decoding pool it describes.
fn setup(path: &Path) -> Result<(Config, LoggerHandle), Box<dyn std::error::Error>> {
    let config = config::load_config(path)?;
    let logger = init_logging(&config.general)?;
    init_thread_pool(&config.processing);
    log::debug!(
        "dirpreview {} | config {}",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Ok((config, logger))
}

/// Start the logger at the configured level, to `log_file` or stderr.
///
/// `RUST_LOG` takes precedence over the config when set.
fn init_logging(general: &config::GeneralConfig) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(general.log.as_spec())?;
    let logger = match &general.log_file {
        Some(path) => logger.log_to_file(FileSpec::try_from(path)?),
        None => logger,
    };
    logger.start()
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
