//! Command-line interface for layouts, exports, scripted editing and serving

use crate::editor::session::EditorSession;
use crate::io::codec;
use crate::io::configuration::{
    DEFAULT_ASSET_DIR, DEFAULT_PAGE_URL, EXPORT_FILENAME, EXPORT_PIXEL_RATIO,
};
use crate::io::error::{Result, file_system, invalid_layout, invalid_parameter};
use crate::io::image::{ExportOptions, export_grid_as_png};
use crate::io::progress::ProgressManager;
use crate::io::script::ScriptRunner;
use crate::io::share::{ClipboardBackend, share_url, system_backends};
use crate::layout::{Grid, catalog};
use crate::server::ServerConfig;
use clap::{Parser, Subcommand};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "chassistile")]
#[command(
    author,
    version,
    about = "Arrange decorative tiles on a laptop chassis layout"
)]
/// Command-line arguments for the layout tool
pub struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more detail (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the editor shell, tile assets and demo API
    Serve(ServerConfig),

    /// Print the cells of a layout token
    Show {
        /// Layout token
        token: String,
    },

    /// Print the token of a freshly randomized layout
    Random,

    /// List the tile catalog
    Tiles,

    /// Render layout tokens to PNG
    Export {
        /// One or more layout tokens
        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,

        /// Output file; numbered per token when several are given
        #[arg(short, long, default_value = EXPORT_FILENAME)]
        output: PathBuf,

        /// Directory containing tiles/<id>.jpg
        #[arg(short, long, env = "ASSET_DIR", default_value = DEFAULT_ASSET_DIR)]
        asset_dir: PathBuf,

        /// Device pixels per CSS pixel
        #[arg(long, default_value_t = EXPORT_PIXEL_RATIO)]
        pixel_ratio: u32,
    },

    /// Copy a share link for a layout token
    Share {
        /// Layout token
        token: String,

        /// Page the link points at
        #[arg(long, default_value = DEFAULT_PAGE_URL)]
        base_url: String,
    },

    /// Drive an editing session from a command script
    Edit {
        /// Page URL to open, optionally carrying ?layout=<token>
        #[arg(long, default_value = DEFAULT_PAGE_URL)]
        url: String,

        /// Script file; reads stdin when omitted
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Directory containing tiles/<id>.jpg
        #[arg(short, long, env = "ASSET_DIR", default_value = DEFAULT_ASSET_DIR)]
        asset_dir: PathBuf,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs a parsed command, writing results to `out`
pub struct CommandRunner<W: Write> {
    cli: Cli,
    out: W,
}

impl<W: Write> CommandRunner<W> {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli, out: W) -> Self {
        Self { cli, out }
    }

    /// Consume the runner, returning the writer
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if a token is invalid, a URL cannot be parsed, an
    /// export fails, or the server cannot start
    pub fn run(&mut self) -> Result<()> {
        match &self.cli.command {
            Command::Serve(config) => crate::server::app::run(config),
            Command::Show { token } => {
                let grid = decode_token(token)?;
                self.write_grid(&grid)
            }
            Command::Random => {
                let token = codec::encode(&Grid::empty().randomize());
                writeln!(self.out, "{token}")?;
                Ok(())
            }
            Command::Tiles => {
                for entry in catalog::entries() {
                    writeln!(self.out, "{:<14} {}", entry.id, entry.display_name)?;
                }
                Ok(())
            }
            Command::Export {
                tokens,
                output,
                asset_dir,
                pixel_ratio,
            } => {
                let options = ExportOptions {
                    asset_dir: asset_dir.clone(),
                    pixel_ratio: *pixel_ratio,
                };
                let show_progress = self.cli.should_show_progress() && tokens.len() > 1;
                export_tokens(tokens, output, &options, show_progress)?;
                Ok(())
            }
            Command::Share { token, base_url } => {
                decode_token(token)?;
                let page = share_url(&parse_url(base_url)?, token);
                let session = EditorSession::open(page);
                let mut clipboards = system_backends();
                let mut backends: Vec<&mut dyn ClipboardBackend> = clipboards
                    .iter_mut()
                    .map(|backend| backend.as_mut() as &mut dyn ClipboardBackend)
                    .collect();
                let notice = session.share(&mut backends);
                writeln!(self.out, "{notice}")?;
                Ok(())
            }
            Command::Edit {
                url,
                script,
                asset_dir,
            } => {
                let session = EditorSession::open(parse_url(url)?);
                let mut runner = ScriptRunner::new(
                    session,
                    &mut self.out,
                    ExportOptions::with_asset_dir(asset_dir.clone()),
                )
                .with_clipboards(system_backends());

                match script {
                    Some(path) => {
                        let file = std::fs::File::open(path)
                            .map_err(file_system(path.as_path(), "open script"))?;
                        runner.run(BufReader::new(file))
                    }
                    None => runner.run(std::io::stdin().lock()),
                }
            }
        }
    }

    fn write_grid(&mut self, grid: &Grid) -> Result<()> {
        for row in grid.rows() {
            let line = row
                .iter()
                .map(|cell| {
                    let known = if catalog::contains(cell.tile_id.as_str()) { "" } else { "?" };
                    format!("{:<16}", format!("{}{known}:{}", cell.tile_id, cell.rotation))
                })
                .collect::<String>();
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn decode_token(token: &str) -> Result<Grid> {
    codec::decode_detailed(token).map_err(|source| invalid_layout(token, source))
}

fn parse_url(text: &str) -> Result<Url> {
    Url::parse(text).map_err(|error| invalid_parameter("url", &text, &error))
}

/// Render every token, numbering outputs when there is more than one
///
/// # Errors
///
/// Returns an error if any token is invalid or any export fails
pub fn export_tokens(
    tokens: &[String],
    output: &Path,
    options: &ExportOptions,
    show_progress: bool,
) -> Result<Vec<PathBuf>> {
    let grids = tokens
        .iter()
        .map(|token| decode_token(token))
        .collect::<Result<Vec<_>>>()?;

    let mut progress = show_progress.then(ProgressManager::new);
    if let Some(ref mut pm) = progress {
        pm.initialize(grids.len());
    }

    let mut written = Vec::with_capacity(grids.len());
    for (index, grid) in grids.iter().enumerate() {
        let start_time = Instant::now();
        let path = if grids.len() == 1 {
            output.to_path_buf()
        } else {
            numbered_output_path(output, index + 1)
        };

        if let Some(ref mut pm) = progress {
            pm.start_layout(index, &path.to_string_lossy());
        }

        export_grid_as_png(grid, options, &path)?;

        if let Some(ref mut pm) = progress {
            pm.complete_layout(index, start_time.elapsed());
        }
        written.push(path);
    }

    if let Some(ref pm) = progress {
        pm.finish();
    }
    tracing::info!(count = written.len(), "export batch finished");
    Ok(written)
}

/// `out.png` becomes `out-<n>.png`
pub fn numbered_output_path(output: &Path, number: usize) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    let name = output.extension().map_or_else(
        || format!("{stem}-{number}"),
        |extension| format!("{stem}-{number}.{}", extension.to_string_lossy()),
    );
    output.with_file_name(name)
}
