use std::path::PathBuf;

use canvas::config::EditorConfig;
use canvas::doc::GridPosition;
use canvas::hit::ResizeHandle;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "coachdeck", about = "Coach deck layout editor: headless tools", version)]
pub struct Cli {
    /// Pixels per grid unit used when replaying gestures.
    #[arg(long, env = "COACHDECK_CELL_SIZE", default_value_t = canvas::consts::CELL_SIZE_PX, global = true)]
    pub cell_size: f64,

    /// Grid padding in pixels used when replaying gestures.
    #[arg(long, env = "COACHDECK_PADDING", default_value_t = canvas::consts::GRID_PADDING_PX, global = true)]
    pub padding: f64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    #[must_use]
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig { cell_size_px: self.cell_size, padding_px: self.padding, ..EditorConfig::default() }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the built-in "Standard Coach" layout.
    Template,
    /// Parse a layout and print it in canonical form.
    Fmt(InputArgs),
    /// Report out-of-bounds, overlapping, degenerate, or duplicate elements.
    Check(InputArgs),
    /// List element types.
    Catalog {
        /// Only entries whose name or code contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Drag an element so its top-left lands on a cell.
    Drag {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        id: String,
        /// Target cell as `X,Y`.
        #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
        to: GridPosition,
    },
    /// Drag a corner handle of an element to a cell.
    Resize {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        id: String,
        /// One of nw, ne, sw, se.
        #[arg(long, default_value = "se")]
        handle: ResizeHandle,
        /// Pointer cell as `X,Y`.
        #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
        to: GridPosition,
    },
    /// Apply one property edit (e.g. `--field seatNumber --value 12A`).
    Set {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        id: String,
        #[arg(long)]
        field: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Layout file, or - for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

/// Parse `X,Y` into a grid cell.
///
/// # Errors
///
/// Returns a message when either coordinate is missing or not an integer.
pub fn parse_cell(raw: &str) -> Result<GridPosition, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{raw}`"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad X in `{raw}`: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad Y in `{raw}`: {e}"))?;
    Ok(GridPosition::new(x, y))
}
