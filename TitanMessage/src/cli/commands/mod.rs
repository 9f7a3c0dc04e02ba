use clap::Subcommand;
use std::path::PathBuf;

pub mod convert;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert binary files (.mbm, .tbl) to JSON files
    #[command(visible_alias = "j")]
    Json {
        /// Source directory (game files)
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory for JSON files
        #[arg(short, long)]
        destination: PathBuf,

        /// Allow overwriting of existing files
        #[arg(short, long)]
        overwrite: bool,

        /// JSON character map (`{"game char": "readable char"}`)
        #[arg(long)]
        charmap: Option<PathBuf>,

        /// Continue with the next file when one fails
        #[arg(long)]
        keep_going: bool,

        /// Convert every .mbm/.tbl instead of only the known text files
        #[arg(long)]
        all: bool,
    },

    /// Convert JSON files back to binary files
    #[command(visible_alias = "b")]
    Binary {
        /// Source directory (JSON files)
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory for binary files
        #[arg(short, long)]
        destination: PathBuf,

        /// Allow overwriting of existing files
        #[arg(short, long)]
        overwrite: bool,

        /// JSON character map (`{"game char": "readable char"}`)
        #[arg(long)]
        charmap: Option<PathBuf>,

        /// Continue with the next file when one fails
        #[arg(long)]
        keep_going: bool,
    },

    /// Show a summary of a .mbm or .tbl file
    Inspect {
        /// Binary file to inspect
        path: PathBuf,

        /// JSON character map (`{"game char": "readable char"}`)
        #[arg(long)]
        charmap: Option<PathBuf>,

        /// Also print every entry
        #[arg(short, long)]
        entries: bool,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Json {
                source,
                destination,
                overwrite,
                charmap,
                keep_going,
                all,
            } => convert::binary_to_json(
                source,
                destination,
                &convert::ConvertArgs {
                    overwrite: *overwrite,
                    charmap: charmap.as_deref(),
                    keep_going: *keep_going,
                    all: *all,
                },
            ),
            Commands::Binary {
                source,
                destination,
                overwrite,
                charmap,
                keep_going,
            } => convert::json_to_binary(
                source,
                destination,
                &convert::ConvertArgs {
                    overwrite: *overwrite,
                    charmap: charmap.as_deref(),
                    keep_going: *keep_going,
                    all: false,
                },
            ),
            Commands::Inspect {
                path,
                charmap,
                entries,
            } => inspect::execute(path, charmap.as_deref(), *entries),
        }
    }
}
