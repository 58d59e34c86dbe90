use clap::{Parser, Subcommand, ValueEnum};
use hanzi::ToneStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The path to a frequency table to use instead of the bundled one.
    #[arg(short, long, global = true, env = "HANZI_FREQUENCY_TABLE")]
    pub frequency_table: Option<PathBuf>,
    /// The path to phrase readings to use in addition to the bundled ones.
    #[arg(short, long, global = true, env = "HANZI_PHRASE_TABLE")]
    pub phrase_table: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Splits text into sentences and prints every character with its pinyin as JSON.
    Segment {
        /// The text to segment. Read from stdin if missing.
        #[arg(short, long)]
        text: Option<String>,
        /// How tones are written.
        #[arg(long, value_enum, default_value_t = Tones::Symbol)]
        tones: Tones,
    },
    /// Prints how difficult the text is to read.
    Analyze {
        /// The text to analyze. Read from stdin if missing.
        #[arg(short, long)]
        text: Option<String>,
        /// Print the report as JSON instead of a histogram.
        #[arg(long)]
        json: bool,
    },
    /// Converts a character frequency list into a frequency table.
    Freqfile {
        /// The path to the input list, with a rank and a character on each line.
        #[arg(short, long)]
        input: PathBuf,
        /// The path to the output table.
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Tones {
    /// Tone marks, hǎo
    Symbol,
    /// Tone numbers, hao3
    Number,
    /// No tones, hao
    None,
}

impl From<Tones> for ToneStyle {
    fn from(value: Tones) -> Self {
        match value {
            Tones::Symbol => ToneStyle::Symbol,
            Tones::Number => ToneStyle::Number,
            Tones::None => ToneStyle::None,
        }
    }
}
