//! Command line tools for hanzi.

mod cli;
mod freqfile;
mod report;

use clap::Parser;
use cli::{Cli, Command};
use eyre::WrapErr;
use hanzi::{DifficultyAnalyzer, FrequencyTable, PinyinTransliterator, Segmenter, ToneStyle};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Segment { text, tones } => {
            let transliterator = match cli.phrase_table.as_deref() {
                Some(path) => PinyinTransliterator::load_or_bundled(path),
                None => PinyinTransliterator::new(),
            };
            segment(transliterator, &input_text(text)?, tones.into())?;
        }
        Command::Analyze { text, json } => {
            let table = frequency_table(cli.frequency_table.as_deref());
            analyze(&input_text(text)?, &table, json)?;
        }
        Command::Freqfile { input, output } => {
            create_freqfile(&input, &output)?;
        }
    }

    Ok(())
}

fn segment(
    transliterator: PinyinTransliterator,
    text: &str,
    tone_style: ToneStyle,
) -> eyre::Result<()> {
    let segmenter = Segmenter::new(transliterator).with_tone_style(tone_style);
    let sentences = segmenter.process_text_detailed(text);
    for sentence in sentences.iter().filter(|s| !s.resolved_by_context()) {
        tracing::warn!(
            "Used per-character readings for '{}': {:?}",
            sentence.sentence,
            sentence.resolution
        );
    }
    let tokens = sentences
        .into_iter()
        .flat_map(|s| s.tokens)
        .collect::<Vec<_>>();
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

fn analyze(text: &str, table: &FrequencyTable, json: bool) -> eyre::Result<()> {
    let analyzer = DifficultyAnalyzer::new(table);
    let difficulty = analyzer.analyze(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&difficulty)?);
    } else {
        let by_level = analyzer.unique_by_level(text);
        print!("{}", report::histogram(&difficulty, &by_level));
    }
    Ok(())
}

fn create_freqfile(input: &Path, output: &Path) -> eyre::Result<()> {
    tracing::info!("reading frequency list");
    let table = freqfile::read(BufReader::new(open(input)?))?;

    tracing::info!("writing {} ranked characters", table.len());
    std::fs::write(output, freqfile::write(&table))
        .wrap_err_with(|| format!("Failed to write file at '{}'", output.display()))?;
    Ok(())
}

fn frequency_table(path: Option<&Path>) -> FrequencyTable {
    match path {
        Some(path) => FrequencyTable::load_or_empty(path),
        None => FrequencyTable::bundled(),
    }
}

fn input_text(text: Option<String>) -> eyre::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .wrap_err("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}

fn open(path: &Path) -> eyre::Result<File> {
    File::open(path).wrap_err_with(|| format!("Failed to open file at '{}'", path.display()))
}
