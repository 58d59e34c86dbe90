//! Reads character frequency lists such as Jun Da's
//! See <https://lingua.mtsu.edu/chinese-computing/statistics/>
//!
//! The lists have a rank and a character on each line followed by counts and other details,
//! with some preamble that doesn't start with a rank.

use hanzi::{is_hanzi, FrequencyTable};
use std::io::BufRead;

pub fn read<R: BufRead>(r: R) -> eyre::Result<FrequencyTable> {
    let mut ranked = Vec::new();
    for line in r.lines() {
        let line = line?;
        let mut columns = line.split_whitespace();
        let (Some(rank), Some(character)) = (columns.next(), columns.next()) else {
            continue;
        };
        let Ok(rank) = rank.parse::<u32>() else {
            tracing::debug!("skipping line {line}");
            continue;
        };
        let mut chars = character.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_hanzi(c) => ranked.push((rank, c)),
            _ => tracing::debug!("skipping non-hanzi {character}"),
        }
    }
    if ranked.is_empty() {
        eyre::bail!("No ranked hanzi found in the input");
    }

    // stable, so ties keep the order of the input
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(FrequencyTable::from_ordered(ranked.into_iter().map(|(_, c)| c)))
}

pub fn write(table: &FrequencyTable) -> String {
    let mut out = String::from(
        "# Simplified Chinese character frequency ranks.\n# rank<TAB>character, rank 1 is the most frequent.\n",
    );
    out.push_str(&table.to_tsv());
    out
}
