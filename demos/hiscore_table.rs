//! Example: show and update the highscore table of a song directory.
//!
//! ```text
//! cargo run --example hiscore_table -- "songs/My Song"
//! cargo run --example hiscore_table -- "songs/My Song" --name Mika --score 8200
//! ```
//!
//! Set `RUST_LOG=debug` to see what the store does.

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use sco_rs::prelude::*;

/// Configuration parameters
#[derive(Parser, Debug)]
#[command(name = "hiscore_table")]
#[command(about = "Shows and updates the High.sco of a song", long_about = None)]
struct Config {
    /// Song directory path
    #[arg(value_name = "DIR")]
    song_dir: PathBuf,

    /// Highscore file name in the directory
    #[arg(long, default_value = DEFAULT_FILE_NAME, value_name = "FILE")]
    file_name: String,

    /// Name to record, together with `--score`
    #[arg(short, long, requires = "score")]
    name: Option<String>,

    /// Score to record, between 0 and 10000
    #[arg(short, long, requires = "name")]
    score: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::init();
    let config = Config::parse();

    let mut hiscore = SongHiscore::new(&config.song_dir, &config.file_name);
    if let Err(err) = hiscore.load() {
        report_load_error(&hiscore, &err);
        return ExitCode::FAILURE;
    }

    if let (Some(name), Some(score)) = (config.name, config.score) {
        if !hiscore.reached_new_hiscore(score) {
            println!("{score} does not beat the top 3, nothing recorded.");
        } else if !hiscore.is_writable() {
            println!("{} is not writable, nothing recorded.", hiscore.file_path().display());
        } else {
            if let Some(rank) = hiscore.add_new_hiscore(name, score) {
                println!("Recorded at rank {}.", rank + 1);
            }
            if let Err(err) = hiscore.save() {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(err) = hiscore.get_info(&mut io::stdout().lock()) {
        eprintln!("failed to print the table: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn report_load_error(hiscore: &SongHiscore, err: &HiscoreError) {
    let HiscoreError::Parse { path, source } = err else {
        eprintln!("{err}");
        return;
    };
    // The file was readable a moment ago, so show the offending line in place.
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = decode_sco(&bytes);
            let name = hiscore.file_path().display().to_string();
            emit_parse_error(&name, &text, source);
        }
        Err(_) => eprintln!("{err}"),
    }
}
