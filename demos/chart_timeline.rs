//! Parse a simai chart and print its measures and note timeline.
//!
//! Usage:
//!   cargo run --example `chart_timeline` -- <`file_path`> [--at <MILLISECONDS>]
//!
//! Set `RUST_LOG=debug` to see the parser and converter logs.

use std::path::PathBuf;

use clap::Parser;
use simai_rs::{
    chart_process::{
        convert_chart_with_measures_with_config,
        index::{TimeSortedIndex, get_visible_notes},
        tempo::ConvertConfig,
    },
    diagnostics::emit_parse_errors,
    simai::{command::positive_bpm, parse::DEFAULT_DIVISION, parse_simai},
};

#[derive(Parser, Debug)]
#[command(name = "chart_timeline")]
#[command(about = "Prints the measures and note times of a simai chart", long_about = None)]
struct Config {
    /// Chart file path
    #[arg(value_name = "FILE")]
    chart_path: PathBuf,

    /// Tempo assumed when the chart does not give one
    #[arg(long, value_name = "BPM")]
    assume_bpm: Option<f64>,

    /// Print the notes visible around this time instead of the whole timeline
    #[arg(long, value_name = "MILLISECONDS")]
    at: Option<f64>,

    /// Half width of the visible window (milliseconds)
    #[arg(short, long, default_value = "1000", value_name = "MILLISECONDS")]
    window: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = Config::parse();

    let source = std::fs::read_to_string(&config.chart_path)?;
    let name = config.chart_path.to_string_lossy().into_owned();
    let output = parse_simai(&source);
    emit_parse_errors(&name, &source, &output.errors);

    let metadata = output.chart.metadata();
    println!("Title: {}", metadata.title.as_deref().unwrap_or("Unknown"));
    println!("Artist: {}", metadata.artist.as_deref().unwrap_or("Unknown"));
    println!("Charter: {}", metadata.charter.as_deref().unwrap_or("Unknown"));
    println!();

    let mut convert_config = ConvertConfig::new();
    if let Some(bpm) = config.assume_bpm {
        let bpm = positive_bpm(bpm).ok_or("--assume-bpm must be positive")?;
        convert_config = convert_config.assume_tempo(bpm, DEFAULT_DIVISION);
    }
    let timeline = convert_chart_with_measures_with_config(&output.chart, &convert_config)?;

    if let Some(time) = config.at {
        let index = TimeSortedIndex::new(&timeline.notes);
        let visible = get_visible_notes(&index, time, config.window);
        println!(
            "{} note(s) within {:.3}ms of {:.3}ms:",
            visible.len(),
            config.window,
            time
        );
        for note in visible {
            println!(
                "  #{:<5} {:>10.3}ms..{:>10.3}ms {:?}",
                note.id.value(),
                note.hit_time,
                note.end_time(),
                note.note
            );
        }
        if let Some(position) = timeline.locate(time) {
            println!(
                "Measure {}, beat {}",
                position.measure_number, position.beat
            );
        }
        return Ok(());
    }

    for measure in &timeline.measures {
        println!(
            "Measure {:>4}: {:>10.3}ms..{:>10.3}ms ({} bpm {{{}}})",
            measure.measure_number,
            measure.start_time,
            measure.end_time,
            measure.bpm.as_f64(),
            measure.division
        );
        for note in timeline
            .notes
            .iter()
            .filter(|note| measure.contains(note.hit_time))
        {
            let each = if note.is_each { " EACH" } else { "" };
            println!("    {:>10.3}ms {:?}{each}", note.hit_time, note.note);
        }
    }
    println!();
    println!(
        "{} note(s), {} measure(s), {:.3}ms",
        timeline.notes.len(),
        timeline.measures.len(),
        timeline.total_duration
    );
    Ok(())
}
