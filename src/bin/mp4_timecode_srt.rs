use clap::{ArgAction, Parser};
use mp4srt::subtitles::has_mp4_extension;
use mp4srt::write_timecode_srt;
use std::path::PathBuf;
use std::process::ExitCode;

/// Write the recording date and time of every second of an MP4 clip as SRT captions
#[derive(Debug, Parser)]
#[command(name = "mp4_timecode_srt", version)]
struct Args {
    /// Input video (.mp4 or .MP4)
    #[arg(value_parser = parse_input)]
    input: PathBuf,

    /// Where to write the captions; defaults to the input path with an .srt extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more detail (-v for box traversal, -vv for everything)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print a JSON summary of what was found
    #[arg(long)]
    json: bool,
}

fn parse_input(value: &str) -> Result<PathBuf, String> {
    if has_mp4_extension(value) {
        Ok(PathBuf::from(value))
    } else {
        Err("Please provide a valid MP4 video file path.".to_string())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let summary = match write_timecode_srt(&args.input, args.output.as_deref()) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Failed to process {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match &summary.srt_path {
            Some(path) => println!(
                "Wrote {} captions to {}",
                summary.captions_written,
                path.display()
            ),
            None => println!("No timecodes written for {}", args.input.display()),
        }
        for problem in &summary.problems {
            println!("warning: {}", problem);
        }
    }

    ExitCode::SUCCESS
}
