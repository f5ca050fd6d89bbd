use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use beatchart_lib::commands::{self, ConfigSource, DetectChartInput};
use beatchart_lib::detect::Difficulty;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate rhythm game note charts from WAV files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect beats in a WAV file and write a note chart
    Detect {
        input: PathBuf,

        /// Chart output path (defaults to the input path with a .txt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// easy, normal or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Sensitivity over the average volume
        #[arg(long)]
        threshold: Option<f64>,

        /// Minimum gap between notes in milliseconds
        #[arg(long)]
        min_interval_ms: Option<u32>,

        /// JSON file with `threshold` and/or `min_interval_ms`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Append a JSONL trace of the pipeline stages
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Print the chart to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the difficulty presets
    Presets,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Presets => {
            for (difficulty, config) in commands::list_presets() {
                println!(
                    "{:<8} threshold={} min_interval_ms={}",
                    difficulty, config.threshold, config.min_interval_ms
                );
            }
            ExitCode::SUCCESS
        }
        Command::Detect {
            input,
            output,
            difficulty,
            threshold,
            min_interval_ms,
            config,
            trace,
            stdout,
            json,
        } => {
            let output_path = if stdout {
                None
            } else {
                Some(output.unwrap_or_else(|| input.with_extension("txt")))
            };

            let request = DetectChartInput {
                audio_path: input,
                output_path,
                trace_path: trace,
                config: ConfigSource {
                    config_file: config,
                    difficulty,
                    threshold,
                    min_interval_ms,
                },
            };

            match commands::detect_chart(request).await {
                Ok(result) => {
                    if json {
                        match serde_json::to_string_pretty(&result) {
                            Ok(text) => println!("{}", text),
                            Err(e) => {
                                log::error!("Failed to serialize result: {}", e);
                                return ExitCode::FAILURE;
                            }
                        }
                    } else if stdout {
                        println!("{}", result.chart_text);
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
