//! Command-line survey runner: photographs in, `gcp.xml` out.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use gcp_survey::{
    build_correlation_document, init_with_level, survey_xml_string, write_survey_file,
    SurveyConfig, SurveyError,
};

#[derive(Parser, Debug)]
#[command(name = "gcp-survey", version, about = "Correlate floor markers in scan photographs with their 3D positions")]
struct Args {
    /// Directory containing the captured jpg/jpeg images.
    image_dir: PathBuf,

    /// Output file. Defaults to gcp.xml inside the image directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding the marker layout and detector parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(path: &PathBuf) -> Result<SurveyConfig, SurveyError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SurveyError::ParamsRead {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SurveyError::ParamsParse {
        path: path.clone(),
        source,
    })
}

fn run(args: &Args) -> Result<(), SurveyError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SurveyConfig::default(),
    };

    let document = build_correlation_document(&args.image_dir, &config)?;

    if args.stdout {
        print!("{}", survey_xml_string(&document));
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.image_dir.join("gcp.xml"));
    match write_survey_file(&document, &output) {
        Ok(()) => {
            log::info!("wrote ground control points to {}", output.display());
            Ok(())
        }
        Err(err) => {
            // The document survives a failed write; hand it to stdout so the
            // run is still useful.
            log::error!("{err}");
            print!("{}", survey_xml_string(&document));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = init_with_level(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
