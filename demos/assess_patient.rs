//! Example: Assess a single patient form
//!
//! Usage:
//!   cargo run --example assess_patient -- [--scaler PATH] [--model PATH] [--json] [form.json]
//!
//! Without a form file the screening form's default values are assessed.

use preventive_screening::{assess_form, ModelStore, PatientForm, RiskClassifier, ScreeningConfig};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "Usage: assess_patient [--scaler PATH] [--model PATH] [--json] [form.json]\n\
                     \n\
                     --scaler PATH  Fitted scaler artifact (default: scaler.json)\n\
                     --model PATH   Fitted classifier artifact (default: model.json)\n\
                     --json         Print the assessment as JSON\n";

/// Parsed command line
#[derive(Debug)]
struct Options {
    config: ScreeningConfig,
    json: bool,
    form_path: Option<PathBuf>,
    help: bool,
}

fn parse_args(mut args: Vec<String>) -> Result<Options, String> {
    let mut options = Options {
        config: ScreeningConfig::default(),
        json: false,
        form_path: None,
        help: false,
    };

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => options.json = true,
            "--scaler" | "--model" => {
                if args.is_empty() {
                    return Err(format!("{} requires a path", a));
                }
                let path = PathBuf::from(args.remove(0));
                if a == "--scaler" {
                    options.config.scaler_path = path;
                } else {
                    options.config.model_path = path;
                }
            }
            "-h" | "--help" => options.help = true,
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option '{}'. Use --help for usage.", flag));
            }
            _ => {
                if options.form_path.is_some() {
                    return Err("only one form file may be given. Use --help for usage.".to_string());
                }
                options.form_path = Some(PathBuf::from(a));
            }
        }
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let options = parse_args(env::args().skip(1).collect())?;
    if options.help {
        eprintln!("{}", USAGE);
        return Ok(());
    }
    let Options {
        config,
        json,
        form_path,
        ..
    } = options;

    // Artifacts load once; failure here is fatal
    let models = match ModelStore::load(&config) {
        Ok(models) => models,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let classifier = RiskClassifier::new(Arc::new(models));

    let form: PatientForm = match &form_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => PatientForm::default(),
    };

    match assess_form(&form, &classifier, &config) {
        Ok(assessment) if json => println!("{}", assessment.to_json()?),
        Ok(assessment) => println!("{}", assessment),
        Err(e) => {
            eprintln!("Assessment failed: {}", e);
            std::process::exit(2);
        }
    }

    Ok(())
}
