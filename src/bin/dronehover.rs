use std::{env, process::ExitCode};

use dronehover::{Hover, HoverSolverConfig, StandardAirframe};
use tracing::error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: dronehover <airframe> [arm_length] [--verbose] [--json] \
[--tolerance <f64>] [--max-iterations <n>] [--seed <u64>] [--observe]
       dronehover list";

struct Args {
    airframe: StandardAirframe,
    arm_length: Option<f64>,
    json: bool,
    config: HoverSolverConfig,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value \"{}\" for {}", value, flag))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut airframe = None;
    let mut arm_length = None;
    let mut json = false;
    let mut config = HoverSolverConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => config = config.with_verbose(true),
            "--json" => json = true,
            "--observe" => config = config.with_observer(true),
            "--tolerance" => config = config.with_tolerance(parse_value(&arg, args.next())?),
            "--max-iterations" => {
                config = config.with_max_iterations(parse_value(&arg, args.next())?)
            }
            "--seed" => config = config.with_seed(parse_value(&arg, args.next())?),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            positional if airframe.is_none() => {
                airframe = Some(
                    positional
                        .parse::<StandardAirframe>()
                        .map_err(|e| e.to_string())?,
                );
            }
            positional if arm_length.is_none() => {
                arm_length = Some(parse_value("arm_length", Some(positional.to_string()))?);
            }
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }

    Ok(Args {
        airframe: airframe.ok_or("missing airframe")?,
        arm_length,
        json,
        config,
    })
}

fn list_airframes() {
    println!("{:<14} {:>7} {:>12}", "airframe", "props", "arm length");
    for airframe in StandardAirframe::ALL {
        let props = airframe
            .build(airframe.default_arm_length())
            .map(|spec| spec.propeller_count().to_string())
            .unwrap_or_else(|_| "?".to_string());
        let arm = if airframe.uses_arm_length() {
            format!("{:.2} m", airframe.default_arm_length())
        } else {
            "fixed".to_string()
        };
        println!("{:<14} {:>7} {:>12}", airframe.name(), props, arm);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let arm_length = args
        .arm_length
        .unwrap_or_else(|| args.airframe.default_arm_length());
    let spec = args.airframe.build(arm_length)?;
    let mut hover = Hover::new(spec, args.config)?;
    let result = hover.compute_hover()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} ({})", args.airframe, result.status.code());
        println!("{}", result);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1).peekable();
    if matches!(args.peek().map(String::as_str), Some("list")) {
        list_airframes();
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
