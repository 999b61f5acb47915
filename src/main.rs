use ele::utils::logger;
use ele::{Config, Duplicates, Element, ElementIndex, Key, MassMatch};
use std::env;
use std::process;

const USAGE: &str = "Usage: ele <symbol-or-name>
       ele --number <Z>
       ele --mass <amu> [--exact | --approx] [--duplicates error|all|none]
       ele --list
       ele --save-config";

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 3] = ["--number", "--mass", "--duplicates"];

#[derive(Debug, PartialEq)]
enum Command<'a> {
    SaveConfig,
    List,
    Number(&'a str),
    Mass(&'a str),
    Infer(&'a str),
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config, config_msg) = Config::load();
    if logger::init(config.level_filter()).is_err() {
        eprintln!("WARNING: logger already installed");
    }
    log::debug!("{}", config_msg);

    if args.is_empty() || has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{}", USAGE);
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let command = parse_command(&args).unwrap_or_else(|msg| fail(&msg));
    if command == Command::SaveConfig {
        println!("{}", config.save());
        return;
    }

    let index = match config.open_index() {
        Ok(index) => index,
        Err(e) => fail(&format!("could not load element table: {}", e)),
    };

    match command {
        Command::SaveConfig => {}
        Command::List => {
            for element in index.records() {
                print_element(element);
            }
        }
        Command::Number(raw) => {
            let key = match raw.parse::<i64>() {
                Ok(n) => Key::Integer(n as i128),
                // let the index reject non-integers with its own message
                Err(_) => match raw.parse::<f64>() {
                    Ok(x) => Key::Float(x),
                    Err(_) => Key::Text(raw),
                },
            };
            report(index.lookup_by_atomic_number(key));
        }
        Command::Mass(raw) => run_mass(&index, raw, &args, &config),
        Command::Infer(text) => report(index.infer(text)),
    }
}

/// Picks the command by flag presence, wherever the flag appears.
fn parse_command(args: &[String]) -> Result<Command<'_>, String> {
    if has_flag(args, "--save-config") {
        Ok(Command::SaveConfig)
    } else if has_flag(args, "--list") {
        Ok(Command::List)
    } else if has_flag(args, "--number") {
        flag_value(args, "--number").map(Command::Number)
    } else if has_flag(args, "--mass") {
        flag_value(args, "--mass").map(Command::Mass)
    } else {
        positional(args)
            .map(Command::Infer)
            .ok_or_else(|| "missing symbol or name".to_string())
    }
}

/// `--exact` and `--approx` override the configured default.
fn mass_exactness(args: &[String], default: bool) -> Result<bool, String> {
    match (has_flag(args, "--exact"), has_flag(args, "--approx")) {
        (true, true) => Err("--exact and --approx are mutually exclusive".to_string()),
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        (false, false) => Ok(default),
    }
}

fn run_mass(index: &ElementIndex, raw: &str, args: &[String], config: &Config) {
    let mass: f64 = match raw.parse() {
        Ok(m) => m,
        Err(_) => fail(&format!("`--mass` ({}) must be a number", raw)),
    };

    let exact = mass_exactness(args, config.exact_mass).unwrap_or_else(|msg| fail(&msg));
    let duplicates = if has_flag(args, "--duplicates") {
        let raw = flag_value(args, "--duplicates").unwrap_or_else(|msg| fail(&msg));
        match raw.parse::<Duplicates>() {
            Ok(d) => d,
            Err(e) => fail(&e.to_string()),
        }
    } else {
        config.duplicates
    };

    match index.lookup_by_mass(mass, exact, duplicates) {
        Ok(MassMatch::Single(element)) => print_element(element),
        Ok(MassMatch::Multiple(elements)) => elements.into_iter().for_each(print_element),
        Ok(MassMatch::Suppressed) => println!("(several elements match; none reported)"),
        Err(e) => fail(&e.to_string()),
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<&'a str, String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .ok_or_else(|| format!("{} flag requires an argument.", flag))
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            return Some(arg.as_str());
        }
    }
    None
}

fn report(result: ele::Result<&Element>) {
    match result {
        Ok(element) => print_element(element),
        Err(e) => fail(&e.to_string()),
    }
}

fn print_element(element: &Element) {
    let radius = |r: Option<f64>| r.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    println!(
        "{:>3}  {:<3}  {:<14} {:>9.4}  bondi {:>5}  alvarez {:>5}",
        element.atomic_number,
        element.symbol,
        element.name,
        element.mass,
        radius(element.radius_bondi),
        radius(element.radius_alvarez)
    );
}

fn fail(msg: &str) -> ! {
    eprintln!("ERROR: {}", msg);
    process::exit(1);
}
