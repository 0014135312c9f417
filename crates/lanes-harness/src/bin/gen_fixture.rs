#![forbid(unsafe_code)]

use lanes_harness::{FixtureShape, HarnessConfig, generate_fixture};
use lanes_kind::NumericKind;
use lanes_random::{RandomSource, parse_seed};
use std::io::Write;

const USAGE: &str = "Usage: cargo run -p lanes-harness --bin gen_fixture -- --kind <f32|f64|i8..u64> [--vectors <n>] [--lanes <n>] [--indent <n>] [--min <x>] [--max <x>] [--seed <n|0xN>]";

fn main() {
    if let Err(err) = run() {
        eprintln!("gen_fixture failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = HarnessConfig::from_env()?;
    config.install_check_log();
    let mut kind: Option<NumericKind> = None;
    let mut vectors = 3_usize;
    let mut lanes = 4_usize;
    let mut indent: Option<usize> = None;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    let mut seed = config.random_seed;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kind" => {
                let value = next_value(&mut args, "--kind")?;
                kind = Some(
                    NumericKind::parse(&value)
                        .ok_or_else(|| format!("unknown numeric kind: {value}"))?,
                );
            }
            "--vectors" => vectors = parse_number(&next_value(&mut args, "--vectors")?, "--vectors")?,
            "--lanes" => lanes = parse_number(&next_value(&mut args, "--lanes")?, "--lanes")?,
            "--indent" => {
                indent = Some(parse_number(&next_value(&mut args, "--indent")?, "--indent")?);
            }
            "--min" => min = Some(parse_number(&next_value(&mut args, "--min")?, "--min")?),
            "--max" => max = Some(parse_number(&next_value(&mut args, "--max")?, "--max")?),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_seed(&value).ok_or_else(|| format!("invalid seed: {value}"))?);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            unknown => return Err(format!("unknown argument: {unknown}")),
        }
    }

    let kind = kind.ok_or_else(|| format!("--kind is required\n{USAGE}"))?;
    let mut shape = FixtureShape::new(kind, vectors, lanes);
    if let Some(indent) = indent {
        shape.indent = indent;
    }
    if let Some(min) = min {
        shape.min = min;
    }
    if let Some(max) = max {
        shape.max = max;
    }

    let mut source = seed.map_or_else(RandomSource::new, RandomSource::seeded);
    let (text, record) = generate_fixture(&shape, &mut source, config.variant)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|err| format!("failed writing fixture: {err}"))?;

    let record_json = serde_json::to_string(&record)
        .map_err(|err| format!("failed serializing fixture record: {err}"))?;
    eprintln!("{record_json}");
    Ok(())
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| format!("{flag}: invalid value {raw:?}: {err}"))
}
