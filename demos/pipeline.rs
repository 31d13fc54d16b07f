//! Basic combinator pipeline example

use upshot_core::{try_success, Failure, Maybe, Success, Upshot};

fn field<'a>(line: &'a str, key: &str) -> Maybe<&'a str> {
    Maybe::from(
        line.split(';')
            .find_map(|part| part.strip_prefix(key).and_then(|rest| rest.strip_prefix('='))),
    )
}

fn numeric(part: &str) -> Upshot<i64, String> {
    match part.parse() {
        Ok(value) => Success(value),
        Err(_) => Failure(format!("not a number: {:?}", part)),
    }
}

fn parse_reading(line: &str) -> Upshot<(i64, i64), String> {
    let sensor = try_success!(field(line, "sensor")
        .ok_or_else(|| format!("no sensor id in {:?}", line)));
    let sensor = try_success!(numeric(sensor));
    let celsius = try_success!(field(line, "temp")
        .ok_or_else(|| format!("no temperature in {:?}", line)));
    let celsius = try_success!(numeric(celsius));
    Success((sensor, celsius))
}

fn sum_temperatures(lines: &[&str]) -> Upshot<i64, String> {
    let mut sum = 0;
    for line in lines {
        let (_, celsius) = try_success!(parse_reading(line));
        sum += celsius;
    }
    Success(sum)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Upshot Basic Pipeline Example\n");

    // A batch of raw sensor lines, some of them malformed
    let lines = [
        "sensor=1;temp=21",
        "sensor=2;temp=35",
        "sensor=3",
        "sensor=oops;temp=4",
        "sensor=5;temp=burnt",
    ];

    println!("Parsing {} records...\n", lines.len());
    for line in lines {
        let verdict = parse_reading(line).match_owned(
            |(sensor, celsius)| format!("sensor {:>4} reads {} C", sensor, celsius),
            |error| format!("rejected: {}", error),
        );
        println!("  {}", verdict);
    }

    // The whole batch fails on the first malformed line
    let mixed = sum_temperatures(&lines);
    println!("\nMixed batch total: {:?}", mixed.err());

    // A clean batch folds through and bridges into Result for `?`
    let clean = ["sensor=1;temp=21", "sensor=2;temp=35"];
    let total: Result<i64, String> = sum_temperatures(&clean).into();
    println!("Clean batch total: {} C", total?);

    Ok(())
}
