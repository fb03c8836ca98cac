use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use qbias_circuit::{Circuit, CircuitConfig};
use qbias_parts::{BjtRecord, ResistorBlueprint, TransistorBlueprint, TransistorCatalog};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Blueprint order
    Blueprint,
    Name,
    Gain,
}

#[derive(Parser, Debug)]
#[command(name = "qbias", about = "Collector-feedback BJT bias calculator", version)]
struct Args {
    /// Transistor blueprint (JSON list); built-in parts when omitted
    #[arg(long, value_name = "FILE")]
    transistors: Option<PathBuf>,

    /// Resistor blueprint (JSON object); built-in values when omitted
    #[arg(long, value_name = "FILE")]
    resistors: Option<PathBuf>,

    /// Transistor model to bias
    #[arg(long, default_value = "2N2222")]
    model: String,

    /// Supply voltage in volts
    #[arg(long, value_name = "VOLTS")]
    vcc: Option<f64>,

    /// Print the transistor catalog instead of a bias point
    #[arg(long)]
    list: bool,

    /// Ordering used by --list
    #[arg(long, value_enum, default_value_t = SortOrder::Blueprint)]
    sort: SortOrder,

    /// Print the bias point as JSON
    #[arg(long, conflicts_with = "list")]
    json: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let circuit = build_circuit(&args)?;
    println!("{}", report(&circuit, &args)?);
    Ok(())
}

/// Load both blueprints and install the transistor catalog.
fn build_circuit(args: &Args) -> anyhow::Result<Circuit> {
    let transistors = match &args.transistors {
        Some(path) => TransistorBlueprint::from_json_file(path)?,
        None => TransistorBlueprint::builtin(),
    };
    let resistors = match &args.resistors {
        Some(path) => ResistorBlueprint::from_json_file(path)?,
        None => ResistorBlueprint::builtin(),
    };

    let config = CircuitConfig {
        supply_voltage: args.vcc.unwrap_or(CircuitConfig::default().supply_voltage),
    };
    tracing::debug!(?config, parts = transistors.len(), "circuit configured");

    let mut circuit = Circuit::with_config(transistors, resistors, config);
    circuit
        .initialise_transistors()
        .context("failed to build the transistor catalog")?;
    Ok(circuit)
}

fn report(circuit: &Circuit, args: &Args) -> anyhow::Result<String> {
    if args.list {
        return Ok(catalog_listing(circuit.catalog()?, args.sort));
    }

    let bias = circuit
        .collector_feedback(&args.model)
        .with_context(|| format!("collector feedback for {}", args.model))?;

    if args.json {
        Ok(serde_json::to_string_pretty(&bias)?)
    } else {
        Ok(bias.to_string())
    }
}

fn catalog_listing(catalog: &TransistorCatalog, sort: SortOrder) -> String {
    let records: Vec<&BjtRecord> = match sort {
        SortOrder::Blueprint => catalog.records().collect(),
        SortOrder::Name => catalog.sorted_by_name(),
        SortOrder::Gain => catalog.sorted_by_gain(),
    };
    records
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_reference_part() {
        let args = Args::try_parse_from(["qbias"]).unwrap();
        assert_eq!(args.model, "2N2222");
        assert!(args.vcc.is_none());
        assert!(matches!(args.sort, SortOrder::Blueprint));
    }

    #[test]
    fn json_and_list_conflict() {
        assert!(Args::try_parse_from(["qbias", "--list", "--json"]).is_err());
    }

    #[test]
    fn sort_accepts_gain() {
        let args = Args::try_parse_from(["qbias", "--list", "--sort", "gain"]).unwrap();
        assert!(args.list);
        assert!(matches!(args.sort, SortOrder::Gain));
    }

    const SMALL_SIGNAL: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../qbias_parts/tests/blueprints/small_signal.transistors.json"
    );
    const REFERENCE_RESISTORS: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../qbias_parts/tests/blueprints/reference.resistors.json"
    );

    // The only test in this binary that installs the process-wide catalog.
    #[test]
    fn reports_from_blueprint_files() {
        let args = Args::try_parse_from([
            "qbias",
            "--transistors",
            SMALL_SIGNAL,
            "--resistors",
            REFERENCE_RESISTORS,
            "--list",
            "--sort",
            "gain",
        ])
        .unwrap();
        let circuit = build_circuit(&args).unwrap();

        insta::assert_snapshot!(report(&circuit, &args).unwrap(), @r"
        Model: 2N2222, Type: NPN, Hfe: 60, Vbe: 0.7
        Model: 2N2223, Type: NPN, Hfe: 100, Vbe: 0.7
        Model: 2N3904, Type: NPN, Hfe: 100, Vbe: 0.65
        Model: 2N3906, Type: PNP, Hfe: 100, Vbe: 0.65
        ");

        let json_args = Args::try_parse_from(["qbias", "--json"]).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&report(&circuit, &json_args).unwrap()).unwrap();
        assert_eq!(json["model"], "2N2222");
        assert_eq!(json["current_gain"], 60);
        assert_eq!(json["region"], "active");

        let text_args = Args::try_parse_from(["qbias", "--model", "2N3906"]).unwrap();
        let text = report(&circuit, &text_args).unwrap();
        assert!(text.starts_with(
            "Collector feedback bias: 2N3906 (PNP, hfe 100), active region, Vcc = 12 V"
        ));

        let unknown = Args::try_parse_from(["qbias", "--model", "BC547"]).unwrap();
        let err = report(&circuit, &unknown).unwrap_err();
        assert!(format!("{err:#}").contains("BC547"));

        // a second circuit in the same process cannot install another catalog
        let err = build_circuit(&args).unwrap_err();
        assert!(format!("{err:#}").contains("only one transistor catalog"));
    }
}
