use ddlflow::graph::GraphBuilder;
use ddlflow::sql;
use std::env;
use std::fs;
use std::process;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.sql> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        eprintln!("  -l, --logical         Label nodes with logical (comment) names");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut use_logical_names = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-l" | "--logical" => {
                use_logical_names = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let outcome = sql::parse_many(&input);
    for err in &outcome.errors {
        eprintln!("Skipped statement `{}`: {}", err.statement, err.error);
    }
    if outcome.tables.is_empty() {
        eprintln!("No CREATE TABLE statements found in {}", input_path);
        process::exit(1);
    }

    let graph = GraphBuilder::default().build(&outcome.tables, use_logical_names);
    for skip in &graph.skipped {
        eprintln!(
            "Foreign key {} -> {} not drawn: target table missing",
            skip.source, skip.target
        );
    }

    let json = match serde_json::to_string_pretty(&graph) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Failed to serialize graph: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => println!("{}", json),
    }
}
