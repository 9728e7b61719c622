use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use parsetle::tle::layout::{self, Column};
use parsetle::tle::{read_lines, records, RecordLines, Tle, TleFile};

#[derive(Parser)]
#[command(name = "parsetle")]
#[command(about = "Parses two-line element set files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a TLE file
    Validate { file: String },
    /// Print the parsed records of a TLE file
    Show {
        file: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print every column of every record, raw and decoded
    Fields { file: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => validate(&file),
        Commands::Show { file, format } => show(&file, format),
        Commands::Fields { file } => fields(&file),
    }
}

fn load(path: &str) -> Option<TleFile> {
    match TleFile::from_path(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Error loading {}: {}", path, e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(file) = load(path) else {
        return ExitCode::FAILURE;
    };

    println!("TLE file is valid ({} records)", file.len());
    for (i, tle) in file.iter().enumerate() {
        println!(
            "  {}: {} {} @ {}",
            i + 1,
            tle.satellite_catalog_num,
            tle.name.as_deref().unwrap_or("-"),
            tle.epoch
        );
    }
    ExitCode::SUCCESS
}

fn show(path: &str, format: Format) -> ExitCode {
    let Some(file) = load(path) else {
        return ExitCode::FAILURE;
    };

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&file.tles).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(&file.tles).map_err(|e| e.to_string()),
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::warn!("Failed to serialize records from {}: {}", path, e);
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fields(path: &str) -> ExitCode {
    let lines = match File::open(path).and_then(|f| read_lines(BufReader::new(f))) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for (i, record) in records(&lines).enumerate() {
        let checked = record.and_then(|lines| Tle::parse(&lines).map(|_| lines));
        let lines = match checked {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("Record {}: {}", i + 1, e);
                return ExitCode::FAILURE;
            }
        };
        let shape = match RecordLines::from_lines(&lines) {
            Ok(shape) => shape,
            Err(e) => {
                eprintln!("Record {}: {}", i + 1, e);
                return ExitCode::FAILURE;
            }
        };

        println!("record {}", i + 1);
        if let Some(name) = shape.name_line() {
            println!("  line 0 {:<28} {:?}", "name", name[1..].trim());
        }
        let (line1, line2) = shape.element_lines();
        print_columns(&layout::LINE_1, line1);
        print_columns(&layout::LINE_2, line2);
    }

    ExitCode::SUCCESS
}

fn print_columns(columns: &[Column], line: &str) {
    for column in columns {
        let raw = column.raw(line).unwrap_or_default();
        let decoded = match column.decode(line) {
            Ok(value) => value.to_string(),
            Err(e) => format!("<{}>", e),
        };
        println!(
            "  line {} {:<28} [{:>2}..{:>2}] {:<16} {}",
            column.line.number(),
            column.name,
            column.start,
            column.end,
            format!("{:?}", raw),
            decoded
        );
    }
}
