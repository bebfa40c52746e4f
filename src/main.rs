use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use taxa_rank::attribution::{AttributionConfig, RankedAttribution};
use taxa_rank::classifier::LinearModel;
use taxa_rank::coefficients::CoefficientTable;
use taxa_rank::detect::{DetectionReport, Detector};
use taxa_rank::subject::PatientTable;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a patient and explain a positive detection
    Detect {
        /// Composition table (CSV, one row per patient)
        #[arg(short, long)]
        input: PathBuf,

        /// Patient ID ('#OTU ID' or 'sample-id' column)
        #[arg(short, long)]
        patient: String,

        /// Patient age in years
        #[arg(short, long)]
        age: f64,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Rank a patient's taxa without running the classifier
    Rank {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        patient: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List patient IDs in a composition table
    Patients {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "taxa-rank")]
#[command(about = "Explain microbiome-based schizophrenia detections", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/taxa-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Causal-effect coefficient CSV (overrides config)
    #[arg(long, global = true)]
    coefficients: Option<PathBuf>,

    /// Classifier artifact (overrides config)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let startup = StartupPaths {
        config: cli.config,
        coefficients: cli.coefficients,
        model: cli.model,
    };

    match cli.command {
        Commands::Patients { input } => {
            let table = load_patients(&input);
            for id in table.patient_ids() {
                println!("{}", id);
            }
        }
        Commands::Detect {
            input,
            patient,
            age,
            format,
        } => {
            let detector = startup.build_detector();
            let subject = match load_patients(&input).subject(&patient, &detector.required_features()) {
                Ok(s) => s,
                Err(e) => fail_input(&e),
            };
            let report = match detector.detect(&patient, subject, age) {
                Ok(r) => r,
                Err(e) => fail_input(&e),
            };
            print_report(&report, format);
        }
        Commands::Rank {
            input,
            patient,
            format,
        } => {
            let detector = startup.build_detector();
            let subject = match load_patients(&input).subject(&patient, &detector.required_features()) {
                Ok(s) => s,
                Err(e) => fail_input(&e),
            };
            let ranking = match detector.rank_only(&subject) {
                Ok(r) => r,
                Err(e) => fail_input(&e),
            };
            print_ranking(&ranking, format);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Where startup state comes from: config file plus command-line overrides.
struct StartupPaths {
    config: Option<PathBuf>,
    coefficients: Option<PathBuf>,
    model: Option<PathBuf>,
}

impl StartupPaths {
    /// Load config, coefficient table, and classifier. Any failure here is fatal.
    fn build_detector(self) -> Detector<LinearModel> {
        let config = match taxa_rank::config::load_config(self.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };

        // Validate attribution limits at startup
        let attribution = config.attribution.clone().unwrap_or_default();
        if let Err(errors) = taxa_rank::attribution::validate_attribution(&attribution) {
            eprintln!("Attribution config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }

        build_detector(
            self.coefficients.or(config.coefficients),
            self.model.or(config.model),
            attribution,
        )
    }
}

/// Load the coefficient table and classifier. Any failure here is fatal.
fn build_detector(
    coefficients: Option<PathBuf>,
    model: Option<PathBuf>,
    attribution: AttributionConfig,
) -> Detector<LinearModel> {
    let Some(coefficients) = coefficients else {
        eprintln!("No coefficient table configured. Set 'coefficients' in the config file or pass --coefficients.");
        std::process::exit(EXIT_CONFIG);
    };
    let Some(model) = model else {
        eprintln!("No classifier configured. Set 'model' in the config file or pass --model.");
        std::process::exit(EXIT_CONFIG);
    };

    let table = match CoefficientTable::load(&coefficients) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Coefficient table error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let classifier = match LinearModel::load(&model) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Classifier error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let detector = Detector::new(table, classifier, attribution);
    let uncovered = detector
        .required_features()
        .iter()
        .filter(|f| !detector.table().contains(f))
        .count();
    if uncovered > 0 {
        log::warn!(
            "{} classifier features have no causal-effect coefficient and will never be ranked",
            uncovered
        );
    }
    detector
}

fn load_patients(input: &Path) -> PatientTable {
    match PatientTable::load(input) {
        Ok(t) => t,
        Err(e) => fail_input(&e),
    }
}

fn fail_input(e: &taxa_rank::InputError) -> ! {
    eprintln!("Input error: {}", e);
    std::process::exit(EXIT_INPUT);
}

fn print_report(report: &DetectionReport, format: OutputFormat) {
    let use_colors = taxa_rank::output::should_use_colors();
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Tsv => {
            eprintln!("{}", taxa_rank::output::format_diagnosis(report.diagnosis, false));
            if let Some(ranking) = &report.attribution {
                println!("{}", taxa_rank::output::format_tsv(ranking));
            }
        }
        OutputFormat::Table => {
            println!(
                "{}",
                taxa_rank::output::format_diagnosis(report.diagnosis, use_colors)
            );
            if let Some(ranking) = &report.attribution {
                println!();
                println!("Causal analysis:");
                println!(
                    "{}",
                    taxa_rank::output::format_ranking_table(ranking, use_colors)
                );
            }
        }
    }
}

fn print_ranking(ranking: &RankedAttribution, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(ranking) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize ranking: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        OutputFormat::Tsv => println!("{}", taxa_rank::output::format_tsv(ranking)),
        OutputFormat::Table => println!(
            "{}",
            taxa_rank::output::format_ranking_table(
                ranking,
                taxa_rank::output::should_use_colors()
            )
        ),
    }
}

fn print_json(report: &DetectionReport) {
    match taxa_rank::output::format_json(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
