//! Thin CLI driver (spec.md §1: file IO, project scaffolding and argument
//! parsing are "external collaborators", not part of the core). Reads one
//! source file, hands it to [`statik_compiler::compile`], and either
//! writes the produced artifact/build-recipe pair to disk or renders
//! diagnostics to stderr — mapping [`statik_compiler::CompileError`]/
//! [`statik_diagnostic::DiagnosticKind`] onto the exit codes spec.md §6
//! assigns the external driver, the way `oric::main` maps its own
//! `Problem` enum to `std::process::ExitCode`
//! (`compiler/oric/src/main.rs`).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use rustc_hash::FxHashMap;

use statik_backend::Preferences;
use statik_compiler::{compile, CompileConfig};
use statik_diagnostic::{render_to_string, DiagnosticKind};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cli) = Cli::parse(&args) else {
        print_usage();
        return ExitCode::from(1);
    };

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read {}: {e}", cli.input.display());
            return ExitCode::from(1);
        }
    };

    let preferences = match Preferences::from_map(&cli.preferences) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut config = CompileConfig::new(cli.target.clone());
    config.preferences = preferences;
    if let Some(name) = &cli.program_name {
        config.program_name = name.clone();
    }

    let output = compile(&source, &config);

    if let Some(artifact) = output.artifact {
        let out_dir = cli.out_dir.unwrap_or_else(|| PathBuf::from("."));
        let source_path = out_dir.join(format!("{}.{}", config.program_name, artifact.file_extension));
        let makefile_path = out_dir.join("Makefile");
        if let Err(e) = fs::write(&source_path, &artifact.source) {
            eprintln!("error: could not write {}: {e}", source_path.display());
            return ExitCode::from(1);
        }
        if let Err(e) = fs::write(&makefile_path, &artifact.build_recipe) {
            eprintln!("error: could not write {}: {e}", makefile_path.display());
            return ExitCode::from(1);
        }
        println!("wrote {} and {}", source_path.display(), makefile_path.display());
        return ExitCode::from(0);
    }

    let input_display = cli.input.display().to_string();
    let mut worst_code: u8 = 0;
    for diagnostic in &output.diagnostics {
        eprintln!("{}", render_to_string(&source, &input_display, diagnostic));
        worst_code = worst_code.max(exit_code_for(diagnostic.kind));
    }
    ExitCode::from(worst_code)
}

/// Maps a diagnostic kind to the driver's exit code (spec.md §6: "2
/// unsupported feature; 3 ambiguous inference; 4 backend limitation; 5 IR
/// parse failure"). Kinds spec.md's external-interface table does not name
/// explicitly (`SyntaxError`, `MissingAnnotation`, `InvalidOptimizationLevel`)
/// fall back to a generic failure code, mirroring how `oric::main` reserves
/// one catch-all exit code for problems outside its named table.
fn exit_code_for(kind: DiagnosticKind) -> u8 {
    match kind {
        DiagnosticKind::UnsupportedFeature | DiagnosticKind::HeterogeneousContainer => 2,
        DiagnosticKind::AmbiguousInference => 3,
        DiagnosticKind::UnsupportedByBackend => 4,
        DiagnosticKind::IrParseError => 5,
        DiagnosticKind::SyntaxError | DiagnosticKind::MissingAnnotation | DiagnosticKind::InvalidOptimizationLevel => 1,
    }
}

struct Cli {
    input: PathBuf,
    target: String,
    out_dir: Option<PathBuf>,
    program_name: Option<String>,
    preferences: FxHashMap<String, String>,
}

impl Cli {
    fn parse(args: &[String]) -> Option<Cli> {
        let mut input = None;
        let mut target = "ir".to_string();
        let mut out_dir = None;
        let mut program_name = None;
        let mut preferences = FxHashMap::default();

        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--target" => target = it.next()?.clone(),
                "--out-dir" => out_dir = Some(PathBuf::from(it.next()?)),
                "--name" => program_name = Some(it.next()?.clone()),
                "--pref" => {
                    let (key, value) = it.next()?.split_once('=')?;
                    preferences.insert(key.to_string(), value.to_string());
                }
                other if !other.starts_with('-') && input.is_none() => input = Some(PathBuf::from(other)),
                _ => return None,
            }
        }

        Some(Cli { input: input?, target, out_dir, program_name, preferences })
    }
}

fn print_usage() {
    eprintln!(
        "usage: staticc <input> [--target c|go|ml|ir] [--out-dir DIR] [--name PROGRAM] [--pref key=value]..."
    );
}
