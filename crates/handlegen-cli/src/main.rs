use clap::{ArgAction, Parser, Subcommand};
use handlegen_decl::{filter, Decl, DeclKind, TypeDecl};
use handlegen_driver::{Driver, HeaderOptions, Section};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handlegen")]
#[command(author, version, about = "Generate cgo wrapper stubs from C headers")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go sources from the configured headers
    Generate {
        /// Path to handlegen.toml
        #[arg(short, long, default_value = "handlegen.toml")]
        config: PathBuf,

        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Only generate one section
        #[arg(long)]
        only: Option<SectionArg>,
    },

    /// Parse the configured headers and report what was found
    Check {
        /// Path to handlegen.toml
        #[arg(short, long, default_value = "handlegen.toml")]
        config: PathBuf,
    },

    /// Print the declarations of a header
    Dump {
        /// Header to dump
        header: PathBuf,

        /// Macro tokens to remove before parsing
        #[arg(long = "strip")]
        strip_tokens: Vec<String>,

        /// Print the full declaration model instead of one line per declaration
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SectionArg {
    Enums,
    Handles,
    Methods,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Enums => Section::Enums,
            SectionArg::Handles => Section::Handles,
            SectionArg::Methods => Section::Methods,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(decl: &Decl) -> String {
    match &decl.kind {
        DeclKind::Enum(e) => format!("enum     {} ({} enumerators)", decl.name, e.enumerators.len()),
        DeclKind::Function(f) => {
            let mut params: Vec<String> = f
                .params
                .iter()
                .map(|p| match &p.name {
                    Some(name) => format!("{} {}", p.ty, name),
                    None => p.ty.to_string(),
                })
                .collect();
            if f.is_variadic {
                params.push("...".to_string());
            }
            format!("function {} {}({})", f.ret_ty, decl.name, params.join(", "))
        }
        DeclKind::Type(TypeDecl::Alias(ty)) => format!("typedef  {} = {}", decl.name, ty),
        DeclKind::Type(TypeDecl::Record { is_union, .. }) => {
            let keyword = if *is_union { "union" } else { "struct" };
            format!("{keyword:<8} {}", decl.name)
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate { config, out, only } => {
            let mut driver = Driver::from_config_file(&config)?;
            if let Some(dir) = out {
                driver = driver.with_output_dir(dir);
            }

            let sections = match only {
                Some(section) => vec![section.into()],
                None => Section::ALL.to_vec(),
            };
            for path in driver.generate(&sections)? {
                println!("Wrote {}", path.display());
            }
        }

        Commands::Check { config } => {
            let mut driver = Driver::from_config_file(&config)?;
            let unit = driver.load()?;
            println!(
                "{}: OK ({} enums, {} functions, {} types)",
                config.display(),
                unit.get(filter::enums).len(),
                unit.get(filter::functions).len(),
                unit.get(filter::types).len(),
            );
        }

        Commands::Dump {
            header,
            strip_tokens,
            debug,
        } => {
            let unit = handlegen_driver::parse_header(&header, &HeaderOptions { strip_tokens })?;
            if debug {
                println!("{:#?}", unit.decls());
            } else {
                for decl in unit.decls() {
                    println!("{}", describe(decl));
                }
            }
        }
    }

    Ok(())
}
