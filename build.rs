// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: recipe path
fn recipe_arg() -> Arg {
    Arg::new("recipe").required(true).help("Path to the recipe file")
}

/// Common argument: source checkout
fn checkout_arg() -> Arg {
    Arg::new("checkout")
        .short('c')
        .long("checkout")
        .default_value(".")
        .help("Source checkout the recipe builds from")
}

/// Arguments shared by build, package and create
fn cook_args(cmd: Command) -> Command {
    cmd.arg(recipe_arg())
        .arg(checkout_arg())
        .arg(
            Arg::new("build_dir")
                .long("build-dir")
                .help("Out-of-source build directory (default: <checkout>/build)"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .help("Profile file with [settings] and [options] tables"),
        )
        .arg(
            Arg::new("setting")
                .short('s')
                .long("setting")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Setting override, e.g. -s build_type=Debug"),
        )
        .arg(
            Arg::new("option")
                .short('o')
                .long("option")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Option override, e.g. -o shared=True"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel build jobs (default: all cores)"),
        )
        .arg(Arg::new("cmake").long("cmake").default_value("cmake").help("cmake executable"))
        .arg(Arg::new("git").long("git").default_value("git").help("git executable"))
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .required(true)
        .help("Package root to copy files into")
}

fn build_cli() -> Command {
    Command::new("pantry")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pantry Contributors")
        .about("Recipe evaluator for packaging native libraries")
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse and validate a recipe, then show what it declares")
                .arg(recipe_arg()),
        )
        .subcommand(
            Command::new("version")
                .about("Resolve the package version for a checkout")
                .arg(recipe_arg())
                .arg(checkout_arg())
                .arg(Arg::new("git").long("git").default_value("git").help("git executable")),
        )
        .subcommand(cook_args(
            Command::new("build").about("Configure and compile without packaging"),
        ))
        .subcommand(
            cook_args(Command::new("package").about("Package an already built tree"))
                .arg(output_arg()),
        )
        .subcommand(
            cook_args(
                Command::new("create").about("Resolve the version, build and package in one go"),
            )
            .arg(output_arg()),
        )
        .subcommand(
            Command::new("info")
                .about("Show the link information consumers get")
                .arg(recipe_arg())
                .arg(
                    Arg::new("option")
                        .short('o')
                        .long("option")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append)
                        .help("Option override, e.g. -o shared=True"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON instead of text"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pantry.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
