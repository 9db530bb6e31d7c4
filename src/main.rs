use clap::Parser;
use fuel_inventory::module::{run_module, run_script, ModuleArgs, ModuleResponse, ScriptOutput};
use fuel_inventory::Config;
use log::error;
use std::path::PathBuf;
use std::process;

/// Ansible inventory for the nodes of a Fuel installation.
///
/// Runs as an Ansible binary module when given an arguments file, or as a
/// dynamic inventory script with --list / --host.
#[derive(Parser, Debug)]
#[command(name = "fuel_inventory", version, about, long_about = None)]
struct Cli {
    /// Module arguments file passed by Ansible
    #[arg(conflicts_with_all = ["list", "host"])]
    args_file: Option<PathBuf>,

    /// Print the whole inventory
    #[arg(long, conflicts_with = "host")]
    list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "HOSTNAME")]
    host: Option<String>,

    /// Fuel client executable, overrides FUEL_BIN and the config file
    #[arg(long)]
    fuel_bin: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn module_main(cli: &Cli) -> i32 {
    let args = match cli.args_file {
        Some(ref path) => ModuleArgs::from_file(path),
        None => Ok(ModuleArgs::default()),
    };
    let response = match Config::from_env() {
        Ok(config) => run_module(args, config, cli.fuel_bin.as_deref()),
        Err(e) => {
            error!("{}", e);
            ModuleResponse::fail(&e)
        }
    };

    match response.to_json(cli.pretty) {
        Ok(json) => {
            println!("{}", json);
            response.exit_code()
        }
        Err(e) => {
            println!(r#"{{"failed": true, "msg": "cannot serialize module response"}}"#);
            error!("{}", e);
            1
        }
    }
}

fn script_main(cli: &Cli) -> i32 {
    let output = match Config::from_env() {
        Ok(config) => run_script(
            config,
            cli.fuel_bin.as_deref(),
            cli.host.as_deref(),
            cli.pretty,
        ),
        Err(e) => ScriptOutput::Stderr(e.to_string()),
    };

    match output {
        ScriptOutput::Stdout(ref json) => println!("{}", json),
        ScriptOutput::Stderr(ref msg) => eprintln!("{}", msg),
    }
    output.exit_code()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = if cli.list || cli.host.is_some() {
        script_main(&cli)
    } else {
        module_main(&cli)
    };
    process::exit(code);
}
