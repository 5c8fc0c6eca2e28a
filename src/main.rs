use std::error::Error;

use clap::Parser;
use componentry::{
    cli::args::{component_names, CliArgs, Command},
    Componentry,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = CliArgs::parse();

    let mut builder = Componentry::builder()
        .root(&cli_args.root)
        .module_file_name(&cli_args.module_location);

    match cli_args.cmd {
        Command::Resolve { components } => {
            let componentry = builder.try_build()?;
            for component in componentry.resolve(&component_names(components))? {
                println!("{component}");
            }
            Ok(())
        }
        Command::Build {
            components,
            src_dir,
            output,
        } => {
            if let Some(src_dir) = src_dir {
                builder = builder.src_dir(src_dir);
            }
            if let Some(output) = output {
                builder = builder.dist_file(output);
            }
            let componentry = builder.try_build()?;
            componentry.build(&component_names(components))?;
            Ok(())
        }
        Command::Init { directory, name } => {
            let componentry = builder.root(directory).try_build()?;
            componentry.init(name)?;
            Ok(())
        }
    }
}
