// src/main.rs
use clap::Parser;
use kubeconfig_phase::{
    app,
    error::Result,
    cert::DiskCertificateAuthority,
    types::{Args, Commands},
    utils::logging::{FileLogger, Logger, MultiLogger, StderrLogger},
};
use std::io;

fn build_logger(args: &Args) -> io::Result<Box<dyn Logger>> {
    let console: Box<dyn Logger> = Box::new(StderrLogger::new(args.debug));
    match &args.log_file {
        Some(path) => {
            let file: Box<dyn Logger> = Box::new(FileLogger::new(path, args.debug)?);
            Ok(Box::new(MultiLogger::new(vec![console, file])))
        }
        None => Ok(console),
    }
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    let mut logger = build_logger(&args)?;

    let res = match &args.command {
        Commands::User(user_args) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            app::run_user_command(
                user_args,
                &DiskCertificateAuthority,
                &mut out,
                logger.as_mut(),
            )
        }
    };

    let code = exit_code(res, logger.as_mut());
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

// The error is reported once through the logger; the exit status carries the rest.
fn exit_code(res: Result<()>, logger: &mut dyn Logger) -> i32 {
    match res {
        Ok(()) => 0,
        Err(err) => {
            logger.log(&format!("Error: {}", err));
            1
        }
    }
}
