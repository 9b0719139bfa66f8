use anyhow::Result;
use clap::Parser;
use gcebot::gcp::gce::{ComputeService, GceError, HttpComputeService, defaults, format_operation};

#[derive(Parser, Debug)]
#[command(name = "gce_start", about = "Start a GCE instance")]
struct Args {
    #[arg(name = "INSTANCE_NAME")]
    name: String,

    #[arg(long, default_value_t = defaults::default_project())]
    project: String,

    #[arg(long, default_value_t = defaults::default_zone())]
    zone: String,

    #[arg(long, help = "Print the raw API response.")]
    raw: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let service = HttpComputeService::new()?;

    // The start is asynchronous; this prints the operation handle, not the
    // final instance state.
    match service.start_instance(&args.project, &args.zone, &args.name) {
        Ok(operation) => {
            if args.raw {
                println!("{}", serde_json::to_string_pretty(&operation)?);
            } else {
                println!("{}", format_operation(&args.name, "START", &operation));
            }
        }
        Err(GceError::Provider { message, .. }) => println!("{}", message),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
