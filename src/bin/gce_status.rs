use anyhow::Result;
use clap::Parser;
use gcebot::gcp::gce::{ComputeService, GceError, HttpComputeService, defaults, format_status};

#[derive(Parser, Debug)]
#[command(
    name = "gce_status",
    about = "Report the running status of a GCE instance"
)]
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

    match service.get_instance(&args.project, &args.zone, &args.name) {
        Ok(instance) => {
            if args.raw {
                println!("{}", serde_json::to_string_pretty(&instance)?);
            } else {
                println!("{}", format_status(&instance)?);
            }
        }
        // A provider-reported failure is the reply, verbatim.
        Err(GceError::Provider { message, .. }) => println!("{}", message),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
