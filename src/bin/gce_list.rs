use anyhow::Result;
use clap::Parser;
use gcebot::gcp::gce::{GceError, HttpComputeService, defaults, list_instances};

#[derive(Parser, Debug)]
#[command(name = "gce_list", about = "List GCE instances in a project/zone")]
struct Args {
    #[arg(long, default_value_t = defaults::default_project())]
    project: String,

    #[arg(long, default_value_t = defaults::default_zone())]
    zone: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let service = HttpComputeService::new()?;

    // Rows: Status, Name, Machine Type, Zone, External IP
    let mut rows: Vec<[String; 5]> = Vec::new();
    for result in list_instances(&service, &args.project, &args.zone) {
        let instance = match result {
            Ok(instance) => instance,
            Err(GceError::Provider { message, .. }) => {
                println!("{}", message);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let machine_type = instance
            .machine_type
            .as_deref()
            .map(last_segment)
            .unwrap_or("")
            .to_string();
        let zone_disp = instance
            .zone
            .as_deref()
            .map(last_segment)
            .unwrap_or(&args.zone)
            .to_string();
        let external_ip = instance.external_ip().unwrap_or("-").to_string();

        rows.push([
            instance.status,
            instance.name,
            machine_type,
            zone_disp,
            external_ip,
        ]);
    }

    print_table(
        &["Status", "Name", "Machine Type", "Zone", "External IP"],
        &rows,
    );

    Ok(())
}

fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}

fn print_table(headers: &[&str; 5], rows: &[[String; 5]]) {
    let mut widths: [usize; 5] = [0; 5];
    for (i, h) in headers.iter().enumerate() {
        widths[i] = h.chars().count();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", line.join("  "));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", sep.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}
