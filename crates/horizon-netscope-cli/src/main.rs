//! netscope: a one-shot snapshot of local and wide-area network health.

mod args;
mod render;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use horizon_netscope_core::{
    ConnectivityProber, ReportOptions, SystemInterface, build_report, default_gateway, ping_host,
    route,
};

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_env("NETSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()?;

    let args = Args::parse();
    let options = ReportOptions {
        show_ipv6: args.ipv6,
        show_virtual: args.show_virtual,
    };

    // Resolved once per run; the table highlight and the subnet box both
    // degrade when this fails.
    let default_route = match route::resolve() {
        Ok(info) => Some(info),
        Err(e) => {
            warn!("default route unresolved: {e}");
            None
        }
    };

    match SystemInterface::snapshot() {
        Ok(snapshot) => {
            let report = build_report(&snapshot, default_route.as_ref(), &options);
            render::print_interface_table(&report, options.show_virtual);
        }
        Err(e) => {
            // The remaining sections draw on other OS facilities, so an
            // enumeration failure only costs the table.
            eprintln!("{}", style(format!("cannot list interfaces: {e}")).red());
        }
    }

    let gateway = default_gateway();
    let gateway_ping = match &gateway {
        Some(info) if args.ping => match ping_host(info.ip_address).await {
            Ok(rtt) => Some(rtt),
            Err(e) => {
                warn!("gateway ping failed: {e}");
                None
            }
        },
        _ => None,
    };
    render::print_gateway_summary(gateway.as_ref(), default_route.as_ref(), gateway_ping);

    if args.internet {
        let connectivity = ConnectivityProber::new().probe_all(args.ipv6).await;
        render::print_connectivity_summary(&connectivity);
    }

    Ok(())
}
