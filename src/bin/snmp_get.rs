//! snmp-get: fetch values from an SNMP agent.
//!
//! Part of the snmp-codec CLI utilities.

use clap::Parser;
use snmp_codec::cli::args::{CommonArgs, OutputArgs};
use snmp_codec::cli::hints::parse_oid;
use snmp_codec::cli::output::{
    OutputContext, RequestInfo, write_error, write_verbose_request, write_verbose_response,
};
use snmp_codec::{Client, Oid, PduType, Version};
use std::process::ExitCode;
use std::time::Instant;

/// Send a GET (by default GetNext) request and print the bindings returned.
#[derive(Debug, Parser)]
#[command(name = "snmp-get", version, about)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// OIDs to request (dotted notation or well-known names).
    #[arg(value_name = "OID", default_value = "1.3.6.1.2.1")]
    oids: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let target = match args.common.target_addr() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let oids: Vec<Oid> = match args.oids.iter().map(|s| parse_oid(s)).collect() {
        Ok(oids) => oids,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let version: Version = args.common.snmp_version.into();
    let pdu_type = if args.common.exact {
        PduType::Get
    } else {
        PduType::GetNext
    };

    if args.output.verbose {
        write_verbose_request(&RequestInfo {
            target,
            version,
            community: args.common.community.clone(),
            pdu_type,
            oids: oids.clone(),
        });
    }

    let start = Instant::now();
    let result = async {
        let client = Client::builder(target.to_string())
            .version(version)
            .community(args.common.community.as_bytes())
            .timeout(args.common.timeout_duration())
            .retries(args.common.retries)
            .pdu_type(pdu_type)
            .connect()
            .await?;
        client.get(&oids).await
    }
    .await;

    match result {
        Ok(response) => {
            if args.output.verbose {
                write_verbose_response(&response, start.elapsed());
            }

            let ctx = OutputContext {
                format: args.output.format,
                show_hints: !args.output.no_hints,
                force_hex: args.output.hex,
            };
            if let Err(e) = ctx.write_response(target, &response) {
                eprintln!("Error writing output: {}", e);
                return ExitCode::FAILURE;
            }

            if response.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            write_error(&e);
            ExitCode::FAILURE
        }
    }
}
