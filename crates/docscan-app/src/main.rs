// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — scan a directory of captured pages for their corner ITF barcode.
//
// Entry point. Initialises logging, loads the persisted config, runs one scan
// invocation over the directory and prints the response as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use docscan_app::DocumentScanner;
use docscan_app::services::{data_dir, settings};
use docscan_bridge::DirectoryCapture;
use docscan_core::{ResponseType, RoiConfig, ScanOptions};
use docscan_document::RxingDetector;

struct Args {
    input: PathBuf,
    options: ScanOptions,
    wide_roi: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            print_help();
            return ExitCode::from(2);
        }
    };

    tracing::info!("docscan starting");

    let mut config = settings::load_config(&data_dir::data_dir()).unwrap_or_default();
    if args.wide_roi {
        config.roi = RoiConfig::WIDE;
    }

    let surface = DirectoryCapture::new(args.input);
    let scanner = match DocumentScanner::new(surface, Arc::new(RxingDetector::default()), config) {
        Ok(scanner) => scanner,
        Err(err) => {
            eprintln!("{}: {err}", err.code());
            return ExitCode::from(1);
        }
    };

    match scanner.scan_document(args.options).await {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("cannot serialise response: {err}");
                ExitCode::from(1)
            }
        },
        Err(err) => {
            eprintln!("{}: {err}", err.code());
            ExitCode::from(1)
        }
    }
}

/// `Ok(None)` means help was requested.
fn parse_args() -> Result<Option<Args>, String> {
    let mut input: Option<PathBuf> = None;
    let mut options = ScanOptions::default();
    let mut wide_roi = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-pages" => {
                let value = args.next().ok_or("--max-pages needs a value")?;
                let pages = value
                    .parse()
                    .map_err(|_| format!("invalid page count: {value}"))?;
                options.max_pages = Some(pages);
            }
            "--quality" => {
                let value = args.next().ok_or("--quality needs a value")?;
                let quality = value
                    .parse()
                    .map_err(|_| format!("invalid quality: {value}"))?;
                options.image_quality = Some(quality);
            }
            "--base64" => options.response_type = Some(ResponseType::Base64),
            "--wide-roi" => wide_roi = true,
            "--help" | "-h" => return Ok(None),
            other if other.starts_with("--") => return Err(format!("unknown option: {other}")),
            other => {
                if input.is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
                input = Some(PathBuf::from(other));
            }
        }
    }

    let input = input.ok_or("missing input directory")?;
    Ok(Some(Args {
        input,
        options,
        wide_roi,
    }))
}

fn print_help() {
    eprintln!(
        "usage: docscan <input-dir> [--max-pages N] [--base64] [--quality Q] [--wide-roi]\n\
         \n\
         Treats the image files of <input-dir>, sorted by name, as captured pages\n\
         and prints the scan response as JSON. Log level follows RUST_LOG."
    );
}
