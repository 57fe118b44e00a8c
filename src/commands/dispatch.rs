use tracing::{info, warn};

use super::{get::get_entry, list::render_listing};
use crate::config::Settings;
use crate::error::{DlidxError, Result};
use crate::http::{build_client, HttpClient};
use crate::listing::parse_listing;
use crate::models::FileDescriptor;
use crate::tui::{run_tui, Controller};
use crate::util::normalize_url;

pub const USAGE: &str = "Usage:
  dlidx <url>                                 # browse and download interactively
  dlidx list <url> [--filter \"text\"] [--json]  # print the listing
  dlidx get <url> <index>                     # download one entry by index
  dlidx help

Keys: ↑/↓ j/k move • g/G first/last • / filter • Esc clear filter • Enter download • q quit";

/// Route the command line (without the program name) to a subcommand.
pub fn run(args: &[String], settings: &Settings) -> Result<()> {
    match args.first().map(String::as_str) {
        None => Err(DlidxError::usage("No index URL given.")),
        Some("help") | Some("--help") | Some("-h") => {
            println!("{USAGE}");
            Ok(())
        }
        Some("list") => {
            let (url, filter, json) = parse_list_args(&args[1..])?;
            let (_, files) = fetch(&url, settings)?;
            print!("{}", render_listing(files, filter.as_deref(), json)?);
            if json {
                println!();
            }
            Ok(())
        }
        Some("get") => {
            let (url, index) = parse_get_args(&args[1..])?;
            let (client, files) = fetch(&url, settings)?;
            let (path, _) = get_entry(&client, &files, index, &settings.download_dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(url) => browse(url, settings),
    }
}

/// `<url> [--filter text] [--json]`
fn parse_list_args(args: &[String]) -> Result<(String, Option<String>, bool)> {
    let url = args.first().ok_or_else(|| DlidxError::usage("list: missing URL"))?;
    let mut filter = None;
    let mut json = false;
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--filter" => {
                let value = rest.next().ok_or_else(|| DlidxError::usage("--filter needs a value"))?;
                filter = Some(value.clone());
            }
            "--json" => json = true,
            other => return Err(DlidxError::usage(format!("list: unexpected argument '{other}'"))),
        }
    }
    Ok((url.clone(), filter, json))
}

/// `<url> <index>`
fn parse_get_args(args: &[String]) -> Result<(String, usize)> {
    let (Some(url), Some(index)) = (args.first(), args.get(1)) else {
        return Err(DlidxError::usage("get: expected <url> <index>"));
    };
    let index = index
        .parse()
        .map_err(|_| DlidxError::usage(format!("get: '{index}' is not an index")))?;
    Ok((url.clone(), index))
}

fn fetch(raw_url: &str, settings: &Settings) -> Result<(HttpClient, Vec<FileDescriptor>)> {
    let url = normalize_url(raw_url);
    let client = build_client(settings)?;
    let files = parse_listing(&client, &url)?;
    Ok((client, files))
}

/// First listing fetch of an interactive session. A page that cannot be
/// parsed still opens the browser (empty, with a status message); anything
/// else leaves nothing to browse and is returned.
pub fn startup_listing(client: &HttpClient, url: &str) -> Result<(Vec<FileDescriptor>, Option<String>)> {
    match parse_listing(client, url) {
        Ok(files) => Ok((files, None)),
        Err(e) if !e.is_fatal_at_startup() => {
            warn!("{e}");
            Ok((Vec::new(), Some(format!("{e} (showing an empty list)"))))
        }
        Err(e) => Err(e),
    }
}

fn browse(raw_url: &str, settings: &Settings) -> Result<()> {
    let url = normalize_url(raw_url);
    info!("Browsing {url}");
    let client = build_client(settings)?;
    let (files, status) = startup_listing(&client, &url)?;

    let mut controller = Controller::new(format!("Index of {raw_url}"), files);
    if let Some(msg) = status {
        controller.set_message(msg);
    }
    run_tui(controller, client, settings)?;
    Ok(())
}
