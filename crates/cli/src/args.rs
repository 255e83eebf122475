//! Argument parsing for `shopview <payload.json> [name=value ...] [--expand <category>]`.

use std::path::PathBuf;

use anyhow::{Context, bail};

pub const USAGE: &str = "usage: shopview <payload.json> [name=value ...] [--expand <category>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub payload: PathBuf,
    /// Facet selections, in command-line order.
    pub filters: Vec<(String, String)>,
    pub expand: Option<String>,
}

impl Args {
    pub fn parse<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut payload = None;
        let mut filters = Vec::new();
        let mut expand = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            if arg == "--expand" {
                let category = args.next().context("--expand needs a category name")?;
                expand = Some(category);
            } else if let Some(category) = arg.strip_prefix("--expand=") {
                expand = Some(category.to_string());
            } else if arg.starts_with("--") {
                bail!("unknown option {arg}\n{USAGE}");
            } else if payload.is_none() {
                payload = Some(PathBuf::from(arg));
            } else {
                let (name, value) = arg
                    .split_once('=')
                    .with_context(|| format!("filter {arg:?} is not name=value"))?;
                if name.trim().is_empty() {
                    bail!("filter {arg:?} has an empty name");
                }
                filters.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        Ok(Self {
            payload: payload.context(USAGE)?,
            filters,
            expand,
        })
    }
}
