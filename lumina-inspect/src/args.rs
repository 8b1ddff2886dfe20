use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{arg, value_parser, Command};

#[derive(Clone, Debug)]
pub struct Args {
    pub model: PathBuf,
    pub max_depth: Option<u32>,
    pub parallel: bool,
    pub print: bool,
}

impl Args {
    pub fn parse() -> Result<Self> {
        let mut matches = Command::new("lumina-inspect")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Builds and validates the BVH of an .obj model")
            .args(&[
                arg!(<MODEL> "Path to the .obj file")
                    .value_parser(value_parser!(PathBuf)),
                arg!(--"max-depth" <NUM> "Maximum depth of the tree")
                    .value_parser(value_parser!(u32))
                    .required(false),
                arg!(-p --parallel "Build subtrees on all available cores"),
                arg!(--print "Print the tree to stdout"),
            ])
            .get_matches();

        let model = matches
            .remove_one::<PathBuf>("MODEL")
            .context("Missing path to the model")?;

        Ok(Self {
            model,
            max_depth: matches.remove_one::<u32>("max-depth"),
            parallel: matches.get_flag("parallel"),
            print: matches.get_flag("print"),
        })
    }
}
