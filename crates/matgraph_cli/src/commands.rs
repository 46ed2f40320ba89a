// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line commands.
//!
//! Each command frames a single whole-document read or write around the
//! codec.

use crate::sample::sample_library;
use matgraph_codec::{
    export_material_file, import_material_file, CodecError, CodecSettings, ImportTarget,
};
use matgraph_core::{HostError, MaterialLibrary};
use std::path::PathBuf;

/// Usage text
pub const USAGE: &str = "\
matgraph sample [out.json]           export the built-in sample material
matgraph import <doc.json>           import a document and print the manifest
matgraph normalize <in.json> <out.json>  import, then export at the current format version";

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Export the sample material
    Sample {
        /// Output file; the settings' document file name when absent
        output: Option<PathBuf>,
    },
    /// Import a document into an empty library
    Import {
        /// Document to read
        input: PathBuf,
    },
    /// Import a document, then export it again
    Normalize {
        /// Document to read
        input: PathBuf,
        /// Document to write
        output: PathBuf,
    },
}

/// Error type for command execution
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad command line
    #[error("{0}\n\nUsage:\n{usage}", usage = USAGE)]
    Usage(String),

    /// Codec failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Sample material could not be built
    #[error("Sample material could not be built: {0}")]
    Sample(#[from] HostError),

    /// Manifest could not be printed
    #[error("Manifest could not be serialized: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl Command {
    /// Parse the arguments that follow the program name
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args
            .next()
            .ok_or_else(|| CliError::Usage("Missing command".to_string()))?;
        let rest: Vec<PathBuf> = args.map(PathBuf::from).collect();

        match (name.as_str(), rest.as_slice()) {
            ("sample", []) => Ok(Self::Sample { output: None }),
            ("sample", [output]) => Ok(Self::Sample {
                output: Some(output.clone()),
            }),
            ("import", [input]) => Ok(Self::Import {
                input: input.clone(),
            }),
            ("normalize", [input, output]) => Ok(Self::Normalize {
                input: input.clone(),
                output: output.clone(),
            }),
            ("sample" | "import" | "normalize", _) => {
                Err(CliError::Usage(format!("Wrong number of arguments for '{name}'")))
            }
            _ => Err(CliError::Usage(format!("Unknown command '{name}'"))),
        }
    }

    /// Run the command; returns text for standard output
    pub fn run(&self, settings: &CodecSettings) -> Result<Option<String>, CliError> {
        match self {
            Self::Sample { output } => {
                let path = output
                    .clone()
                    .unwrap_or_else(|| settings.document_file_name.clone());
                let library = sample_library()?;
                export_material_file(&library, None, &path, settings)?;
                Ok(None)
            }
            Self::Import { input } => {
                let mut library = MaterialLibrary::new();
                let manifest = import_material_file(input, &mut library, &ImportTarget::Active, settings)?;
                Ok(Some(serde_json::to_string_pretty(&manifest)?))
            }
            Self::Normalize { input, output } => {
                let mut library = MaterialLibrary::new();
                import_material_file(input, &mut library, &ImportTarget::Active, settings)?;
                export_material_file(&library, None, output, settings)?;
                Ok(None)
            }
        }
    }
}
