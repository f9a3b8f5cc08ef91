//! Catalog subcommands.
//!
//! Every command opens the catalog at the resolved path, performs one
//! operation and exits; mutations are written through immediately.

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::library::{format_materials, Catalog, MaterialId};

/// Catalog-related subcommands
#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// Add a talk URL to the catalog
    Add {
        /// Talk URL
        url: String,

        /// Title (defaults to "TED Talk <id>")
        #[arg(short, long, default_value = "")]
        title: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List every talk in the catalog
    List,

    /// List talks without a study package yet
    Pending,

    /// Show a single talk
    Show {
        /// Material ID
        id: MaterialId,
    },

    /// Mark a talk as processed
    Done {
        /// Material ID
        id: MaterialId,

        /// Transcript the package was generated from
        #[arg(long)]
        transcript: String,

        /// Generated study package
        #[arg(long)]
        package: String,
    },

    /// Remove a talk from the catalog
    Remove {
        /// Material ID
        id: MaterialId,
    },

    /// Search titles and descriptions
    Search {
        /// Search query (case-insensitive)
        query: String,
    },
}

/// Execute a catalog subcommand against the catalog at `catalog_path`
pub fn execute(command: LibraryCommands, catalog_path: &Path) -> Result<()> {
    let mut catalog = Catalog::open(catalog_path)?;

    match command {
        LibraryCommands::Add {
            url,
            title,
            description,
        } => {
            let record = catalog.add(url, title, description)?;
            println!("Added [{}] {}", record.id, record.title);
        }
        LibraryCommands::List => {
            println!("{}", catalog.format_listing());
        }
        LibraryCommands::Pending => {
            let pending = catalog.list_unprocessed();
            if pending.is_empty() {
                println!("No pending materials.");
            } else {
                println!("{}", format_materials(pending));
            }
        }
        LibraryCommands::Show { id } => {
            let record = catalog
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("Material not found: {}", id))?;
            println!("{}", format_materials([record]));
            if let Some(transcript) = &record.transcript_file {
                println!("Transcript: {}", transcript);
            }
        }
        LibraryCommands::Done {
            id,
            transcript,
            package,
        } => {
            if !catalog.mark_processed(id, transcript, package)? {
                anyhow::bail!("Material not found: {}", id);
            }
            println!("Marked [{}] as processed", id);
        }
        LibraryCommands::Remove { id } => {
            if !catalog.remove(id)? {
                anyhow::bail!("Material not found: {}", id);
            }
            println!("Removed [{}]", id);
        }
        LibraryCommands::Search { query } => {
            let results = catalog.search(&query);
            if results.is_empty() {
                println!("No results found for: {}", query);
            } else {
                println!("Found {} result(s) for \"{}\":\n", results.len(), query);
                println!("{}", format_materials(results));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_then_done_then_remove() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        execute(
            LibraryCommands::Add {
                url: "https://www.ted.com/talks/a".to_string(),
                title: String::new(),
                description: String::new(),
            },
            &path,
        )
        .unwrap();

        execute(
            LibraryCommands::Done {
                id: MaterialId::new(1),
                transcript: "a.txt".to_string(),
                package: "a.md".to_string(),
            },
            &path,
        )
        .unwrap();

        let catalog = Catalog::open(&path).unwrap();
        let record = catalog.get(MaterialId::new(1)).unwrap();
        assert_eq!(record.title, "TED Talk 1");
        assert!(record.processed);

        execute(LibraryCommands::Remove { id: MaterialId::new(1) }, &path).unwrap();
        assert!(Catalog::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_id_is_error_at_cli() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        assert!(execute(LibraryCommands::Remove { id: MaterialId::new(9) }, &path).is_err());
        assert!(execute(LibraryCommands::Show { id: MaterialId::new(9) }, &path).is_err());
        // Read-only commands never create the file
        execute(LibraryCommands::List, &path).unwrap();
        assert!(!path.exists());
    }
}
