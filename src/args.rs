use clap::{Parser, Subcommand};
use docs_corpus::PipelineConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docs-corpus")]
#[command(about = "Crawls a documentation site and builds a text corpus from it")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// WebDriver endpoint (overrides config and WEBDRIVER_URL)
    #[arg(long, global = true)]
    pub webdriver_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect documentation links into the links file
    Discover,

    /// Scrape the links file into one text file per version
    Scrape,

    /// Clean and merge a directory of text files
    Merge {
        /// Directory holding the `.txt` files
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Merged output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Merge files in name order
        #[arg(long)]
        sort: bool,
    },

    /// Run discover, scrape and merge in order
    All,
}

impl Args {
    /// Build the effective configuration: file, then environment, then flags
    pub fn pipeline_config(&self) -> Result<PipelineConfig, docs_corpus::Error> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        }
        .with_env_overrides();

        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }

        if let Command::Merge {
            source_dir,
            output,
            sort,
        } = &self.command
        {
            if let Some(dir) = source_dir {
                config.merge.source_dir = dir.clone();
            }
            if let Some(path) = output {
                config.merge.output_file = path.clone();
            }
            config.merge.sort_entries |= *sort;
        }

        Ok(config)
    }
}
