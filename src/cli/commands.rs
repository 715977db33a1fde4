//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{parse_pair, ConfigMap, ConfigTree, TreeBuilder};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current dir", e))?,
    };
    let settings = load_settings(cli, &project_dir)?;

    match &cli.command {
        Some(Commands::Render { pairs }) => cmd_render(&settings, pairs),
        Some(Commands::Write { file, pairs }) => cmd_write(settings, file.as_deref(), pairs),
        Some(Commands::Tree { pairs }) => cmd_tree(&settings, pairs),
        Some(Commands::Config { command }) => cmd_config(&settings, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "xmlcfg", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `xmlcfg --help`".to_string(),
        )),
    }
}

/// Layered settings with command line overrides on top.
fn load_settings(cli: &Cli, project_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(project_dir))?;
    if let Some(root) = &cli.root {
        settings.root_name = root.clone();
    }
    if cli.no_comment {
        settings.write_comment = false;
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Parse `KEY=VALUE` arguments into an ordered mapping.
pub fn parse_pairs(pairs: &[String]) -> CliResult<ConfigMap> {
    let mut data = ConfigMap::new();
    for pair in pairs {
        let (key, value) = parse_pair(pair)
            .ok_or_else(|| CliError::InvalidArgs(format!("expected KEY=VALUE, got '{pair}'")))?;
        data.insert(key, value);
    }
    Ok(data)
}

#[instrument(skip(settings))]
fn cmd_render(settings: &Settings, pairs: &[String]) -> CliResult<()> {
    let data = parse_pairs(pairs)?;
    let container = ServiceContainer::new(settings.clone());
    let document = container.writer.render(&data)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&document)
        .and_then(|()| stdout.write_all(b"\n"))
        .map_err(|e| InfraError::io("write stdout", e))?;
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_write(settings: Settings, file: Option<&Path>, pairs: &[String]) -> CliResult<()> {
    let path: PathBuf = file
        .map(Path::to_path_buf)
        .or_else(|| settings.default_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no target file: pass --file or set default_file".to_string())
        })?;
    let data = parse_pairs(pairs)?;
    if data.is_empty() {
        return Err(CliError::InvalidArgs("no KEY=VALUE pairs given".to_string()));
    }

    let container = ServiceContainer::new(settings);
    let mut store = container.store(&path);
    for (key, value) in &data {
        store.set(key, value)?;
        output::entry_written(key, value);
    }
    output::document_written(&path, store.len());
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: &Settings, pairs: &[String]) -> CliResult<()> {
    let data = parse_pairs(pairs)?;
    let tree = TreeBuilder::new(settings.root_name.clone()).build(&data)?;
    output::info(&display_tree(&tree, tree.root()));
    Ok(())
}

fn cmd_config(settings: &Settings, project_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::header("Config files (lowest to highest precedence)");
            output::detail(&format!("global: {global}"));
            output::detail(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
            output::detail("env:    XMLCFG_*");
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

/// Render a configuration tree for terminal display.
pub fn display_tree(tree: &ConfigTree, idx: Index) -> Tree<String> {
    let Some(node) = tree.get_node(idx) else {
        return Tree::new(String::new());
    };
    let leaves = node
        .children
        .iter()
        .map(|&child| display_tree(tree, child))
        .collect_vec();
    Tree::new(node.to_string()).with_leaves(leaves)
}
